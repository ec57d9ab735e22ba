//! Bearer-token authorization applied per route group.
//!
//! `NoToken -> 401`, `Invalid -> 401`, `role not allowed -> 403`; otherwise the
//! verified identity is attached to the request as [`AuthenticatedUser`].

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

use service::auth::{Role, TokenError, TokenService};

use crate::errors::ApiError;

/// Identity extracted from a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Clone)]
pub struct RouteGuard {
    tokens: TokenService,
    /// `None` admits any authenticated role.
    allowed: Option<&'static [Role]>,
}

impl RouteGuard {
    pub fn any_role(tokens: TokenService) -> Self { Self { tokens, allowed: None } }

    pub fn roles(tokens: TokenService, allowed: &'static [Role]) -> Self { Self { tokens, allowed: Some(allowed) } }

    pub fn check(&self, header: Option<&str>) -> Result<AuthenticatedUser, ApiError> {
        let header = header.ok_or_else(|| ApiError::Unauthorized("Access token required".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".into()))?;
        let claims = self.tokens.verify(token).map_err(|e| {
            let reason = match e {
                TokenError::Expired => "expired",
                _ => "malformed",
            };
            warn!(reason, "token rejected");
            ApiError::Unauthorized("Invalid or expired token".into())
        })?;
        if let Some(allowed) = self.allowed {
            if !allowed.contains(&claims.role) {
                warn!(user_id = %claims.user_id, role = %claims.role, "role not permitted");
                return Err(ApiError::Forbidden("Insufficient permissions".into()));
            }
        }
        Ok(AuthenticatedUser { user_id: claims.user_id, role: claims.role })
    }
}

pub async fn authorize(State(guard): State<RouteGuard>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let user = guard.check(header).map_err(|e| {
        warn!(path = %req.uri().path(), error = %e, "request not authorized");
        e
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const ADMIN_ONLY: &[Role] = &[Role::Admin];

    fn tokens() -> TokenService { TokenService::new("guard-secret", 900) }

    #[test]
    fn missing_and_malformed_headers_are_unauthorized() {
        let guard = RouteGuard::roles(tokens(), ADMIN_ONLY);
        assert!(matches!(guard.check(None), Err(ApiError::Unauthorized(_))));
        assert!(matches!(guard.check(Some("Token abc")), Err(ApiError::Unauthorized(_))));
        assert!(matches!(guard.check(Some("Bearer ")), Err(ApiError::Unauthorized(_))));
        assert!(matches!(guard.check(Some("Bearer not.a.jwt")), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn role_outside_set_is_forbidden() {
        let svc = tokens();
        let (token, _) = svc.issue(Uuid::new_v4(), Role::Veterinarian).unwrap();
        let header = format!("Bearer {token}");
        let admin_only = RouteGuard::roles(svc.clone(), ADMIN_ONLY);
        assert!(matches!(admin_only.check(Some(&header)), Err(ApiError::Forbidden(_))));

        let anyone = RouteGuard::any_role(svc);
        let user = anyone.check(Some(&header)).unwrap();
        assert_eq!(user.role, Role::Veterinarian);
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let svc = tokens();
        let (token, _) = svc.issue_at(Uuid::new_v4(), Role::Admin, Utc::now() - Duration::minutes(20)).unwrap();
        let guard = RouteGuard::roles(svc, ADMIN_ONLY);
        assert!(matches!(guard.check(Some(&format!("Bearer {token}"))), Err(ApiError::Unauthorized(_))));
    }
}
