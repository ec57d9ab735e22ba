//! Stateless HS256 access tokens.
//!
//! Expiry is enforced here rather than by `jsonwebtoken` so callers can pass
//! an explicit instant; there is no leeway.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("signing failed: {0}")]
    Signing(String),
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    pub fn from_settings(settings: &configs::AuthSettings) -> Self {
        Self::new(&settings.jwt_secret, settings.access_token_ttl_secs)
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<(String, Claims), TokenError> {
        self.issue_at(user_id, role, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, role: Role, now: DateTime<Utc>) -> Result<(String, Claims), TokenError> {
        let claims = Claims {
            user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok((token, claims))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|_| TokenError::Malformed)?;
        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc() -> TokenService { TokenService::new("unit-test-secret", 15 * 60) }

    #[test]
    fn accepted_before_fifteen_minutes_rejected_after() {
        let svc = svc();
        let t0 = Utc::now();
        let uid = Uuid::new_v4();
        let (token, issued) = svc.issue_at(uid, Role::Admin, t0).unwrap();
        assert_eq!(issued.exp - issued.iat, 900);

        let ok = svc.verify_at(&token, t0 + Duration::minutes(14)).unwrap();
        assert_eq!(ok.user_id, uid);
        assert_eq!(ok.role, Role::Admin);

        assert_eq!(svc.verify_at(&token, t0 + Duration::minutes(16)), Err(TokenError::Expired));
        assert_eq!(svc.verify_at(&token, t0 + Duration::minutes(15)), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_and_foreign_tokens_are_malformed() {
        let svc = svc();
        let (token, _) = svc.issue(Uuid::new_v4(), Role::Veterinarian).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert_eq!(svc.verify(&tampered), Err(TokenError::Malformed));

        let other = TokenService::new("another-secret", 900);
        assert_eq!(other.verify(&token), Err(TokenError::Malformed));
        assert_eq!(svc.verify("garbage"), Err(TokenError::Malformed));
    }

    #[test]
    fn claims_serialize_camel_case() {
        let claims = Claims { user_id: Uuid::nil(), role: Role::Admin, iat: 1, exp: 2 };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("userId").is_some());
        assert_eq!(json["role"], "admin");
    }
}
