use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::domain::{AdminIdentity, AuthSession, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::CredentialStore;
use super::role::RegistrationPolicy;
use super::token::TokenService;

/// Auth business service independent of web framework
pub struct AuthService<R: CredentialStore> {
    repo: Arc<R>,
    tokens: TokenService,
    policy: RegistrationPolicy,
}

impl<R: CredentialStore> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenService, policy: RegistrationPolicy) -> Self {
        Self { repo, tokens, policy }
    }

    pub fn tokens(&self) -> &TokenService { &self.tokens }

    /// Register a new admin identity with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, RegistrationPolicy, TokenService, repository::mock::MockCredentialStore};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockCredentialStore::default()), TokenService::new("secret", 900), RegistrationPolicy::default());
    /// let input = RegisterInput { email: "admin@example.com".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "admin@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AdminIdentity, AuthError> {
        input.validate()?;
        if self.repo.find_by_email(&input.email).await?.is_some() {
            debug!("email already registered");
            return Err(AuthError::Conflict);
        }

        let digest = password::hash(&input.password)?;
        let user = self.repo.create(&input.email, digest, password::ALGORITHM, self.policy.role).await?;
        info!(user_id = %user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(user)
    }

    /// Check credentials and issue a short-lived access token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, RegistrationPolicy, TokenService, repository::mock::MockCredentialStore};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockCredentialStore::default()), TokenService::new("secret", 900), RegistrationPolicy::default());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.access_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        input.validate()?;
        let Some((user, creds)) = self.repo.find_by_email(&input.email).await? else {
            password::verify_dummy(&input.password);
            warn!("login rejected");
            return Err(AuthError::Unauthorized);
        };
        if !password::verify(&input.password, &creds.password_hash)? {
            warn!(user_id = %user.id, "login rejected");
            return Err(AuthError::Unauthorized);
        }

        let (access_token, claims) = self.tokens.issue(user.id, user.role)?;
        info!(user_id = %user.id, role = %user.role, "user_logged_in");
        Ok(AuthSession { user, access_token, expires_at: claims.exp })
    }

    /// Acknowledge a logout. Tokens are stateless, so nothing is revoked.
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Option<Uuid>) -> Result<(), AuthError> {
        let user_id = user_id.ok_or(AuthError::Unauthorized)?;
        let user = self.repo.find_by_id(user_id).await?.ok_or(AuthError::NotFound)?;
        info!(user_id = %user.id, "user_logged_out");
        Ok(())
    }
}
