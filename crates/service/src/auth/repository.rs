use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AdminIdentity, Credentials};
use super::errors::AuthError;
use super::role::Role;

/// Persistence seam for admin identities and their password digests.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<(AdminIdentity, Credentials)>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminIdentity>, AuthError>;
    /// Fails with `AuthError::Conflict` when the email is taken.
    async fn create(&self, email: &str, password_hash: String, password_algorithm: &str, role: Role) -> Result<AdminIdentity, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCredentialStore {
        users: Mutex<HashMap<String, (AdminIdentity, Credentials)>>, // key: email
    }

    impl MockCredentialStore {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, (AdminIdentity, Credentials)>>, AuthError> {
            self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))
        }

        /// Drop an identity, simulating removal behind a live token.
        pub fn remove(&self, email: &str) {
            if let Ok(mut users) = self.lock() {
                users.remove(email);
            }
        }
    }

    #[async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<(AdminIdentity, Credentials)>, AuthError> {
            Ok(self.lock()?.get(email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminIdentity>, AuthError> {
            Ok(self.lock()?.values().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
        }

        async fn create(&self, email: &str, password_hash: String, password_algorithm: &str, role: Role) -> Result<AdminIdentity, AuthError> {
            let mut users = self.lock()?;
            if users.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let user = AdminIdentity { id: Uuid::new_v4(), email: email.to_string(), role };
            let creds = Credentials { user_id: user.id, password_hash, password_algorithm: password_algorithm.to_string() };
            users.insert(email.to_string(), (user.clone(), creds));
            Ok(user)
        }
    }
}
