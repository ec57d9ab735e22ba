use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::warn;
use uuid::Uuid;

use models::{admin_user, errors::ModelError};

use crate::auth::domain::{AdminIdentity, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::CredentialStore;
use crate::auth::role::Role;

pub struct SeaOrmCredentialStore {
    pub db: DatabaseConnection,
}

impl SeaOrmCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn identity(u: &admin_user::Model) -> Result<AdminIdentity, AuthError> {
    let role: Role = u.role.parse().map_err(|e| {
        warn!(user_id = %u.id, role = %u.role, "stored role not recognised");
        AuthError::Repository(format!("{}", e))
    })?;
    Ok(AdminIdentity { id: u.id, email: u.email.clone(), role })
}

fn repo_err(e: ModelError) -> AuthError {
    match e {
        ModelError::Conflict(_) => AuthError::Conflict,
        ModelError::Validation(m) => AuthError::Validation(m),
        ModelError::Db(m) => AuthError::Repository(m),
    }
}

#[async_trait::async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<(AdminIdentity, Credentials)>, AuthError> {
        let Some(u) = admin_user::find_by_email(&self.db, email).await.map_err(repo_err)? else {
            return Ok(None);
        };
        let creds = Credentials {
            user_id: u.id,
            password_hash: u.password_hash.clone(),
            password_algorithm: u.password_algorithm.clone(),
        };
        Ok(Some((identity(&u)?, creds)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminIdentity>, AuthError> {
        let found = admin_user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        found.as_ref().map(identity).transpose()
    }

    async fn create(&self, email: &str, password_hash: String, password_algorithm: &str, role: Role) -> Result<AdminIdentity, AuthError> {
        let created = admin_user::create(&self.db, email, password_hash, password_algorithm, role.as_str())
            .await
            .map_err(repo_err)?;
        identity(&created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn create_and_lookup_roundtrip() -> Result<(), anyhow::Error> {
        let store = SeaOrmCredentialStore::new(get_db().await?);
        let created = store.create("desk@clinic.test", "$argon2id$stub".into(), "argon2", Role::Veterinarian).await?;
        assert_eq!(created.role, Role::Veterinarian);

        let (found, creds) = store.find_by_email("desk@clinic.test").await?.expect("stored");
        assert_eq!(found.id, created.id);
        assert_eq!(creds.password_hash, "$argon2id$stub");
        assert!(store.find_by_id(created.id).await?.is_some());
        assert!(store.find_by_email("DESK@clinic.test").await?.is_none());

        let dup = store.create("desk@clinic.test", "$argon2id$x".into(), "argon2", Role::Admin).await;
        assert!(matches!(dup, Err(AuthError::Conflict)));
        Ok(())
    }
}
