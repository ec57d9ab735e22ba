use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Roles understood by the authorization guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Veterinarian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Veterinarian => "veterinarian",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "unknown role: {}", self.0) }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "veterinarian" => Ok(Role::Veterinarian),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Decides which role a freshly registered account receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    pub role: Role,
}

impl Default for RegistrationPolicy {
    fn default() -> Self { Self { role: Role::Admin } }
}

impl RegistrationPolicy {
    pub fn from_settings(settings: &configs::AuthSettings) -> Result<Self, UnknownRole> {
        Ok(Self { role: settings.registration_role.parse()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" veterinarian ".parse::<Role>().unwrap(), Role::Veterinarian);
        assert!("receptionist".parse::<Role>().is_err());
    }

    #[test]
    fn policy_defaults_to_admin() {
        let settings = configs::AuthSettings::default();
        assert_eq!(RegistrationPolicy::from_settings(&settings).unwrap().role, Role::Admin);
        assert_eq!(RegistrationPolicy::default().role, Role::Admin);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Veterinarian).unwrap(), "\"veterinarian\"");
    }
}
