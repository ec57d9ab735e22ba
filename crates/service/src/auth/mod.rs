//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and logout live here together with the token and
//! password primitives they orchestrate.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod repo;
pub mod role;
pub mod service;
pub mod token;

pub use role::{RegistrationPolicy, Role};
pub use service::AuthService;
pub use token::{Claims, TokenError, TokenService};
