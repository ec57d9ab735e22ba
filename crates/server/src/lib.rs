pub mod errors;
pub mod extract;
pub mod guard;
pub mod openapi;
pub mod rate_limit;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, run, run_until};
