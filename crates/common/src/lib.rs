//! Cross-cutting helpers shared by the clinic crates: logging setup,
//! runtime environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
