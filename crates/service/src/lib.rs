//! Service layer providing the clinic's business operations on top of models.
//! - Auth workflows (credentials, tokens, registration policy).
//! - Entity services with reference checks and read-time expansion.
//! - Cascading deletes and appointment-time rules.

pub mod errors;
pub mod auth;
pub mod schedule;
pub mod cascade;
pub mod validation;
pub mod owner_service;
pub mod pet_service;
pub mod veterinarian_service;
pub mod medical_record_service;
#[cfg(test)]
pub mod test_support;
