pub mod errors;
pub mod db;
pub mod admin_user;
pub mod owner;
pub mod pet;
pub mod veterinarian;
pub mod medical_record;

#[cfg(test)]
mod tests;
