pub mod seaorm;

pub use seaorm::SeaOrmCredentialStore;
