//! Persistence backends implementing the repository contracts.

pub mod seaorm;

pub use seaorm::SeaOrmStore;
