//! SeaORM entities for the recruiting schema plus pool construction.

pub mod errors;
pub mod db;
pub mod user;
pub mod employee;
pub mod employer;
pub mod resume;
pub mod vacancy;
pub mod reaction;

#[cfg(test)]
mod tests;
