//! Cross-crate helpers: tracing setup and small wire types shared by the
//! server and the binary.

pub mod types;
pub mod utils;
