//! Repository implementations for database operations

pub mod deals;
pub mod sharks;

pub use deals::*;
pub use sharks::*;
