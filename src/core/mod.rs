//! Core types and constants for displacement tracking

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
