//! Profiles table: account validation and lookup by email.

pub mod entity;
pub mod error;

pub use error::*;
