//! Restaurants table.

mod dtos;
pub mod entity;
pub mod error;

pub use dtos::*;
pub use error::*;
