//! Orders table. An order row carries its lines.

mod dtos;
pub mod entity;
pub mod error;

pub use dtos::*;
pub use error::*;
