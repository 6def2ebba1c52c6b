//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod seed;
pub mod storefront;
pub mod storefront_system;
pub mod telemetry;

pub use error::*;
pub use storefront::*;
pub use storefront_system::*;
pub use telemetry::*;
