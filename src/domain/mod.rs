pub mod cart;
pub mod dish;
pub mod order;
pub mod restaurant;
pub mod user;

pub use cart::*;
pub use dish::*;
pub use order::*;
pub use restaurant::*;
pub use user::*;
