//! Typed clients over the resource actors.

#[macro_use]
mod macros;

pub mod dish_client;
pub mod order_client;
pub mod restaurant_client;
pub mod user_client;

pub use dish_client::DishClient;
pub use order_client::{OrderClient, PlaceOrder, PlacedOrder};
pub use restaurant_client::RestaurantClient;
pub use user_client::UserClient;
