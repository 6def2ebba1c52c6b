use thiserror::Error;

use crate::cart_store::CartStoreError;
use crate::checkout::CheckoutError;
use crate::dish_actor::DishError;
use crate::domain::CartError;
use crate::order_actor::OrderError;
use crate::restaurant_actor::RestaurantError;
use crate::session::AuthError;
use crate::user_actor::UserError;

/// Any failure a storefront action can report to the customer.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    CartStore(#[from] CartStoreError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Restaurant(#[from] RestaurantError),
    #[error(transparent)]
    Dish(#[from] DishError),
    #[error(transparent)]
    Order(#[from] OrderError),
}
