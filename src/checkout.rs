//! Turns the persisted cart into a stored order.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::cart_store::{CartRepository, CartStoreError};
use crate::clients::{OrderClient, PlaceOrder};
use crate::domain::PaymentMethod;
use crate::order_actor::OrderError;
use crate::session::Session;

pub use crate::clients::PlacedOrder;

/// Checkout form input.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please sign in to continue")]
    NotSignedIn,
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Invalid restaurant: {0}")]
    InvalidRestaurant(String),
    #[error(transparent)]
    Order(OrderError),
    #[error("Order placed but the cart could not be cleared: {0}")]
    CartStore(#[from] CartStoreError),
}

impl From<OrderError> for CheckoutError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::InvalidRestaurant(id) => CheckoutError::InvalidRestaurant(id),
            other => CheckoutError::Order(other),
        }
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    session: Session,
    carts: Arc<dyn CartRepository>,
    orders: OrderClient,
}

impl CheckoutService {
    pub fn new(session: Session, carts: Arc<dyn CartRepository>, orders: OrderClient) -> Self {
        Self {
            session,
            carts,
            orders,
        }
    }

    /// Submits the current cart as one order.
    ///
    /// Sign-in and cart contents are checked before anything is sent to the
    /// backend. A loaded cart always belongs to a single restaurant, since
    /// [`Cart::from_lines`](crate::domain::Cart::from_lines) refuses anything else. The cart is cleared only after the order is stored; on any
    /// failure it is left as it was. Nothing is retried.
    #[instrument(skip(self))]
    pub async fn submit(&self, request: CheckoutRequest) -> Result<PlacedOrder, CheckoutError> {
        let identity = self
            .session
            .current()
            .await
            .map_err(|_| CheckoutError::NotSignedIn)?;

        let cart = self.carts.load();
        if cart.is_empty() {
            warn!("Checkout with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let place = PlaceOrder {
            user_id: identity.user_id,
            payment_method: request.payment_method,
            special_instructions: request.special_instructions,
        };
        let placed = self.orders.place_order(place, &cart).await.map_err(|e| {
            error!(error = %e, "Checkout failed, cart kept");
            CheckoutError::from(e)
        })?;

        if let Err(e) = self.carts.clear() {
            error!(order_id = %placed.order_id, error = %e, "Cart clear failed after order was placed");
            return Err(e.into());
        }

        info!(order_id = %placed.order_id, pickup_code = %placed.pickup_code, "Checkout complete");
        Ok(placed)
    }
}
