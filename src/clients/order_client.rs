use chrono::Utc;
use tracing::{error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::RestaurantClient;
use crate::domain::{generate_pickup_code, Cart, Order, OrderStatus, PaymentMethod};
use crate::order_actor::{OrderCreate, OrderError, OrderFilter, OrderLineCreate, OrderPatch};
use crate::pricing::PriceSummary;

/// Checkout details that are not part of the cart.
#[derive(Debug, Clone, Default)]
pub struct PlaceOrder {
    pub user_id: String,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
}

/// What the customer sees once an order has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: String,
    pub pickup_code: String,
    pub summary: PriceSummary,
}

/// Client for the orders table.
///
/// Validates the restaurant before writing, then stores the order and its
/// lines in a single request.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    restaurant_client: RestaurantClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, restaurant_client: RestaurantClient) -> Self {
        Self {
            inner,
            restaurant_client,
        }
    }

    #[instrument(skip(self, cart), fields(user_id = %request.user_id, lines = cart.lines().len()))]
    pub async fn place_order(&self, request: PlaceOrder, cart: &Cart) -> Result<PlacedOrder, OrderError> {
        info!("Processing place_order request (Client Side)");

        let Some(restaurant_id) = cart.restaurant_id() else {
            return Err(OrderError::ValidationError("cart is empty".to_string()));
        };

        // Step 1: Validate restaurant
        match self.restaurant_client.get_restaurant(restaurant_id.to_string()).await {
            Ok(Some(restaurant)) if restaurant.is_open => {
                info!(restaurant = %restaurant.name, "Restaurant validation successful")
            }
            Ok(Some(restaurant)) => {
                error!(restaurant = %restaurant.name, "Restaurant is closed");
                return Err(OrderError::RestaurantClosed(restaurant.name));
            }
            Ok(None) => {
                error!(restaurant_id, "Restaurant not found");
                return Err(OrderError::InvalidRestaurant(restaurant_id.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Restaurant validation failed");
                return Err(OrderError::InvalidRestaurant(format!(
                    "Restaurant validation failed: {e}"
                )));
            }
        }

        // Step 2: Price and write order with lines
        let summary = cart.summary();
        let pickup_code = generate_pickup_code(Utc::now());
        let payload = OrderCreate {
            user_id: request.user_id,
            restaurant_id: restaurant_id.to_string(),
            total_amount: summary.total,
            payment_method: request.payment_method,
            special_instructions: request.special_instructions,
            pickup_code: pickup_code.clone(),
            lines: cart
                .lines()
                .iter()
                .map(|line| OrderLineCreate {
                    dish_id: line.id.clone(),
                    quantity: line.quantity,
                    unit_price: line.price,
                })
                .collect(),
        };

        let order_id = self.inner.create(payload).await.map_err(|e| {
            error!(error = %e, "Order write failed");
            OrderError::from(e)
        })?;

        info!(order_id = %order_id, total = %summary.total, "Order placed");
        Ok(PlacedOrder {
            order_id,
            pickup_code,
            summary,
        })
    }

    /// Orders owned by `user_id`, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list_orders(OrderFilter::for_user(user_id)).await?;
        // ties keep the most recently inserted first
        orders.reverse();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Kitchen-side status change.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<Order, OrderError> {
        let patch = OrderPatch { status: Some(status) };
        self.inner.update(id, patch).await.map_err(OrderError::from)
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);
