use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderLine, OrderStatus};
use super::dtos::{OrderCreate, OrderFilter, OrderPatch};

impl Entity for Order {
    const NAME: &'static str = "orders";

    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;
    type Filter = OrderFilter;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates the order and its lines in one row, so a stored order always
    /// has all of its lines.
    ///
    /// # Notes
    /// The order starts as [`OrderStatus::Pending`]. Line ids are generated here.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.user_id.is_empty() {
            return Err("user_id required".to_string());
        }
        if params.restaurant_id.is_empty() {
            return Err("restaurant_id required".to_string());
        }
        if params.lines.is_empty() {
            return Err("an order needs at least one line".to_string());
        }
        if params.total_amount.is_sign_negative() {
            return Err(format!("total must be non-negative, got {}", params.total_amount));
        }
        if params.pickup_code.is_empty() {
            return Err("pickup_code required".to_string());
        }

        let lines = params
            .lines
            .into_iter()
            .map(|line| {
                if line.quantity == 0 {
                    return Err(format!("quantity must be positive for dish {}", line.dish_id));
                }
                if line.unit_price < Decimal::ZERO {
                    return Err(format!("price must be non-negative for dish {}", line.dish_id));
                }
                Ok(OrderLine {
                    id: Uuid::new_v4().to_string(),
                    order_id: id.clone(),
                    dish_id: line.dish_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            restaurant_id: params.restaurant_id,
            total_amount: params.total_amount,
            payment_method: params.payment_method,
            special_instructions: params
                .special_instructions
                .filter(|s| !s.trim().is_empty()),
            status: OrderStatus::Pending,
            pickup_code: params.pickup_code,
            created_at: now,
            updated_at: now,
            lines,
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        let user_ok = filter.user_id.as_deref().map_or(true, |u| u == self.user_id);
        let status_ok = filter.status.map_or(true, |s| s == self.status);
        user_ok && status_ok
    }

    /// Applies a kitchen status update. Any status may follow any other; the
    /// kitchen is the authority on order progress.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        if let Some(status) = patch.status {
            self.status = status;
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    fn on_delete(&self) -> Result<(), String> {
        Err(format!("Order {} cannot be deleted", self.id))
    }
}
