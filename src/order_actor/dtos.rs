use rust_decimal::Decimal;

use crate::domain::{OrderStatus, PaymentMethod};

/// One order line as submitted at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineCreate {
    pub dish_id: String,
    pub quantity: u32,
    /// Price copied from the cart, not re-read from the menu.
    pub unit_price: Decimal,
}

/// Payload for creating an order together with all of its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub user_id: String,
    pub restaurant_id: String,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub pickup_code: String,
    pub lines: Vec<OrderLineCreate>,
}

/// Status updates pushed by the kitchen.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub user_id: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            status: None,
        }
    }
}
