//! Order history rows as the customer sees them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Dish, Order, OrderStatus, PaymentMethod, Restaurant};

/// Length of the order reference printed on receipts.
pub const ORDER_REFERENCE_LEN: usize = 8;

/// Short order reference: the first eight characters of the id.
pub fn order_reference(order_id: &str) -> String {
    order_id.chars().take(ORDER_REFERENCE_LEN).collect()
}

/// The pickup code is only shown once the kitchen marks the order ready.
pub fn reveal_pickup_code(order: &Order) -> Option<&str> {
    (order.status == OrderStatus::Ready).then_some(order.pickup_code.as_str())
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub dish_id: String,
    /// `None` when the dish has since been removed from the menu.
    pub dish_name: Option<String>,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order_id: String,
    pub reference: String,
    pub restaurant_name: Option<String>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub pickup_code: Option<String>,
    pub lines: Vec<OrderLineView>,
}

impl OrderView {
    /// Joins an order with its restaurant and the dishes it references.
    pub fn build(order: &Order, restaurant: Option<&Restaurant>, dishes: &HashMap<String, Dish>) -> Self {
        let lines = order
            .lines
            .iter()
            .map(|line| {
                let dish = dishes.get(&line.dish_id);
                OrderLineView {
                    dish_id: line.dish_id.clone(),
                    dish_name: dish.map(|d| d.name.clone()),
                    image_url: dish.and_then(|d| d.image_url.clone()),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                }
            })
            .collect();

        Self {
            order_id: order.id.clone(),
            reference: order_reference(&order.id),
            restaurant_name: restaurant.map(|r| r.name.clone()),
            status: order.status,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            special_instructions: order.special_instructions.clone(),
            created_at: order.created_at,
            pickup_code: reveal_pickup_code(order).map(String::from),
            lines,
        }
    }
}
