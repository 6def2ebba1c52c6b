use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Campus wallet balance.
    #[default]
    Wallet,
    Card,
    /// Cash on pickup.
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wallet" => Ok(PaymentMethod::Wallet),
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(format!("Unknown payment method: {other}")),
        }
    }
}

/// Order lifecycle as reported by the kitchen. The storefront only displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    /// Badge text used in the order list.
    pub fn badge(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// A placed order together with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    /// Tax-inclusive.
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub status: OrderStatus,
    pub pickup_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

/// One dish in a placed order. `unit_price` is the price at purchase time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub dish_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Timestamp-derived opaque token printed as the pickup QR code.
pub fn generate_pickup_code(now: DateTime<Utc>) -> String {
    format!("QR-{}", now.timestamp_millis())
}
