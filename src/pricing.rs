//! Cart pricing using rust_decimal for precision
//!
//! Every amount is rounded half-up (away from zero at the midpoint) to two
//! decimal places. Tax is derived from the rounded subtotal and the total is
//! their sum, so the total shown in the cart is the total stored on the order.

use rust_decimal::prelude::*;

use crate::domain::CartLine;

const DECIMAL_PLACES: u32 = 2;

/// Flat campus sales tax (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Σ price × quantity, rounded.
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    round_money(lines.iter().map(CartLine::line_total).sum())
}

pub fn tax(subtotal: Decimal) -> Decimal {
    round_money(subtotal * TAX_RATE)
}

/// Formats an amount the way the storefront displays it, e.g. `₹504.00`.
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(DECIMAL_PLACES);
    format!("₹{rounded}")
}

/// Subtotal, tax and total for one cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PriceSummary {
    pub fn for_lines(lines: &[CartLine]) -> Self {
        let subtotal = subtotal(lines);
        let tax = tax(subtotal);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

impl std::fmt::Display for PriceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subtotal {} | Tax (5%) {} | Total {}",
            format_money(self.subtotal),
            format_money(self.tax),
            format_money(self.total)
        )
    }
}
