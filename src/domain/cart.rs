use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Dish;
use crate::pricing::PriceSummary;

/// One dish in the local cart. Display fields and price are copied from the
/// dish when it is first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Dish id; unique within a cart.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub restaurant_id: String,
}

impl CartLine {
    pub fn from_dish(dish: &Dish) -> Self {
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            description: dish.description.clone(),
            price: dish.price,
            image_url: dish.image_url.clone(),
            quantity: 1,
            restaurant_id: dish.restaurant_id.clone(),
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Your cart has items from another restaurant ({cart_restaurant}); clear it to order from {dish_restaurant}")]
    RestaurantMismatch {
        cart_restaurant: String,
        dish_restaurant: String,
    },
    #[error("{0} is currently unavailable")]
    DishUnavailable(String),
}

/// Ordered cart lines, all from one restaurant, every quantity at least 1.
///
/// Mutations return a new cart; persisting it is the caller's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored lines. Returns `None` when the lines break
    /// a cart invariant (zero quantity, duplicate dish, mixed restaurants).
    pub fn from_lines(lines: Vec<CartLine>) -> Option<Self> {
        let valid = {
            let mut seen = std::collections::HashSet::new();
            let restaurant = lines.first().map(|l| l.restaurant_id.as_str());
            lines.iter().all(|line| {
                line.quantity >= 1
                    && line.price >= Decimal::ZERO
                    && Some(line.restaurant_id.as_str()) == restaurant
                    && seen.insert(line.id.as_str())
            })
        };
        valid.then_some(Self { lines })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities, shown on the cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Restaurant that owns every line, if the cart is not empty.
    pub fn restaurant_id(&self) -> Option<&str> {
        self.lines.first().map(|l| l.restaurant_id.as_str())
    }

    pub fn line(&self, dish_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == dish_id)
    }

    pub fn summary(&self) -> PriceSummary {
        PriceSummary::for_lines(&self.lines)
    }

    pub fn add_or_increment(&self, dish: &Dish) -> Result<Cart, CartError> {
        if let Some(owner) = self.restaurant_id() {
            if owner != dish.restaurant_id {
                return Err(CartError::RestaurantMismatch {
                    cart_restaurant: owner.to_string(),
                    dish_restaurant: dish.restaurant_id.clone(),
                });
            }
        }

        if !dish.is_available {
            return Err(CartError::DishUnavailable(dish.name.clone()));
        }

        let mut next = self.clone();
        match next.lines.iter_mut().find(|l| l.id == dish.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => next.lines.push(CartLine::from_dish(dish)),
        }
        Ok(next)
    }

    /// Lines whose quantity would drop to zero or below are removed; growth
    /// saturates at `u32::MAX`. Unknown dish ids leave the cart unchanged.
    pub fn change_quantity(&self, dish_id: &str, delta: i64) -> Cart {
        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                if line.id != dish_id {
                    return Some(line.clone());
                }
                let quantity = i64::from(line.quantity).saturating_add(delta);
                (quantity > 0).then(|| CartLine {
                    quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
                    ..line.clone()
                })
            })
            .collect();
        Cart { lines }
    }

    pub fn remove_line(&self, dish_id: &str) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|l| l.id != dish_id)
                .cloned()
                .collect(),
        }
    }
}
