use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::Dish;
use super::dtos::{DishCreate, DishFilter, DishPatch};

/// Highest spice level shown on the menu.
const MAX_SPICE_LEVEL: u8 = 5;

fn check_price(price: Decimal) -> Result<(), String> {
    if price.is_sign_negative() {
        return Err(format!("price must be non-negative, got {price}"));
    }
    Ok(())
}

impl Entity for Dish {
    const NAME: &'static str = "dishes";

    type Id = String;
    type CreateParams = DishCreate;
    type Patch = DishPatch;
    type Filter = DishFilter;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a dish. Dishes are available as soon as they are listed.
    ///
    /// # Errors
    /// Rejects a negative price, a missing restaurant or category, and spice
    /// levels above the menu scale.
    fn from_create_params(id: String, params: DishCreate) -> Result<Self, String> {
        check_price(params.price)?;
        if params.restaurant_id.is_empty() {
            return Err("restaurant_id required".to_string());
        }
        if params.category.trim().is_empty() {
            return Err(format!("category required for {}", params.name));
        }
        if params.spice_level > MAX_SPICE_LEVEL {
            return Err(format!(
                "spice_level must be at most {MAX_SPICE_LEVEL}, got {}",
                params.spice_level
            ));
        }
        Ok(Self {
            id,
            restaurant_id: params.restaurant_id,
            name: params.name,
            description: params.description,
            price: params.price,
            image_url: params.image_url,
            is_available: true,
            is_vegetarian: params.is_vegetarian,
            spice_level: params.spice_level,
            calories: params.calories,
            category: params.category,
            allergens: params.allergens,
        })
    }

    fn matches(&self, filter: &DishFilter) -> bool {
        if filter.available_only && !self.is_available {
            return false;
        }
        filter
            .restaurant_id
            .as_deref()
            .map_or(true, |rid| rid == self.restaurant_id)
    }

    fn on_update(&mut self, patch: DishPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(available) = patch.is_available {
            self.is_available = available;
        }
        Ok(())
    }
}
