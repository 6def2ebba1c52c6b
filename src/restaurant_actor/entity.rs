use crate::actor_framework::Entity;
use crate::domain::Restaurant;
use super::dtos::{RestaurantCreate, RestaurantFilter, RestaurantPatch};

const MAX_RATING: f32 = 5.0;

impl Entity for Restaurant {
    const NAME: &'static str = "restaurants";

    type Id = String;
    type CreateParams = RestaurantCreate;
    type Patch = RestaurantPatch;
    type Filter = RestaurantFilter;

    fn id(&self) -> &String {
        &self.id
    }

    /// New restaurants start unrated.
    fn from_create_params(id: String, params: RestaurantCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("Restaurant name required".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            cuisine_type: params.cuisine_type,
            rating: 0.0,
            preparation_time: params.preparation_time,
            image_url: params.image_url,
            is_open: params.is_open,
            address: params.address,
        })
    }

    fn matches(&self, filter: &RestaurantFilter) -> bool {
        if filter.open_only && !self.is_open {
            return false;
        }
        match &filter.cuisine_type {
            Some(cuisine) => self.cuisine_type.as_deref() == Some(cuisine.as_str()),
            None => true,
        }
    }

    /// # Errors
    /// Ratings must be within 0..=5.
    fn on_update(&mut self, patch: RestaurantPatch) -> Result<(), String> {
        if let Some(rating) = patch.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(format!("Rating must be between 0 and {MAX_RATING}, got {rating}"));
            }
            self.rating = rating;
        }
        if let Some(is_open) = patch.is_open {
            self.is_open = is_open;
        }
        if let Some(minutes) = patch.preparation_time {
            self.preparation_time = minutes;
        }
        Ok(())
    }
}
