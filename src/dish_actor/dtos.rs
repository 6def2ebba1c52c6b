use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct DishCreate {
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub spice_level: u8,
    pub calories: Option<u32>,
    pub category: String,
    pub allergens: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DishPatch {
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct DishFilter {
    pub restaurant_id: Option<String>,
    pub available_only: bool,
}

impl DishFilter {
    pub fn for_restaurant(restaurant_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: Some(restaurant_id.into()),
            available_only: false,
        }
    }
}
