use rust_decimal::Decimal;

/// A menu item offered by one restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_vegetarian: bool,
    /// 0 means not spicy.
    pub spice_level: u8,
    pub calories: Option<u32>,
    pub category: String,
    pub allergens: Vec<String>,
}

impl Dish {
    pub fn is_spicy(&self) -> bool {
        self.spice_level > 0
    }
}
