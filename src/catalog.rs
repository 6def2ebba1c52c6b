//! Browsing helpers that run over already-fetched catalog rows.

use crate::domain::{Dish, Restaurant};

/// Cuisine value that turns the cuisine filter off.
pub const ALL_CUISINES: &str = "all";

/// Number of restaurants shown on the home screen.
pub const FEATURED_LIMIT: usize = 6;

fn matches_text(name: &str, description: Option<&str>, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
        || description.is_some_and(|d| d.to_lowercase().contains(needle))
}

/// Case-insensitive substring match over name and description.
/// A blank query matches everything.
pub fn search_restaurants<'a>(restaurants: &'a [Restaurant], query: &str) -> Vec<&'a Restaurant> {
    let needle = query.trim().to_lowercase();
    restaurants
        .iter()
        .filter(|r| matches_text(&r.name, r.description.as_deref(), &needle))
        .collect()
}

/// Normalizes a cuisine selector: `None` and `"all"` both mean no filter.
fn cuisine_selector(cuisine: Option<&str>) -> Option<&str> {
    cuisine.filter(|c| !c.eq_ignore_ascii_case(ALL_CUISINES))
}

/// Exact match on cuisine type.
pub fn filter_by_cuisine<'a>(restaurants: Vec<&'a Restaurant>, cuisine: Option<&str>) -> Vec<&'a Restaurant> {
    match cuisine_selector(cuisine) {
        None => restaurants,
        Some(cuisine) => restaurants
            .into_iter()
            .filter(|r| r.cuisine_type.as_deref() == Some(cuisine))
            .collect(),
    }
}

pub fn search_dishes<'a>(dishes: &'a [Dish], query: &str) -> Vec<&'a Dish> {
    let needle = query.trim().to_lowercase();
    dishes
        .iter()
        .filter(|d| matches_text(&d.name, d.description.as_deref(), &needle))
        .collect()
}

/// Dishes sharing a category, in menu order.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub category: String,
    pub dishes: Vec<Dish>,
}

/// Groups dishes by category. Categories appear in the order they are first
/// seen, and dishes keep their relative order.
pub fn group_by_category<I>(dishes: I) -> Vec<MenuSection>
where
    I: IntoIterator<Item = Dish>,
{
    let mut sections: Vec<MenuSection> = Vec::new();
    for dish in dishes {
        match sections.iter_mut().find(|s| s.category == dish.category) {
            Some(section) => section.dishes.push(dish),
            None => sections.push(MenuSection {
                category: dish.category.clone(),
                dishes: vec![dish],
            }),
        }
    }
    sections
}

/// Restaurant header plus its menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub restaurant: Restaurant,
    pub sections: Vec<MenuSection>,
}

impl MenuView {
    pub fn new(restaurant: Restaurant, dishes: Vec<Dish>) -> Self {
        Self {
            restaurant,
            sections: group_by_category(dishes),
        }
    }

    pub fn dish(&self, dish_id: &str) -> Option<&Dish> {
        self.sections
            .iter()
            .flat_map(|s| s.dishes.iter())
            .find(|d| d.id == dish_id)
    }
}

/// Open restaurants for the home screen, at most [`FEATURED_LIMIT`].
pub fn featured(restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|r| r.is_open)
        .take(FEATURED_LIMIT)
        .collect()
}
