//! Demo data for a fresh in-process backend.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::dish_actor::DishCreate;
use crate::domain::{UserCreate, UserRole};
use crate::restaurant_actor::RestaurantCreate;

use super::{StorefrontError, StorefrontSystem};

pub const DEMO_STUDENT_EMAIL: &str = "asha@campus.edu";
pub const DEMO_ADMIN_EMAIL: &str = "admin@campus.edu";

/// Ids of the seeded rows, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SeededCatalog {
    pub restaurant_ids: Vec<String>,
    pub dish_ids: Vec<Vec<String>>,
    pub user_ids: Vec<String>,
}

struct MenuItem {
    name: &'static str,
    description: &'static str,
    price: Decimal,
    category: &'static str,
    is_vegetarian: bool,
    spice_level: u8,
    calories: u32,
    allergens: &'static [&'static str],
}

#[allow(clippy::too_many_arguments)]
fn item(
    name: &'static str,
    description: &'static str,
    price: Decimal,
    category: &'static str,
    is_vegetarian: bool,
    spice_level: u8,
    calories: u32,
    allergens: &'static [&'static str],
) -> MenuItem {
    MenuItem {
        name,
        description,
        price,
        category,
        is_vegetarian,
        spice_level,
        calories,
        allergens,
    }
}

fn restaurant(name: &str, cuisine: &str, description: &str, address: &str, prep: u32) -> RestaurantCreate {
    RestaurantCreate {
        name: name.to_string(),
        description: Some(description.to_string()),
        cuisine_type: Some(cuisine.to_string()),
        preparation_time: prep,
        image_url: None,
        is_open: true,
        address: address.to_string(),
    }
}

fn menu(restaurant_id: &str, items: Vec<MenuItem>) -> Vec<DishCreate> {
    items
        .into_iter()
        .map(|i| DishCreate {
            restaurant_id: restaurant_id.to_string(),
            name: i.name.to_string(),
            description: Some(i.description.to_string()),
            price: i.price,
            image_url: None,
            is_vegetarian: i.is_vegetarian,
            spice_level: i.spice_level,
            calories: Some(i.calories),
            category: i.category.to_string(),
            allergens: i.allergens.iter().map(|a| a.to_string()).collect(),
        })
        .collect()
}

/// Inserts two restaurants with menus, a student and an admin.
#[instrument(skip(system))]
pub async fn seed_demo_catalog(system: &StorefrontSystem) -> Result<SeededCatalog, StorefrontError> {
    let mut seeded = SeededCatalog::default();

    let spice_route = system
        .restaurant_client
        .create_restaurant(restaurant(
            "Spice Route",
            "Indian",
            "North Indian curries and tandoor",
            "Student Union, Ground Floor",
            20,
        ))
        .await?;
    let dishes = system
        .dish_client
        .create_dishes(menu(
            &spice_route,
            vec![
                item("Paneer Tikka", "Char-grilled cottage cheese", Decimal::new(18000, 2), "Starters", true, 2, 420, &["dairy"]),
                item("Veg Samosa", "Crisp pastry with spiced potato", Decimal::new(3000, 2), "Starters", true, 1, 260, &["gluten"]),
                item("Dal Makhani", "Slow-cooked black lentils", Decimal::new(15000, 2), "Mains", true, 1, 510, &["dairy"]),
                item("Naan", "Tandoor flatbread", Decimal::new(4000, 2), "Breads", true, 0, 260, &["gluten", "dairy"]),
            ],
        ))
        .await?;
    seeded.restaurant_ids.push(spice_route);
    seeded.dish_ids.push(dishes);

    let noodle_bar = system
        .restaurant_client
        .create_restaurant(restaurant(
            "Noodle Bar",
            "Chinese",
            "Wok-tossed noodles and dumplings",
            "Library Annex",
            15,
        ))
        .await?;
    let dishes = system
        .dish_client
        .create_dishes(menu(
            &noodle_bar,
            vec![
                item("Hakka Noodles", "Wok-tossed with vegetables", Decimal::new(12000, 2), "Mains", true, 1, 480, &["gluten", "soy"]),
                item("Chilli Chicken", "Crisp chicken in chilli sauce", Decimal::new(16000, 2), "Mains", false, 3, 560, &["soy"]),
                item("Veg Momos", "Steamed dumplings", Decimal::new(9000, 2), "Starters", true, 0, 300, &["gluten"]),
            ],
        ))
        .await?;
    seeded.restaurant_ids.push(noodle_bar);
    seeded.dish_ids.push(dishes);

    for payload in [
        UserCreate::student("Asha Rao", DEMO_STUDENT_EMAIL),
        UserCreate::student("Campus Admin", DEMO_ADMIN_EMAIL).with_role(UserRole::Admin),
    ] {
        seeded.user_ids.push(system.user_client.create_user(payload).await?);
    }

    info!(
        restaurants = seeded.restaurant_ids.len(),
        users = seeded.user_ids.len(),
        "Demo catalog seeded"
    );
    Ok(seeded)
}
