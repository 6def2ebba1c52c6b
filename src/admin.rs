//! Admin dashboard figures.

use std::fmt;

use crate::clients::{DishClient, OrderClient, RestaurantClient, UserClient};
use crate::app_system::StorefrontError;

/// Row counts per backend table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub restaurants: usize,
    pub dishes: usize,
    pub orders: usize,
    pub users: usize,
}

impl DashboardStats {
    pub async fn collect(
        restaurants: &RestaurantClient,
        dishes: &DishClient,
        orders: &OrderClient,
        users: &UserClient,
    ) -> Result<Self, StorefrontError> {
        Ok(Self {
            restaurants: restaurants.count_restaurants().await?,
            dishes: dishes.count_dishes().await?,
            orders: orders.count_orders().await?,
            users: users.count_users().await?,
        })
    }
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "restaurants={} dishes={} orders={} users={}",
            self.restaurants, self.dishes, self.orders, self.users
        )
    }
}
