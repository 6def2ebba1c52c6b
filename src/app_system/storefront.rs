use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::admin::DashboardStats;
use crate::cart_store::CartRepository;
use crate::catalog::{self, MenuView};
use crate::checkout::{CheckoutRequest, CheckoutService, PlacedOrder};
use crate::clients::{DishClient, OrderClient, RestaurantClient, UserClient};
use crate::dish_actor::DishError;
use crate::domain::{Cart, Dish, Restaurant, User, UserPatch, UserRole};
use crate::history::OrderView;
use crate::pricing::PriceSummary;
use crate::restaurant_actor::{RestaurantError, RestaurantFilter};
use crate::session::{Identity, Session};
use crate::user_actor::UserError;

use super::{StorefrontError, StorefrontSystem};

/// Everything a customer screen can do, on top of the backend clients and the
/// local cart.
#[derive(Clone)]
pub struct Storefront {
    users: UserClient,
    restaurants: RestaurantClient,
    dishes: DishClient,
    orders: OrderClient,
    carts: Arc<dyn CartRepository>,
    session: Session,
    checkout: CheckoutService,
}

impl Storefront {
    pub fn new(
        users: UserClient,
        restaurants: RestaurantClient,
        dishes: DishClient,
        orders: OrderClient,
        carts: Arc<dyn CartRepository>,
    ) -> Self {
        let session = Session::new(users.clone());
        let checkout = CheckoutService::new(session.clone(), carts.clone(), orders.clone());
        Self {
            users,
            restaurants,
            dishes,
            orders,
            carts,
            session,
            checkout,
        }
    }

    pub fn from_system(system: &StorefrontSystem, carts: Arc<dyn CartRepository>) -> Self {
        Self::new(
            system.user_client.clone(),
            system.restaurant_client.clone(),
            system.dish_client.clone(),
            system.order_client.clone(),
            carts,
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn sign_in(&self, email: &str) -> Result<Identity, StorefrontError> {
        Ok(self.session.sign_in(email).await?)
    }

    pub async fn sign_out(&self) {
        self.session.sign_out().await
    }

    // --- Catalog ---

    pub async fn featured_restaurants(&self) -> Result<Vec<Restaurant>, StorefrontError> {
        let filter = RestaurantFilter {
            open_only: true,
            ..Default::default()
        };
        let open = self.restaurants.list_restaurants(filter).await?;
        Ok(catalog::featured(open))
    }

    /// Restaurants matching a text query and a cuisine (`"all"` or `None` for any).
    #[instrument(skip(self))]
    pub async fn browse_restaurants(
        &self,
        query: &str,
        cuisine: Option<&str>,
    ) -> Result<Vec<Restaurant>, StorefrontError> {
        let rows = self.restaurants.list_restaurants(RestaurantFilter::default()).await?;
        let matches = catalog::search_restaurants(&rows, query);
        Ok(catalog::filter_by_cuisine(matches, cuisine)
            .into_iter()
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn restaurant_menu(&self, restaurant_id: &str) -> Result<MenuView, StorefrontError> {
        let restaurant = self
            .restaurants
            .get_restaurant(restaurant_id.to_string())
            .await?
            .ok_or_else(|| RestaurantError::NotFound(restaurant_id.to_string()))?;
        let dishes = self.dishes.dishes_for_restaurant(restaurant_id).await?;
        Ok(MenuView::new(restaurant, dishes))
    }

    pub async fn search_menu(&self, restaurant_id: &str, query: &str) -> Result<Vec<Dish>, StorefrontError> {
        let dishes = self.dishes.dishes_for_restaurant(restaurant_id).await?;
        Ok(catalog::search_dishes(&dishes, query).into_iter().cloned().collect())
    }

    // --- Cart ---

    pub fn cart(&self) -> Cart {
        self.carts.load()
    }

    pub fn cart_summary(&self) -> PriceSummary {
        self.carts.load().summary()
    }

    async fn find_dish(&self, dish_id: &str) -> Result<Dish, StorefrontError> {
        Ok(self
            .dishes
            .get_dish(dish_id.to_string())
            .await?
            .ok_or_else(|| DishError::NotFound(dish_id.to_string()))?)
    }

    /// Adds one of `dish_id`, or bumps its quantity if it is already in the cart.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, dish_id: &str) -> Result<Cart, StorefrontError> {
        self.session.current().await?;
        let dish = self.find_dish(dish_id).await?;
        let cart = self.carts.load().add_or_increment(&dish).map_err(|e| {
            warn!(error = %e, "Add to cart refused");
            e
        })?;
        self.carts.save(&cart)?;
        info!(items = cart.item_count(), "Cart updated");
        Ok(cart)
    }

    /// Starts a new cart holding only `dish_id`; used to switch restaurants.
    /// The old cart stays in place if the new one cannot be saved.
    #[instrument(skip(self))]
    pub async fn replace_cart_with(&self, dish_id: &str) -> Result<Cart, StorefrontError> {
        self.session.current().await?;
        let dish = self.find_dish(dish_id).await?;
        let cart = Cart::new().add_or_increment(&dish)?;
        self.carts.save(&cart)?;
        info!(restaurant_id = %dish.restaurant_id, "Cart replaced");
        Ok(cart)
    }

    #[instrument(skip(self))]
    pub async fn change_quantity(&self, dish_id: &str, delta: i64) -> Result<Cart, StorefrontError> {
        self.session.current().await?;
        let cart = self.carts.load().change_quantity(dish_id, delta);
        self.carts.save(&cart)?;
        Ok(cart)
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, dish_id: &str) -> Result<Cart, StorefrontError> {
        self.session.current().await?;
        let cart = self.carts.load().remove_line(dish_id);
        self.carts.save(&cart)?;
        Ok(cart)
    }

    // --- Orders ---

    pub async fn checkout(&self, request: CheckoutRequest) -> Result<PlacedOrder, StorefrontError> {
        Ok(self.checkout.submit(request).await?)
    }

    /// The signed-in user's orders, newest first, with restaurant and dish names.
    #[instrument(skip(self))]
    pub async fn order_history(&self) -> Result<Vec<OrderView>, StorefrontError> {
        let identity = self.session.current().await?;
        let orders = self.orders.orders_for_user(&identity.user_id).await?;

        let restaurant_ids: HashSet<&str> = orders.iter().map(|o| o.restaurant_id.as_str()).collect();
        let mut restaurants = HashMap::new();
        let mut dishes = HashMap::new();
        for id in restaurant_ids {
            if let Some(restaurant) = self.restaurants.get_restaurant(id.to_string()).await? {
                restaurants.insert(id.to_string(), restaurant);
            }
            for dish in self.dishes.dishes_for_restaurant(id).await? {
                dishes.insert(dish.id.clone(), dish);
            }
        }

        Ok(orders
            .iter()
            .map(|order| OrderView::build(order, restaurants.get(&order.restaurant_id), &dishes))
            .collect())
    }

    // --- Profile & admin ---

    pub async fn profile(&self) -> Result<User, StorefrontError> {
        let identity = self.session.current().await?;
        let user = self
            .users
            .get_user(identity.user_id.clone())
            .await?
            .ok_or(UserError::NotFound(identity.user_id))?;
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> Result<User, StorefrontError> {
        let identity = self.session.current().await?;
        let patch = UserPatch { full_name, phone };
        Ok(self.users.update_profile(identity.user_id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn admin_dashboard(&self) -> Result<DashboardStats, StorefrontError> {
        self.session.require_role(UserRole::Admin).await?;
        DashboardStats::collect(&self.restaurants, &self.dishes, &self.orders, &self.users).await
    }
}
