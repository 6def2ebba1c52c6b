use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::cart_store::{CartRepository, CartStore, FileStorage, MemoryStorage};
use crate::clients::{DishClient, OrderClient, RestaurantClient, UserClient};
use crate::config::Config;
use crate::domain::{Dish, Order, Restaurant, User};

fn next_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Starts one resource actor per backend table and wires the clients together.
pub struct StorefrontSystem {
    pub user_client: UserClient,
    pub restaurant_client: RestaurantClient,
    pub dish_client: DishClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    pub fn start(actor_buffer: usize) -> Self {
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(actor_buffer, next_uuid);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let (restaurant_actor, restaurant_resource_client) =
            ResourceActor::<Restaurant>::new(actor_buffer, next_uuid);
        let restaurant_client = RestaurantClient::new(restaurant_resource_client);
        let restaurant_handle = tokio::spawn(restaurant_actor.run());

        let (dish_actor, dish_resource_client) = ResourceActor::<Dish>::new(actor_buffer, next_uuid);
        let dish_client = DishClient::new(dish_resource_client);
        let dish_handle = tokio::spawn(dish_actor.run());

        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(actor_buffer, next_uuid);
        let order_client = OrderClient::new(order_resource_client, restaurant_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        info!(actor_buffer, "Storefront actors started");
        Self {
            user_client,
            restaurant_client,
            dish_client,
            order_client,
            handles: vec![user_handle, restaurant_handle, dish_handle, order_handle],
        }
    }

    /// Drops every client held here and waits for the actors to stop. Clones
    /// handed out earlier (e.g. to a [`crate::app_system::Storefront`]) must be
    /// dropped first or this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.dish_client);
        drop(self.restaurant_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

/// File-backed cart when a directory is configured, otherwise in memory.
pub fn cart_repository(config: &Config) -> Arc<dyn CartRepository> {
    match &config.cart_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Cart stored on disk");
            Arc::new(CartStore::new(FileStorage::new(dir)))
        }
        None => Arc::new(CartStore::new(MemoryStorage::new())),
    }
}
