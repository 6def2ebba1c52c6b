use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::Restaurant;
use crate::restaurant_actor::{RestaurantCreate, RestaurantError, RestaurantPatch};

/// Client for the restaurants table.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl_basic_client!(RestaurantClient, Restaurant, RestaurantError, restaurant, restaurants);

impl RestaurantClient {
    #[instrument(skip(self))]
    pub async fn create_restaurant(&self, payload: RestaurantCreate) -> Result<String, RestaurantError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(RestaurantError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        id: String,
        patch: RestaurantPatch,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(RestaurantError::from)
    }

    pub async fn set_open(&self, id: String, is_open: bool) -> Result<Restaurant, RestaurantError> {
        let patch = RestaurantPatch {
            is_open: Some(is_open),
            ..Default::default()
        };
        self.update_restaurant(id, patch).await
    }
}
