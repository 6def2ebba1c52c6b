use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::dish_actor::{DishCreate, DishError, DishFilter, DishPatch};
use crate::domain::Dish;

/// Client for the dishes table.
#[derive(Clone)]
pub struct DishClient {
    inner: ResourceClient<Dish>,
}

impl_basic_client!(DishClient, Dish, DishError, dish, dishes);

impl DishClient {
    /// Inserts a whole menu at once; either every dish is stored or none is.
    #[instrument(skip(self, payloads), fields(count = payloads.len()))]
    pub async fn create_dishes(&self, payloads: Vec<DishCreate>) -> Result<Vec<String>, DishError> {
        debug!("Sending request");
        self.inner.create_batch(payloads).await.map_err(DishError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_dish(&self, id: String, patch: DishPatch) -> Result<Dish, DishError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(DishError::from)
    }

    pub async fn dishes_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<Dish>, DishError> {
        self.list_dishes(DishFilter::for_restaurant(restaurant_id)).await
    }
}
