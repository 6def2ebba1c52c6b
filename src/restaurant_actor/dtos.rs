// DTOs for Restaurant
#[derive(Debug, Clone)]
pub struct RestaurantCreate {
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub preparation_time: u32,
    pub image_url: Option<String>,
    pub is_open: bool,
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantPatch {
    pub is_open: Option<bool>,
    pub rating: Option<f32>,
    pub preparation_time: Option<u32>,
}

/// Backend-side filter. Search by text happens over the fetched rows.
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    /// Exact match on cuisine type.
    pub cuisine_type: Option<String>,
    pub open_only: bool,
}
