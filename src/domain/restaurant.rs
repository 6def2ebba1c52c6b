/// A campus food outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub rating: f32,
    /// Typical preparation time in minutes.
    pub preparation_time: u32,
    pub image_url: Option<String>,
    pub is_open: bool,
    pub address: String,
}

impl Restaurant {
    /// Label shown on the restaurant header.
    pub fn availability_label(&self) -> &'static str {
        if self.is_open {
            "Open Now"
        } else {
            "Closed"
        }
    }
}
