use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Admin,
    RestaurantPartner,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Student => "student",
            UserRole::Admin => "admin",
            UserRole::RestaurantPartner => "restaurant_partner",
        };
        f.write_str(label)
    }
}

/// A registered user's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub wallet_balance: Decimal,
    pub reward_points: u32,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Payload for updating an existing profile.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// Row filter for user queries. Email matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UserCreate {
    /// A student account with no phone number on file.
    pub fn student(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            role: UserRole::Student,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}
