use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserFilter, UserPatch};

impl Entity for User {
    const NAME: &'static str = "profiles";

    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Filter = UserFilter;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new profile. New accounts start with an empty wallet and no
    /// reward points.
    ///
    /// # Errors
    /// Rejects a blank name or an email without `@`.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, String> {
        if params.full_name.trim().is_empty() {
            return Err("Full name required".to_string());
        }
        if !params.email.contains('@') {
            return Err(format!("Invalid email: {}", params.email));
        }
        Ok(Self {
            id,
            full_name: params.full_name.trim().to_string(),
            email: params.email.trim().to_lowercase(),
            phone: params.phone.filter(|p| !p.trim().is_empty()),
            role: params.role,
            wallet_balance: Decimal::ZERO,
            reward_points: 0,
        })
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        let email_ok = filter
            .email
            .as_deref()
            .map_or(true, |email| self.email.eq_ignore_ascii_case(email.trim()));
        let role_ok = filter.role.map_or(true, |role| self.role == role);
        email_ok && role_ok
    }

    /// Updates the editable profile fields. An empty phone clears it.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.full_name {
            if name.trim().is_empty() {
                return Err("Full name required".to_string());
            }
            self.full_name = name.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone.trim().to_string()).filter(|p| !p.is_empty());
        }
        Ok(())
    }
}
