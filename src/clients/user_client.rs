use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserCreate, UserFilter, UserPatch};
use crate::user_actor::UserError;

/// Client for the profiles table.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, payload: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(UserError::from)
    }

    /// Case-insensitive lookup by email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let filter = UserFilter {
            email: Some(email.trim().to_string()),
            role: None,
        };
        let users = self.inner.list(filter).await.map_err(UserError::from)?;
        Ok(users.into_iter().next())
    }
}
