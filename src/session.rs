//! Signed-in identity for the current storefront session.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::UserRole;
use crate::user_actor::UserError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Please sign in to continue")]
    NotSignedIn,
    #[error("This page requires the {0} role")]
    Forbidden(UserRole),
    #[error("No account found for {0}")]
    UnknownUser(String),
    #[error("Profile lookup failed: {0}")]
    Lookup(#[from] UserError),
}

/// Shared handle to the current identity. Clones see the same sign-in state.
#[derive(Clone)]
pub struct Session {
    users: UserClient,
    identity: Arc<RwLock<Option<Identity>>>,
}

impl Session {
    pub fn new(users: UserClient) -> Self {
        Self {
            users,
            identity: Arc::new(RwLock::new(None)),
        }
    }

    /// Looks the profile up by email and makes it the current identity.
    #[instrument(skip(self))]
    pub async fn sign_in(&self, email: &str) -> Result<Identity, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Sign-in for unknown account");
            return Err(AuthError::UnknownUser(email.to_string()));
        };

        let identity = Identity {
            user_id: user.id,
            role: user.role,
        };
        *self.identity.write().await = Some(identity.clone());
        info!(user_id = %identity.user_id, role = %identity.role, "Signed in");
        Ok(identity)
    }

    pub async fn sign_out(&self) {
        if self.identity.write().await.take().is_some() {
            info!("Signed out");
        }
    }

    pub async fn current(&self) -> Result<Identity, AuthError> {
        self.identity.read().await.clone().ok_or(AuthError::NotSignedIn)
    }

    pub async fn require_role(&self, role: UserRole) -> Result<Identity, AuthError> {
        let identity = self.current().await?;
        if identity.role != role {
            warn!(user_id = %identity.user_id, required = %role, "Role check failed");
            return Err(AuthError::Forbidden(role));
        }
        Ok(identity)
    }
}
