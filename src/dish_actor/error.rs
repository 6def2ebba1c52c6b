use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DishError {
    #[error("Dish not found: {0}")]
    NotFound(String),
    #[error("Dish validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for DishError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => DishError::NotFound(id),
            FrameworkError::Rejected(msg) => DishError::ValidationError(msg),
            other => DishError::ActorCommunicationError(other.to_string()),
        }
    }
}
