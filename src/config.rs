//! Runtime configuration from the environment (and `.env`, if present).

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

pub const CART_DIR_VAR: &str = "CAMPUS_EATS_CART_DIR";
pub const ACTOR_BUFFER_VAR: &str = "CAMPUS_EATS_ACTOR_BUFFER";
pub const DEFAULT_ACTOR_BUFFER: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory for the cart file. `None` keeps the cart in memory.
    pub cart_dir: Option<PathBuf>,
    /// Mailbox size of each resource actor.
    pub actor_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cart_dir: None,
            actor_buffer: DEFAULT_ACTOR_BUFFER,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            info!("No .env file loaded: {e}");
        }
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cart_dir = match lookup(CART_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => Some(PathBuf::from(dir)),
            None => {
                warn!("{CART_DIR_VAR} not set, cart will not survive restarts");
                None
            }
        };
        let actor_buffer = try_load(&lookup, ACTOR_BUFFER_VAR, DEFAULT_ACTOR_BUFFER)?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: ACTOR_BUFFER_VAR,
                value: "0".to_string(),
                reason: "mailbox size must be positive".to_string(),
            });
        }

        Ok(Self {
            cart_dir,
            actor_buffer,
        })
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
