//! Durable storage for the local cart.
//!
//! The cart lives in a single string slot (`"cart"`) of a key-value storage,
//! serialized as a versioned JSON envelope. Reads never fail: an absent,
//! unreadable, legacy or future-version value is treated as an empty cart.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::{Cart, CartLine};

pub const CART_KEY: &str = "cart";
pub const CART_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("Cart storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String-keyed storage slots that survive restarts.
pub trait KeyValueStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CartStoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CartStoreError>;
    fn remove(&self, key: &str) -> Result<(), CartStoreError>;
}

/// Process-local storage, used by tests and when no cart directory is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartStoreError> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartStoreError> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CartStoreError> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory. Writes go through a temp file
/// and a rename so a crash never leaves a half-written slot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartStoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartStoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CartStoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Typed access to the persisted cart.
pub trait CartRepository: Send + Sync {
    /// Never fails; unusable stored data reads as an empty cart.
    fn load(&self) -> Cart;
    fn save(&self, cart: &Cart) -> Result<(), CartStoreError>;
    fn clear(&self) -> Result<(), CartStoreError>;
}

#[derive(Serialize, Deserialize)]
struct CartEnvelope {
    version: u32,
    lines: Vec<CartLine>,
}

/// [`CartRepository`] over any [`KeyValueStorage`].
#[derive(Debug, Default)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn decode(raw: &str) -> Option<Cart> {
        let envelope: CartEnvelope = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "Stored cart is unreadable, starting empty");
                return None;
            }
        };
        if envelope.version != CART_SCHEMA_VERSION {
            warn!(version = envelope.version, "Unsupported cart version, starting empty");
            return None;
        }
        let cart = Cart::from_lines(envelope.lines);
        if cart.is_none() {
            warn!("Stored cart breaks cart invariants, starting empty");
        }
        cart
    }
}

impl<S: KeyValueStorage> CartRepository for CartStore<S> {
    #[instrument(name = "cart_load", skip(self))]
    fn load(&self) -> Cart {
        let raw = match self.storage.read(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(error = %e, "Cart storage unreadable, starting empty");
                return Cart::new();
            }
        };
        let cart = Self::decode(&raw).unwrap_or_default();
        debug!(lines = cart.lines().len(), "Cart loaded");
        cart
    }

    #[instrument(name = "cart_save", skip(self, cart), fields(lines = cart.lines().len()))]
    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let envelope = CartEnvelope {
            version: CART_SCHEMA_VERSION,
            lines: cart.lines().to_vec(),
        };
        let raw = serde_json::to_string(&envelope)?;
        self.storage.write(CART_KEY, &raw)?;
        debug!("Cart saved");
        Ok(())
    }

    #[instrument(name = "cart_clear", skip(self))]
    fn clear(&self) -> Result<(), CartStoreError> {
        self.storage.remove(CART_KEY)?;
        debug!("Cart cleared");
        Ok(())
    }
}
