//! # Storage Layer
//!
//! Persistence is abstracted behind the [`DataStore`] trait so the rest of the
//! crate never touches files directly.
//!
//! ## Persisted State
//!
//! Three independent keyed values, each a JSON document:
//!
//! ```text
//! <data dir>/
//! ├── collection.json     # array of cars, in insertion order
//! ├── favorites.json      # array of car ids (strings)
//! └── preferences.json    # "enabled" / "disabled" (dark mode)
//! ```
//!
//! Each save fully overwrites its value. There is no transaction spanning the
//! collection and the favorites, so a crash between two writes can leave them
//! out of step; orphaned favorites are inert and `doctor` prunes them.
//!
//! ## Fail-Soft Loading
//!
//! [`load`] never fails. A missing value is empty, an unreadable or malformed
//! one is logged and treated as empty. Writes, on the other hand, surface
//! [`CarzError::Persistence`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage in one directory
//! - [`memory::InMemoryStore`]: raw strings in memory, for tests

use crate::error::{CarzError, Result};
use crate::model::{Car, Favorites};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// The independently persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Collection,
    Favorites,
    Preferences,
}

impl StoreKey {
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKey::Collection => "collection.json",
            StoreKey::Favorites => "favorites.json",
            StoreKey::Preferences => "preferences.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoreKey::Collection => "collection",
            StoreKey::Favorites => "favorites",
            StoreKey::Preferences => "preferences",
        }
    }
}

/// Abstract interface for the persistence surface.
///
/// Implementations store opaque strings per key; (de)serialization lives in
/// this module so every backend shares the same format and failure policy.
pub trait DataStore {
    /// Read the raw value for `key`, `None` when nothing was stored yet.
    fn read(&self, key: StoreKey) -> Result<Option<String>>;

    /// Overwrite the raw value for `key`.
    fn write(&mut self, key: StoreKey, value: &str) -> Result<()>;
}

/// Display preferences consumed by rendering surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Preferences {
    pub dark_mode: bool,
}

impl From<String> for Preferences {
    fn from(raw: String) -> Self {
        Self {
            dark_mode: raw == "enabled",
        }
    }
}

impl From<Preferences> for String {
    fn from(prefs: Preferences) -> Self {
        let raw = if prefs.dark_mode { "enabled" } else { "disabled" };
        raw.to_string()
    }
}

/// Everything read at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub collection: Vec<Car>,
    pub favorites: Favorites,
    pub preferences: Preferences,
    /// Records that had no usable id and were given one while loading. Until
    /// the collection is saved again those ids exist only in memory.
    pub assigned_ids: usize,
}

pub fn load<S: DataStore>(store: &S) -> Loaded {
    let (collection, assigned_ids) = load_collection(store);
    Loaded {
        collection,
        favorites: load_value(store, StoreKey::Favorites),
        preferences: load_value(store, StoreKey::Preferences),
        assigned_ids,
    }
}

pub fn save_collection<S: DataStore>(store: &mut S, collection: &[Car]) -> Result<()> {
    save_value(store, StoreKey::Collection, collection)
}

pub fn save_favorites<S: DataStore>(store: &mut S, favorites: &Favorites) -> Result<()> {
    save_value(store, StoreKey::Favorites, favorites)
}

pub fn save_preferences<S: DataStore>(store: &mut S, preferences: &Preferences) -> Result<()> {
    save_value(store, StoreKey::Preferences, preferences)
}

fn load_value<S: DataStore, T: DeserializeOwned + Default>(store: &S, key: StoreKey) -> T {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key = key.label(), error = %e, "could not read stored value, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key.label(), error = %e, "stored value is malformed, starting empty");
            T::default()
        }
    }
}

/// Loads the collection record by record, so one unusable entry costs only
/// itself and not the whole array.
fn load_collection<S: DataStore>(store: &S) -> (Vec<Car>, usize) {
    let records: Vec<Value> = load_value(store, StoreKey::Collection);
    let mut cars = Vec::with_capacity(records.len());
    let mut assigned = 0;

    for (position, mut record) in records.into_iter().enumerate() {
        let has_id = record
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| Uuid::parse_str(id).is_ok());
        if !has_id {
            if let Some(fields) = record.as_object_mut() {
                fields.remove("id");
            }
        }

        match serde_json::from_value::<Car>(record) {
            Ok(car) => {
                if !has_id {
                    assigned += 1;
                }
                cars.push(car);
            }
            Err(e) => {
                tracing::warn!(position, error = %e, "skipping unreadable car record");
            }
        }
    }
    (cars, assigned)
}

fn save_value<S: DataStore, T: Serialize + ?Sized>(
    store: &mut S,
    key: StoreKey,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|e| CarzError::Persistence(format!("{}: {}", key.label(), e)))?;
    store.write(key, &raw).map_err(|e| match e {
        CarzError::Persistence(_) => e,
        other => CarzError::Persistence(format!("{}: {}", key.label(), other)),
    })?;
    tracing::debug!(key = key.label(), bytes = raw.len(), "saved");
    Ok(())
}
