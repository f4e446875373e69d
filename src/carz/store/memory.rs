use super::{DataStore, StoreKey};
use crate::error::{CarzError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: HashMap<&'static str, String>,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw (possibly malformed) value.
    pub fn with_raw(mut self, key: StoreKey, raw: &str) -> Self {
        self.values.insert(key.file_name(), raw.to_string());
        self
    }

    /// Every subsequent write fails, as a full or unavailable disk would.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn set_failing_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: StoreKey) -> Option<String> {
        self.values.get(key.file_name()).cloned()
    }
}

impl DataStore for InMemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(CarzError::Persistence(format!(
                "{}: storage unavailable",
                key.label()
            )));
        }
        self.values.insert(key.file_name(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Car, Favorites, PackStatus};
    use crate::store::{save_collection, save_favorites};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        cars: Vec<Car>,
        favorites: Favorites,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                cars: Vec::new(),
                favorites: Favorites::new(),
            }
        }

        pub fn with_cars(mut self, count: usize) -> Self {
            for i in 0..count {
                let car = Car::new(
                    format!("Test Car {}", i + 1),
                    (i as i64 + 1) * 100,
                    format!("https://img.example/{}.png", i + 1),
                );
                self.cars.push(car);
            }
            self
        }

        pub fn with_car(mut self, name: &str, value: i64, status: PackStatus) -> Self {
            self.cars
                .push(Car::new(name, value, "https://img.example/car.png").with_pack_status(status));
            self
        }

        pub fn with_favorite_car(mut self, name: &str) -> Self {
            let car = Car::new(name, 100, "https://img.example/fav.png");
            self.favorites.insert(car.id);
            self.cars.push(car);
            self
        }

        pub fn build(mut self) -> InMemoryStore {
            save_collection(&mut self.store, &self.cars).unwrap();
            save_favorites(&mut self.store, &self.favorites).unwrap();
            self.store
        }
    }
}
