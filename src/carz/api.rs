//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every operation, whatever UI drives it.
//!
//! ## The Context Object
//!
//! [`CarzApi`] owns everything a session needs: the storage backend, the
//! loaded collection, favorites and preferences, the edit session and the
//! configuration. Nothing lives in globals, so several independent collections
//! can be open in the same process.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (user positions "1", "2-4" to 0-based indexes)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! No business logic, no printing. Every mutation persists before it returns,
//! so the state seen through the accessors always matches what is stored.

use crate::commands::{self, CmdResult, CollectionState};
use crate::config::CarzConfig;
use crate::error::{CarzError, Result};
use crate::index::parse_indexes;
use crate::model::{Car, CarForm, Favorites};
use crate::session::EditSession;
use crate::store::{self, DataStore, Preferences};
use crate::view::{SortKey, ViewFilter};
use std::path::PathBuf;

pub struct CarzApi<S: DataStore> {
    store: S,
    state: CollectionState,
    config: CarzConfig,
    config_dir: PathBuf,
}

impl<S: DataStore> CarzApi<S> {
    /// Loads the persisted state. Missing or malformed data starts empty.
    ///
    /// Records stored without an id get one here, and the collection is
    /// written back at once so favorites taken on them survive a restart.
    pub fn open(mut store: S, config: CarzConfig, config_dir: impl Into<PathBuf>) -> Self {
        let loaded = store::load(&store);
        if loaded.assigned_ids > 0 {
            match store::save_collection(&mut store, &loaded.collection) {
                Ok(()) => tracing::info!(count = loaded.assigned_ids, "assigned ids to stored cars"),
                Err(e) => tracing::warn!(error = %e, "could not save newly assigned car ids"),
            }
        }
        let state = CollectionState::from(loaded);
        tracing::info!(
            cars = state.cars.len(),
            favorites = state.favorites.len(),
            "collection loaded"
        );
        Self {
            store,
            state,
            config,
            config_dir: config_dir.into(),
        }
    }

    pub fn cars(&self) -> &[Car] {
        &self.state.cars
    }

    pub fn favorites(&self) -> &Favorites {
        &self.state.favorites
    }

    pub fn preferences(&self) -> Preferences {
        self.state.preferences
    }

    pub fn session(&self) -> EditSession {
        self.state.session
    }

    pub fn config(&self) -> &CarzConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `sort: None` falls back to the configured default sort.
    pub fn list_cars(&self, filter: &ViewFilter, sort: Option<SortKey>) -> CmdResult {
        let sort = sort.unwrap_or_else(|| self.config.sort_key());
        commands::list::run(&self.state, filter, sort, self.config.showcase_limit)
    }

    pub fn showcase(&self) -> CmdResult {
        commands::list::showcase_only(&self.state, self.config.showcase_limit)
    }

    pub fn stats(&self) -> CmdResult {
        commands::stats::run(&self.state)
    }

    pub fn show_car(&self, index: usize) -> CmdResult {
        commands::show::run(&self.state, index)
    }

    /// Enters edit mode and returns the pre-populated form, or `None` (and no
    /// state change) when `index` is out of range.
    pub fn start_edit(&mut self, index: usize) -> Option<CarForm> {
        let car = self.state.session.start_edit(&self.state.cars, index)?;
        tracing::debug!(index, id = %car.id, "edit started");
        Some(CarForm::from_car(car))
    }

    pub fn cancel_edit(&mut self) {
        self.state.session.cancel();
    }

    /// Adds a car, or replaces the one being edited.
    pub fn save_car(&mut self, form: &CarForm) -> Result<CmdResult> {
        commands::save::run(&mut self.store, &mut self.state, form)
    }

    pub fn delete_at(&mut self, index: usize) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &mut self.state, index)
    }

    pub fn delete_cars<I: AsRef<str>>(&mut self, positions: &[I]) -> Result<CmdResult> {
        let indexes = parse_positions(positions)?;
        commands::delete::run_many(&mut self.store, &mut self.state, &indexes)
    }

    pub fn toggle_favorite_at(&mut self, index: usize) -> Result<CmdResult> {
        commands::favorite::toggle(&mut self.store, &mut self.state, index)
    }

    pub fn toggle_favorites<I: AsRef<str>>(&mut self, positions: &[I]) -> Result<CmdResult> {
        let indexes = parse_positions(positions)?;
        let mut result = CmdResult::default();
        for index in indexes {
            let single = self.toggle_favorite_at(index)?;
            result.affected_cars.extend(single.affected_cars);
            result.messages.extend(single.messages);
        }
        Ok(result)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        commands::doctor::run(&mut self.store, &mut self.state)
    }

    pub fn configure(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result =
            commands::config::run(&mut self.store, &mut self.state, &self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

/// Parses user positions into 0-based indexes.
pub fn parse_positions<I: AsRef<str>>(positions: &[I]) -> Result<Vec<usize>> {
    parse_indexes(positions).map_err(CarzError::Api)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::StoreKey;

    fn api(store: InMemoryStore) -> CarzApi<InMemoryStore> {
        let dir = std::env::temp_dir().join("carz-api-tests-unused");
        CarzApi::open(store, CarzConfig::default(), dir)
    }

    fn form(name: &str) -> CarForm {
        CarForm {
            name: name.into(),
            value: "120".into(),
            image: "https://img.example/x.png".into(),
            rating: "3".into(),
            ..CarForm::default()
        }
    }

    #[test]
    fn open_loads_existing_state() {
        let api = api(StoreFixture::new().with_cars(3).build());
        assert_eq!(api.cars().len(), 3);
        assert_eq!(api.session(), EditSession::Idle);
    }

    #[test]
    fn edit_flow_prepopulates_and_commits() {
        let mut api = api(StoreFixture::new().with_cars(2).build());
        let mut form = api.start_edit(1).unwrap();
        assert_eq!(form.name, "Test Car 2");
        assert_eq!(api.session(), EditSession::Editing(1));

        form.name = "Renamed".into();
        api.save_car(&form).unwrap();
        assert_eq!(api.session(), EditSession::Idle);
        assert_eq!(api.cars()[1].name, "Renamed");
        assert_eq!(api.cars().len(), 2);
    }

    #[test]
    fn start_edit_out_of_range_keeps_idle() {
        let mut api = api(InMemoryStore::new());
        assert!(api.start_edit(0).is_none());
        assert_eq!(api.session(), EditSession::Idle);
    }

    #[test]
    fn cancel_edit_makes_next_save_an_add() {
        let mut api = api(StoreFixture::new().with_cars(1).build());
        api.start_edit(0);
        api.cancel_edit();
        api.save_car(&form("New")).unwrap();
        assert_eq!(api.cars().len(), 2);
    }

    #[test]
    fn edit_then_delete_same_index_resets_session() {
        let mut api = api(StoreFixture::new().with_cars(3).build());
        api.start_edit(2);
        api.delete_at(2).unwrap();
        assert_eq!(api.session(), EditSession::Idle);
    }

    #[test]
    fn positions_are_one_based() {
        let mut api = api(StoreFixture::new().with_cars(3).build());
        api.delete_cars(&["1"]).unwrap();
        assert_eq!(api.cars()[0].name, "Test Car 2");
        assert!(matches!(api.delete_cars(&["x"]), Err(CarzError::Api(_))));
    }

    #[test]
    fn toggle_favorites_twice_restores() {
        let mut api = api(StoreFixture::new().with_cars(2).build());
        api.toggle_favorites(&["2"]).unwrap();
        assert_eq!(api.favorites().len(), 1);
        assert_eq!(api.showcase().showcase.unwrap().cars.len(), 1);
        api.toggle_favorites(&["2"]).unwrap();
        assert!(api.favorites().is_empty());
        assert!(api.showcase().showcase.unwrap().is_empty());
    }

    #[test]
    fn list_uses_configured_default_sort() {
        let store = InMemoryStore::new();
        let dir = std::env::temp_dir().join("carz-api-tests-unused");
        let config = CarzConfig {
            default_sort: "name".into(),
            ..CarzConfig::default()
        };
        let mut api = CarzApi::open(store, config, dir);
        api.save_car(&form("b")).unwrap();
        api.save_car(&form("a")).unwrap();

        let sorted = api.list_cars(&ViewFilter::default(), None);
        assert_eq!(sorted.listed_cars[0].car.name, "a");
        let unsorted = api.list_cars(&ViewFilter::default(), Some(SortKey::Unsorted));
        assert_eq!(unsorted.listed_cars[0].car.name, "b");
    }

    #[test]
    fn favorite_on_legacy_record_survives_reopen() {
        let legacy = InMemoryStore::new().with_raw(
            StoreKey::Collection,
            r#"[{"name":"Twin Mill","value":150,"image":"t.png"}]"#,
        );
        let mut first = api(legacy);
        let id = first.cars()[0].id;
        first.toggle_favorites(&["1"]).unwrap();

        let reopened = api(first.store().clone());
        assert_eq!(reopened.cars()[0].id, id);
        assert_eq!(reopened.showcase().showcase.unwrap().cars.len(), 1);
    }

    #[test]
    fn reopening_a_saved_collection_keeps_ids() {
        let first = api(StoreFixture::new().with_cars(2).build());
        let ids: Vec<_> = first.cars().iter().map(|c| c.id).collect();
        let reopened = api(first.store().clone());
        let again: Vec<_> = reopened.cars().iter().map(|c| c.id).collect();
        assert_eq!(ids, again);
    }
}
