//! # Command Layer
//!
//! Business logic for every operation. Commands take the storage backend and
//! the loaded [`CollectionState`], mutate, persist, and return a [`CmdResult`].
//! They never print.
//!
//! Mutations are all-or-nothing: the new collection or favorites set is built
//! on a copy, written to the store, and only then swapped into the state. A
//! rejected form or a failed write leaves memory exactly as it was.

use crate::chart::BarChart;
use crate::config::CarzConfig;
use crate::model::{Car, Favorites};
use crate::session::EditSession;
use crate::store::{Loaded, Preferences};
use crate::view::{DisplayCar, PackStatusAverage, Showcase};

pub mod config;
pub mod delete;
pub mod doctor;
pub mod favorite;
pub mod list;
pub mod save;
pub mod show;
pub mod stats;

/// The in-memory mirror of everything persisted, plus the edit session.
#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    pub cars: Vec<Car>,
    pub favorites: Favorites,
    pub preferences: Preferences,
    pub session: EditSession,
}

impl From<Loaded> for CollectionState {
    fn from(loaded: Loaded) -> Self {
        Self {
            cars: loaded.collection,
            favorites: loaded.favorites,
            preferences: loaded.preferences,
            session: EditSession::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_cars: Vec<Car>,
    pub listed_cars: Vec<DisplayCar>,
    pub showcase: Option<Showcase>,
    pub averages: Vec<PackStatusAverage>,
    pub chart: Option<BarChart>,
    pub config: Option<CarzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_cars(mut self, cars: Vec<Car>) -> Self {
        self.affected_cars = cars;
        self
    }

    pub fn with_listed_cars(mut self, cars: Vec<DisplayCar>) -> Self {
        self.listed_cars = cars;
        self
    }

    pub fn with_showcase(mut self, showcase: Showcase) -> Self {
        self.showcase = Some(showcase);
        self
    }

    pub fn with_config(mut self, config: CarzConfig) -> Self {
        self.config = Some(config);
        self
    }
}
