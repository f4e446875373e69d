//! # Carz Architecture
//!
//! Carz manages a die-cast car collection. Like any good collection tool it is
//! a **library with a CLI client**, not a CLI with some library code: the core
//! knows nothing about terminals and could back a web page or a TUI unchanged.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Context object: store + loaded state + edit session      │
//! │  - Normalizes inputs (positions → indexes)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validate, mutate, persist; all-or-nothing                │
//! └─────────────────────────────────────────────────────────────┘
//!                     │                         │
//!                     ▼                         ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  View Engine (view.rs,        │ │  Storage Layer (store/)   │
//! │  chart.rs): pure derivations  │ │  DataStore trait,         │
//! │  filter → sort → showcase     │ │  FileStore, InMemoryStore │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Identity
//!
//! Every car gets a UUID when it is created. Favorites reference cars by that
//! id, so two cars with the same name are still distinct favorites. Edit and
//! delete address cars by position in the stored collection (see [`index`]
//! and [`session`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and context object
//! - [`commands`]: Mutation operations and view commands
//! - [`view`]: Filtering, sorting, showcase and aggregates
//! - [`chart`]: Chart description for the stats view
//! - [`session`]: The edit session state machine
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Car`, `PackStatus`, `Favorites`, `CarForm`)
//! - [`index`]: User-facing positions and ranges
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod chart;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod session;
pub mod store;
pub mod view;
