//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state, etc.)
//! - `track`: Track records as they appear in the catalog
//! - `queue`: Original/active track orders and shuffling
//! - `sequencer`: The playback state machine and the effects it requests
//! - `catalog`: Catalog collaborator and the JSON-backed library
//! - `settings`: Persisted shuffle/repeat preferences
//! - `presence`: Activity descriptions and the notifier collaborator
//! - `history`: Session listening history
//! - `playback`: Renderer clock and the snapshot handed to the view
//! - `app_model`: Main application model with state management methods

mod types;
mod track;
mod queue;
mod sequencer;
mod catalog;
mod settings;
mod presence;
mod history;
mod playback;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, ContentView, RepeatMode, UiState};

pub use track::Track;

pub use sequencer::{Effect, Sequencer};

pub use catalog::{CatalogProvider, JsonCatalog};

pub use settings::{FileSettingsStore, PreferencesUpdate, SettingsStore};

pub use presence::{ActivityNotifier, TracingNotifier};

pub use playback::PlaybackInfo;

pub use app_model::AppModel;

#[cfg(test)]
pub(crate) use app_model::test_support;

#[cfg(test)]
pub(crate) use track::test_track;
