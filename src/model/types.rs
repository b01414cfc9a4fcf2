//! Core type definitions for the application

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Library,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Library => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Library,
        }
    }

    pub fn prev(self) -> Self {
        // Only two sections, so backward and forward coincide
        self.next()
    }
}

/// Repeat policy applied at queue boundaries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Successor in the fixed cycle `Off -> All -> One -> Off`.
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "Off",
            RepeatMode::All => "All",
            RepeatMode::One => "One",
        }
    }
}

/// What the main content pane is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentView {
    /// Tracks of the library entry at this sidebar index
    Library(usize),
    /// The active play queue
    Queue,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub library_items: Vec<String>,
    pub library_selected: usize,
    pub content_view: ContentView,
    pub content_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Library,
            library_items: Vec::new(),
            library_selected: 0,
            content_view: ContentView::Library(0),
            content_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycle_returns_to_off_after_three_steps() {
        let mut mode = RepeatMode::Off;
        let mut seen = Vec::new();
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(seen, vec![RepeatMode::All, RepeatMode::One, RepeatMode::Off]);
        assert_eq!(mode.next().next().next(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_uses_lowercase_json() {
        assert_eq!(serde_json::to_string(&RepeatMode::All).unwrap(), "\"all\"");
        let mode: RepeatMode = serde_json::from_str("\"one\"").unwrap();
        assert_eq!(mode, RepeatMode::One);
    }
}
