//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Library sidebar
//! - `content`: Main content area rendering
//! - `progress`: Progress bar rendering
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PlaybackInfo, Track, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackInfo, ui_state: &UiState, tracks: &[Track]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Library sidebar
                Constraint::Percentage(70), // Main content
            ])
            .split(chunks[0]);

        layout::render_sidebar(frame, main_chunks[0], ui_state);

        let current_track_id = playback.track.as_ref().map(|t| t.id.as_str());
        content::render_main_content(frame, main_chunks[1], ui_state, tracks, current_track_id);

        progress::render_progress_bar(frame, chunks[1], playback);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
