//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::catalog::LibraryEntry;
use super::history::ListeningHistory;
use super::playback::{PlaybackInfo, PlaybackTiming};
use super::presence::TracingNotifier;
use super::sequencer::Sequencer;
use super::settings::SettingsStore;
use super::track::Track;
use super::types::{ActiveSection, ContentView, UiState};

const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Main application model containing all state
pub struct AppModel {
    sequencer: Arc<Mutex<Sequencer>>,
    playback_timing: Arc<Mutex<PlaybackTiming>>,
    history: Arc<Mutex<ListeningHistory>>,
    notifier: TracingNotifier,
    settings: Arc<dyn SettingsStore>,
    library: Arc<Vec<LibraryEntry>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(
        sequencer: Sequencer,
        settings: Arc<dyn SettingsStore>,
        notifier: TracingNotifier,
        library: Vec<LibraryEntry>,
    ) -> Self {
        let ui_state = UiState {
            library_items: library.iter().map(|e| e.label.clone()).collect(),
            ..UiState::default()
        };

        Self {
            sequencer: Arc::new(Mutex::new(sequencer)),
            playback_timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            history: Arc::new(Mutex::new(ListeningHistory::new())),
            notifier,
            settings,
            library: Arc::new(library),
            ui_state: Arc::new(Mutex::new(ui_state)),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Sequencer & Playback State
    // ========================================================================

    /// Run `f` against the sequencer while holding its lock.
    pub async fn with_sequencer<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Sequencer) -> R,
    {
        let mut sequencer = self.sequencer.lock().await;
        f(&mut sequencer)
    }

    pub fn notifier(&self) -> &TracingNotifier {
        &self.notifier
    }

    pub fn settings(&self) -> Arc<dyn SettingsStore> {
        Arc::clone(&self.settings)
    }

    pub fn history(&self) -> Arc<Mutex<ListeningHistory>> {
        Arc::clone(&self.history)
    }

    /// Point the renderer clock at whatever the sequencer currently selects.
    pub async fn sync_timing(&self) {
        let (track, playing) = {
            let sequencer = self.sequencer.lock().await;
            (sequencer.current_track().cloned(), sequencer.is_playing())
        };

        let mut timing = self.playback_timing.lock().await;
        match track {
            Some(track) if timing.track_id.as_deref() != Some(track.id.as_str()) => {
                tracing::debug!(track_id = %track.id, playing, "Renderer loading track");
                timing.load(&track, playing);
            }
            Some(_) => timing.set_playing(playing),
            None => timing.unload(),
        }
    }

    pub async fn restart_track(&self) {
        self.playback_timing.lock().await.restart();
    }

    /// Id of the loaded track if the renderer reached its end.
    pub async fn ended_track(&self) -> Option<String> {
        let timing = self.playback_timing.lock().await;
        if timing.has_ended() {
            timing.track_id.clone()
        } else {
            None
        }
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let (track, is_playing, shuffle, repeat, queue_position, queue_len) = {
            let sequencer = self.sequencer.lock().await;
            (
                sequencer.current_track().cloned(),
                sequencer.is_playing(),
                sequencer.shuffle(),
                sequencer.repeat(),
                sequencer.current_index(),
                sequencer.active_order().len(),
            )
        };
        let completed_listens = self
            .history
            .lock()
            .await
            .entries()
            .filter(|entry| entry.completed)
            .count();
        let timing = self.playback_timing.lock().await;

        PlaybackInfo {
            track,
            progress_ms: timing.current_position_ms(),
            duration_ms: timing.duration_ms,
            is_playing,
            shuffle,
            repeat,
            queue_position,
            queue_len,
            activity: self.notifier.last_activity(),
            completed_listens,
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Library & Content
    // ========================================================================

    pub fn library(&self) -> &[LibraryEntry] {
        &self.library
    }

    /// Tracks listed by the main pane for the given view.
    pub async fn content_tracks(&self, view: ContentView) -> Vec<Track> {
        match view {
            ContentView::Library(index) => self
                .library
                .get(index)
                .map(|entry| entry.tracks.clone())
                .unwrap_or_default(),
            ContentView::Queue => self.sequencer.lock().await.active_order().to_vec(),
        }
    }

    /// The visible track list plus the selected index within it.
    pub async fn get_selected_content(&self) -> Option<(ContentView, Vec<Track>, usize)> {
        let (view, selected) = {
            let state = self.ui_state.lock().await;
            (state.content_view, state.content_selected)
        };
        let tracks = self.content_tracks(view).await;
        if selected < tracks.len() {
            Some((view, tracks, selected))
        } else {
            None
        }
    }

    pub async fn open_library_item(&self, index: usize) {
        let mut state = self.ui_state.lock().await;
        state.content_view = ContentView::Library(index);
        state.content_selected = 0;
        state.active_section = ActiveSection::MainContent;
    }

    pub async fn show_queue(&self) {
        let selected = self.sequencer.lock().await.current_index().unwrap_or(0);
        let mut state = self.ui_state.lock().await;
        state.content_view = ContentView::Queue;
        state.content_selected = selected;
        state.active_section = ActiveSection::MainContent;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Library => {
                state.library_selected = state.library_selected.saturating_sub(1);
            }
            ActiveSection::MainContent => {
                state.content_selected = state.content_selected.saturating_sub(1);
            }
        }
    }

    pub async fn move_selection_down(&self) {
        let (section, view) = {
            let state = self.ui_state.lock().await;
            (state.active_section, state.content_view)
        };
        let content_len = match section {
            ActiveSection::MainContent => self.content_tracks(view).await.len(),
            ActiveSection::Library => 0,
        };

        let mut state = self.ui_state.lock().await;
        match section {
            ActiveSection::Library => {
                if state.library_selected < state.library_items.len().saturating_sub(1) {
                    state.library_selected += 1;
                }
            }
            ActiveSection::MainContent => {
                if state.content_selected < content_len.saturating_sub(1) {
                    state.content_selected += 1;
                }
            }
        }
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed() >= ERROR_DISPLAY_DURATION {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}
