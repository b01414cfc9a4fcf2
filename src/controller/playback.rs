//! Playback control methods

use crate::model::{ContentView, Sequencer, Track};

use super::AppController;

impl AppController {
    /// Load the startup queue without starting playback.
    pub async fn initialize_playback(&self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            tracing::warn!("Catalog has no tracks, starting with an empty queue");
            self.model
                .lock()
                .await
                .set_error("Catalog is empty. Add songs to catalog.json.".to_string())
                .await;
            return;
        }

        tracing::info!(candidates = tracks.len(), "Initializing queue from catalog");
        self.dispatch("initialize_queue", |s| s.initialize_queue(&tracks)).await;
    }

    pub async fn toggle_playback(&self) {
        let has_track = self
            .model
            .lock()
            .await
            .with_sequencer(|s| s.current_track().is_some())
            .await;
        if !has_track {
            let model = self.model.lock().await;
            model.set_error("Nothing to play. Pick a track from the library.".to_string()).await;
            return;
        }

        self.dispatch("toggle_play", Sequencer::toggle_play).await;
    }

    pub async fn next_track(&self) {
        tracing::debug!("Skipping to next track");
        self.dispatch("advance", Sequencer::advance).await;
    }

    pub async fn previous_track(&self) {
        tracing::debug!("Going back to previous track");
        self.dispatch("retreat", Sequencer::retreat).await;
    }

    pub async fn toggle_shuffle(&self) {
        self.dispatch("toggle_shuffle", Sequencer::toggle_shuffle).await;
        self.refresh_queue_if_visible().await;
    }

    pub async fn cycle_repeat(&self) {
        let model = self.model.lock().await;
        let repeat = model.with_sequencer(Sequencer::toggle_repeat).await;
        tracing::info!(repeat = repeat.label(), "Repeat mode changed");
    }

    /// Start playback from the selected row of the main pane.
    ///
    /// A library list becomes the new queue; a queue row switches within the queue.
    pub async fn play_selected(&self) {
        let selected = self.model.lock().await.get_selected_content().await;
        let Some((view, tracks, index)) = selected else {
            return;
        };

        match view {
            ContentView::Library(_) => {
                self.dispatch("play", |s| s.play(&tracks, index)).await;
            }
            ContentView::Queue => {
                let track = tracks[index].clone();
                self.dispatch("set_current_track", |s| s.set_current_track(&track)).await;
            }
        }
        self.refresh_queue_if_visible().await;
    }

    pub async fn open_library_item(&self, index: usize) {
        let model = self.model.lock().await;
        if let Some(entry) = model.library().get(index) {
            tracing::debug!(label = %entry.label, tracks = entry.tracks.len(), "Opening library item");
        }
        model.open_library_item(index).await;
    }

    pub async fn show_queue(&self) {
        self.model.lock().await.show_queue().await;
    }

    /// Keep the queue view's selection on the current track after the order changed.
    async fn refresh_queue_if_visible(&self) {
        let model = self.model.lock().await;
        if model.get_ui_state().await.content_view == ContentView::Queue {
            model.show_queue().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::model;
    use crate::model::{AppModel, RepeatMode, test_track};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn controller() -> AppController {
        AppController::new(Arc::new(Mutex::new(model())))
    }

    async fn current_id(model: &AppModel) -> Option<String> {
        model.get_playback_info().await.track.map(|t| t.id)
    }

    #[tokio::test]
    async fn initialize_then_toggle_starts_first_track() {
        let controller = controller();
        let tracks = vec![test_track("a"), test_track("b"), test_track("a")];
        controller.initialize_playback(tracks).await;
        assert!(!controller.model.lock().await.get_playback_info().await.is_playing);

        controller.toggle_playback().await;
        let model = controller.model.lock().await;
        let info = model.get_playback_info().await;
        assert!(info.is_playing);
        assert_eq!(info.queue_len, 2);
        assert_eq!(current_id(&model).await, Some("a".to_string()));
    }

    #[tokio::test]
    async fn empty_catalog_reports_error() {
        let controller = controller();
        controller.initialize_playback(Vec::new()).await;
        assert!(controller.model.lock().await.has_error().await);
    }

    #[tokio::test]
    async fn toggle_without_track_reports_error() {
        let controller = controller();
        controller.toggle_playback().await;
        let model = controller.model.lock().await;
        assert!(model.has_error().await);
        assert!(!model.get_playback_info().await.is_playing);
    }

    #[tokio::test]
    async fn library_selection_plays_list_from_row() {
        let controller = controller();
        controller.open_library_item(0).await;
        controller.model.lock().await.move_selection_down().await;
        controller.play_selected().await;

        let model = controller.model.lock().await;
        assert_eq!(current_id(&model).await, Some("b".to_string()));
        assert_eq!(model.get_playback_info().await.queue_position, Some(1));
    }

    #[tokio::test]
    async fn queue_selection_switches_within_queue() {
        let controller = controller();
        controller.open_library_item(0).await;
        controller.play_selected().await;
        controller.show_queue().await;
        controller.model.lock().await.move_selection_down().await;
        controller.model.lock().await.move_selection_down().await;
        controller.play_selected().await;

        let model = controller.model.lock().await;
        let info = model.get_playback_info().await;
        assert_eq!(info.track.map(|t| t.id), Some("c".to_string()));
        assert_eq!(info.queue_len, 3);
        assert_eq!(model.get_ui_state().await.content_selected, 2);
    }

    #[tokio::test]
    async fn next_and_previous_walk_the_queue() {
        let controller = controller();
        controller.open_library_item(0).await;
        controller.play_selected().await;

        controller.next_track().await;
        controller.next_track().await;
        assert_eq!(current_id(&*controller.model.lock().await).await, Some("c".to_string()));

        controller.previous_track().await;
        assert_eq!(current_id(&*controller.model.lock().await).await, Some("b".to_string()));
    }

    #[tokio::test]
    async fn repeat_cycles_through_modes() {
        let controller = controller();
        controller.cycle_repeat().await;
        controller.cycle_repeat().await;
        let info = controller.model.lock().await.get_playback_info().await;
        assert_eq!(info.repeat, RepeatMode::One);
    }
}
