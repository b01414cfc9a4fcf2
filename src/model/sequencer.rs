//! Playback sequencer: queue position, shuffle and repeat policies
//!
//! The sequencer owns the authoritative [`PlaybackState`]. Every operation
//! mutates that state synchronously and returns the [`Effect`]s an outer
//! driver should perform (presence notification, preference persistence,
//! rewinding the renderer, listening history). Effects are fire-and-forget:
//! their failure never feeds back into the state held here.
//!
//! Collaborator reads (catalog candidates, stored preferences) go through the
//! injected trait objects and are treated as best-effort.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::catalog::CatalogProvider;
use super::presence::activity_description;
use super::queue::{Queue, dedup_tracks};
use super::settings::{PreferencesUpdate, SettingsStore};
use super::track::Track;
use super::types::RepeatMode;

/// Side action requested by a sequencer operation
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Publish "Playing X by Y" / "Idle" to the presence channel
    NotifyActivity(String),
    /// Write preferences to the settings store
    PersistPreferences(PreferencesUpdate),
    /// Rewind the renderer to zero on the current track (repeat one, or
    /// repeat all wrapping onto the same track)
    RestartTrack,
    /// Append a listening-history entry for a track that was started
    RecordListen(Track),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    /// Position of `current_track` in the active order; `None` when the queue
    /// is empty or the current track is not part of it.
    pub current_index: Option<usize>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub playing: bool,
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Forward,
    Backward,
}

pub struct Sequencer {
    state: PlaybackState,
    queue: Queue,
    catalog: Arc<dyn CatalogProvider>,
    settings: Arc<dyn SettingsStore>,
    rng: StdRng,
}

impl Sequencer {
    pub fn new(catalog: Arc<dyn CatalogProvider>, settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_rng(catalog, settings, StdRng::from_os_rng())
    }

    pub fn with_rng(
        catalog: Arc<dyn CatalogProvider>,
        settings: Arc<dyn SettingsStore>,
        rng: StdRng,
    ) -> Self {
        Self {
            state: PlaybackState::default(),
            queue: Queue::default(),
            catalog,
            settings,
            rng,
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    #[cfg(test)]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn active_order(&self) -> &[Track] {
        self.queue.active()
    }

    #[cfg(test)]
    pub fn original_order(&self) -> &[Track] {
        self.queue.original()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn shuffle(&self) -> bool {
        self.state.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.state.repeat
    }

    // ========================================================================
    // Queue construction
    // ========================================================================

    /// Replace the queue without starting playback.
    ///
    /// An empty input clears the queue and leaves the current track alone.
    pub fn initialize_queue(&mut self, tracks: &[Track]) -> Vec<Effect> {
        let before = self.snapshot();

        if tracks.is_empty() {
            tracing::debug!("initialize_queue with no tracks, clearing queue");
            self.queue = Queue::default();
            self.state.current_index = None;
            return self.finish(before, Vec::new());
        }

        self.load(tracks);
        if self.state.current_track.is_none() {
            self.select(0);
        } else {
            self.state.current_index = self.relocate_current();
        }

        tracing::debug!(
            len = self.queue.len(),
            shuffle = self.state.shuffle,
            index = ?self.state.current_index,
            "Queue initialized"
        );
        self.finish(before, Vec::new())
    }

    /// Load `tracks` and start playing the one at `start_index` of the input.
    ///
    /// The start position refers to the input order, so it is mapped through
    /// the shuffle by track identity. Empty input is ignored.
    pub fn play(&mut self, tracks: &[Track], start_index: usize) -> Vec<Effect> {
        let Some(target) = tracks.get(start_index).or_else(|| tracks.first()) else {
            tracing::debug!("play called with no tracks, ignoring");
            return Vec::new();
        };
        let target_id = target.id.clone();
        let before = self.snapshot();

        self.load(tracks);
        let index = self.queue.position_of(&target_id).unwrap_or(0);
        self.select(index);
        self.state.playing = true;

        tracing::debug!(
            start_index,
            index,
            track_id = %target_id,
            shuffle = self.state.shuffle,
            "Playing track list"
        );
        let effects = self.listen_effect();
        self.finish(before, effects)
    }

    /// Play a specific track, rebuilding the queue around it when needed.
    pub fn set_current_track(&mut self, track: &Track) -> Vec<Effect> {
        let before = self.snapshot();

        match self.queue.position_of(&track.id) {
            Some(index) => {
                tracing::debug!(track_id = %track.id, index, "Switching within queue");
                self.select(index);
            }
            None => {
                let candidates = dedup_tracks(&self.catalog.fetch_candidate_tracks());
                if candidates.iter().any(|t| t.same_as(track)) {
                    tracing::debug!(
                        track_id = %track.id,
                        candidates = candidates.len(),
                        "Track not queued, building queue from catalog"
                    );
                    self.load(&candidates);
                } else {
                    tracing::debug!(track_id = %track.id, "Track not in catalog, single-track queue");
                    self.load(std::slice::from_ref(track));
                }
                let index = self.queue.position_of(&track.id).unwrap_or(0);
                self.select(index);
            }
        }

        if self.state.current_track.is_none() {
            self.state.current_track = Some(track.clone());
        }
        self.state.playing = true;

        let effects = self.listen_effect();
        self.finish(before, effects)
    }

    // ========================================================================
    // Toggles
    // ========================================================================

    pub fn toggle_play(&mut self) -> Vec<Effect> {
        let before = self.snapshot();
        self.state.playing = !self.state.playing;
        tracing::debug!(playing = self.state.playing, "Toggled play");
        self.finish(before, Vec::new())
    }

    /// Flip shuffle, re-deriving the active order and keeping the current track selected.
    pub fn toggle_shuffle(&mut self) -> Vec<Effect> {
        let before = self.snapshot();
        let shuffle = !self.state.shuffle;
        self.state.shuffle = shuffle;

        if shuffle {
            self.queue.reshuffle(&mut self.rng);
        } else {
            self.queue.unshuffle();
        }
        self.state.current_index = self.relocate_current();

        tracing::debug!(shuffle, index = ?self.state.current_index, "Toggled shuffle");
        let effects = vec![Effect::PersistPreferences(PreferencesUpdate {
            shuffle: Some(shuffle),
            repeat: None,
        })];
        self.finish(before, effects)
    }

    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.state.repeat = self.state.repeat.next();
        tracing::debug!(repeat = ?self.state.repeat, "Toggled repeat");
        self.state.repeat
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Move to the next track, applying the repeat policy at the end of the queue.
    pub fn advance(&mut self) -> Vec<Effect> {
        if self.queue.is_empty() {
            return self.recover(Direction::Forward);
        }

        let before = self.snapshot();
        let mut effects = Vec::new();
        let next = self.state.current_index.map_or(0, |i| i + 1);

        if next < self.queue.len() {
            self.select(next);
            self.state.playing = true;
        } else {
            tracing::debug!(repeat = ?self.state.repeat, "Reached end of queue");
            self.at_boundary(0, &mut effects);
        }

        self.finish(before, effects)
    }

    /// Move to the previous track, applying the repeat policy at the start of the queue.
    pub fn retreat(&mut self) -> Vec<Effect> {
        if self.queue.is_empty() {
            return self.recover(Direction::Backward);
        }

        let before = self.snapshot();
        let mut effects = Vec::new();

        match self.state.current_index {
            Some(index) if index > 0 => {
                self.select(index - 1);
                self.state.playing = true;
            }
            _ => {
                tracing::debug!(repeat = ?self.state.repeat, "Reached start of queue");
                let last = self.queue.len() - 1;
                self.at_boundary(last, &mut effects);
            }
        }

        self.finish(before, effects)
    }

    /// Align shuffle/repeat flags with the settings store without touching the queue.
    pub fn sync_with_settings(&mut self) {
        let prefs = match self.settings.playback_preferences() {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read playback preferences, keeping current flags");
                return;
            }
        };

        if prefs.shuffle != self.state.shuffle {
            tracing::info!(shuffle = prefs.shuffle, "Shuffle synced from settings");
            self.state.shuffle = prefs.shuffle;
        }
        if prefs.repeat != self.state.repeat {
            tracing::info!(repeat = ?prefs.repeat, "Repeat synced from settings");
            self.state.repeat = prefs.repeat;
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn load(&mut self, tracks: &[Track]) {
        self.queue = Queue::build(tracks, self.state.shuffle, &mut self.rng);
    }

    fn select(&mut self, index: usize) {
        match self.queue.get(index) {
            Some(track) => {
                self.state.current_track = Some(track.clone());
                self.state.current_index = Some(index);
            }
            None => self.state.current_index = None,
        }
    }

    /// Where the current track sits in the active order.
    ///
    /// Without a current track the first position is used; a current track
    /// missing from the queue stays detached (`None`).
    fn relocate_current(&self) -> Option<usize> {
        match &self.state.current_track {
            Some(track) => self.queue.position_of(&track.id),
            None if !self.queue.is_empty() => Some(0),
            None => None,
        }
    }

    /// Repeat policy at either end of the queue; `wrap_to` is the index repeat-all jumps to.
    fn at_boundary(&mut self, wrap_to: usize, effects: &mut Vec<Effect>) {
        match self.state.repeat {
            RepeatMode::All => {
                let wraps_onto_itself = self.state.current_index == Some(wrap_to);
                self.select(wrap_to);
                self.state.playing = true;
                if wraps_onto_itself {
                    effects.push(Effect::RestartTrack);
                }
            }
            RepeatMode::One => {
                if self.state.current_track.is_some() {
                    self.state.playing = true;
                    effects.push(Effect::RestartTrack);
                } else {
                    self.state.playing = false;
                }
            }
            RepeatMode::Off => {
                self.state.playing = false;
            }
        }
    }

    /// Rebuild a queue from catalog candidates around the current track.
    fn recover(&mut self, direction: Direction) -> Vec<Effect> {
        let Some(current_id) = self.state.current_track.as_ref().map(|t| t.id.clone()) else {
            tracing::debug!(?direction, "Queue empty and nothing playing, nothing to do");
            return Vec::new();
        };

        let candidates = dedup_tracks(&self.catalog.fetch_candidate_tracks());
        let Some(position) = candidates.iter().position(|t| t.id == current_id) else {
            tracing::info!(track_id = %current_id, ?direction, "Current track not in catalog, cannot recover queue");
            return Vec::new();
        };

        let target = match direction {
            Direction::Forward => Some(position + 1).filter(|&i| i < candidates.len()),
            Direction::Backward => position.checked_sub(1),
        };

        match target {
            Some(index) => {
                tracing::info!(track_id = %current_id, index, ?direction, "Recovered queue from catalog");
                self.play(&candidates, index)
            }
            None => {
                tracing::info!(track_id = %current_id, ?direction, "No neighbour in catalog, cannot recover queue");
                Vec::new()
            }
        }
    }

    fn listen_effect(&self) -> Vec<Effect> {
        self.state
            .current_track
            .iter()
            .map(|t| Effect::RecordListen(t.clone()))
            .collect()
    }

    fn snapshot(&self) -> (Option<String>, bool) {
        (
            self.state.current_track.as_ref().map(|t| t.id.clone()),
            self.state.playing,
        )
    }

    /// Append an activity notification when the track or the playing flag changed.
    fn finish(&self, before: (Option<String>, bool), mut effects: Vec<Effect>) -> Vec<Effect> {
        if self.snapshot() != before {
            effects.push(Effect::NotifyActivity(activity_description(
                self.state.current_track.as_ref(),
                self.state.playing,
            )));
        }
        effects
    }
}
