//! Playback-related types: renderer clock and the snapshot handed to the view

use std::time::Instant;

use super::track::Track;
use super::types::RepeatMode;

/// Wall-clock position of the simulated audio renderer
#[derive(Clone, Debug)]
pub struct PlaybackTiming {
    pub position_ms: u32,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration_ms: u32,
    /// Id of the track the clock was last loaded with
    pub track_id: Option<String>,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: false,
            duration_ms: 0,
            track_id: None,
        }
    }
}

impl PlaybackTiming {
    pub fn current_position_ms(&self) -> u32 {
        self.position_at(Instant::now())
    }

    fn position_at(&self, now: Instant) -> u32 {
        if self.is_playing {
            let elapsed = now.saturating_duration_since(self.last_update).as_millis() as u32;
            self.position_ms.saturating_add(elapsed).min(self.duration_ms)
        } else {
            self.position_ms.min(self.duration_ms)
        }
    }

    /// Point the clock at a new track, rewinding to zero.
    pub fn load(&mut self, track: &Track, is_playing: bool) {
        self.track_id = Some(track.id.clone());
        self.duration_ms = track.duration_ms();
        self.position_ms = 0;
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn restart(&mut self) {
        self.position_ms = 0;
        self.last_update = Instant::now();
    }

    /// Resuming a track that already reached its end replays it from zero.
    pub fn set_playing(&mut self, is_playing: bool) {
        if self.is_playing == is_playing {
            return;
        }
        self.position_ms = self.current_position_ms();
        if is_playing && self.position_ms >= self.duration_ms {
            self.position_ms = 0;
        }
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    /// True once a playing track has reached its end.
    pub fn has_ended(&self) -> bool {
        self.is_playing && self.track_id.is_some() && self.current_position_ms() >= self.duration_ms
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub is_playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub queue_position: Option<usize>,
    pub queue_len: usize,
    pub activity: String,
    /// Tracks played to the end this session
    pub completed_listens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::test_track;
    use std::time::Duration;

    #[test]
    fn paused_clock_does_not_move() {
        let mut timing = PlaybackTiming::default();
        timing.load(&test_track("a"), false);
        let later = timing.last_update + Duration::from_secs(10);
        assert_eq!(timing.position_at(later), 0);
        assert!(!timing.has_ended());
    }

    #[test]
    fn playing_clock_is_capped_at_duration() {
        let mut timing = PlaybackTiming::default();
        timing.load(&test_track("a"), true);
        let later = timing.last_update + Duration::from_secs(120);
        assert_eq!(timing.position_at(later), 30_000);
    }

    #[test]
    fn zero_length_track_ends_immediately() {
        let mut track = test_track("a");
        track.duration = 0;
        let mut timing = PlaybackTiming::default();
        timing.load(&track, true);
        assert!(timing.has_ended());

        timing.set_playing(false);
        assert!(!timing.has_ended());
    }

    #[test]
    fn resuming_a_finished_track_replays_it() {
        let mut timing = PlaybackTiming::default();
        timing.load(&test_track("c"), false);
        timing.position_ms = 30_000;

        timing.set_playing(true);
        assert_eq!(timing.position_ms, 0);
        assert!(!timing.has_ended());

        timing.set_playing(false);
        timing.position_ms = 12_000;
        timing.set_playing(true);
        assert_eq!(timing.position_ms, 12_000);
    }

    #[test]
    fn unloaded_clock_never_ends() {
        let mut timing = PlaybackTiming::default();
        timing.is_playing = true;
        assert!(!timing.has_ended());
    }
}
