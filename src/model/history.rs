//! Listening history for the current session

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::track::Track;

const MAX_HISTORY_ENTRIES: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningActivity {
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub album_id: Option<String>,
    pub duration: u32,
    pub played_at: DateTime<Utc>,
    pub completed: bool,
}

/// Bounded log of started tracks, newest last
#[derive(Debug, Default)]
pub struct ListeningHistory {
    entries: VecDeque<ListeningActivity>,
}

impl ListeningHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, track: &Track) {
        self.record_at(track, Utc::now());
    }

    fn record_at(&mut self, track: &Track, played_at: DateTime<Utc>) {
        if self.entries.len() == MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(ListeningActivity {
            track_id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album_id: track.album_id.clone(),
            duration: track.duration,
            played_at,
            completed: false,
        });
    }

    /// Mark the most recent entry for `track_id` as listened to the end.
    pub fn mark_completed(&mut self, track_id: &str) -> bool {
        match self.entries.iter_mut().rev().find(|e| e.track_id == track_id) {
            Some(entry) => {
                entry.completed = true;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &ListeningActivity> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::test_track;

    #[test]
    fn oldest_entries_are_evicted() {
        let mut history = ListeningHistory::new();
        for i in 0..(MAX_HISTORY_ENTRIES + 5) {
            history.record(&test_track(&i.to_string()));
        }
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries().next().unwrap().track_id, "5");
    }

    #[test]
    fn completion_marks_latest_matching_entry() {
        let mut history = ListeningHistory::new();
        let track = test_track("a");
        history.record(&track);
        history.record(&test_track("b"));
        history.record(&track);

        assert!(history.mark_completed("a"));
        let completed: Vec<bool> = history.entries().map(|e| e.completed).collect();
        assert_eq!(completed, vec![false, false, true]);
        assert!(!history.mark_completed("zzz"));
    }

    #[test]
    fn serializes_with_camel_case() {
        let mut history = ListeningHistory::new();
        history.record(&test_track("a"));
        let json = serde_json::to_value(history.entries().next().unwrap()).unwrap();
        assert_eq!(json["trackId"], "a");
        assert_eq!(json["completed"], false);
    }
}
