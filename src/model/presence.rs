//! Presence/activity notifications ("Playing X by Y" / "Idle")

use std::sync::{Arc, RwLock};

use super::track::Track;

pub const IDLE_ACTIVITY: &str = "Idle";

/// Fire-and-forget sink for the user's listening activity.
pub trait ActivityNotifier: Send + Sync {
    fn notify_activity(&self, description: &str);
}

/// Human-readable activity for the given playback state.
pub fn activity_description(track: Option<&Track>, playing: bool) -> String {
    match track {
        Some(track) if playing => format!("Playing {} by {}", track.title, track.artist),
        _ => IDLE_ACTIVITY.to_string(),
    }
}

/// Logs activity changes and remembers the last one for the status line
#[derive(Clone)]
pub struct TracingNotifier {
    last: Arc<RwLock<String>>,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self {
            last: Arc::new(RwLock::new(IDLE_ACTIVITY.to_string())),
        }
    }

    pub fn last_activity(&self) -> String {
        self.last
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|_| IDLE_ACTIVITY.to_string())
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityNotifier for TracingNotifier {
    fn notify_activity(&self, description: &str) {
        tracing::info!(activity = description, "Activity updated");
        match self.last.write() {
            Ok(mut last) => *last = description.to_string(),
            Err(_) => tracing::warn!("Activity lock poisoned, dropping update"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::test_track;

    #[test]
    fn description_depends_on_playing_flag() {
        let track = test_track("a");
        assert_eq!(activity_description(Some(&track), true), "Playing Song a by Artist a");
        assert_eq!(activity_description(Some(&track), false), "Idle");
        assert_eq!(activity_description(None, true), "Idle");
    }

    #[test]
    fn notifier_keeps_last_activity() {
        let notifier = TracingNotifier::new();
        assert_eq!(notifier.last_activity(), "Idle");
        notifier.notify_activity("Playing Song a by Artist a");
        assert_eq!(notifier.last_activity(), "Playing Song a by Artist a");
    }
}
