//! Renderer ticker: detects the end of a track and advances the sequencer

use std::time::Duration;

use crate::model::{Effect, RepeatMode};
use super::AppController;

/// Automatic advances allowed in a row before playback is paused.
pub const MAX_CHAINED_AUTO_ADVANCES: u32 = 8;

/// Caps consecutive end-of-track advances that produce no audible progress,
/// e.g. zero-length tracks or a queue the catalog cannot extend.
#[derive(Debug, Default)]
pub struct AutoAdvanceGuard {
    chained: u32,
}

impl AutoAdvanceGuard {
    /// Claim one automatic advance; false once the chain is exhausted.
    pub fn try_begin(&mut self) -> bool {
        if self.chained >= MAX_CHAINED_AUTO_ADVANCES {
            return false;
        }
        self.chained += 1;
        true
    }

    pub fn reset(&mut self) {
        self.chained = 0;
    }

    pub fn chained(&self) -> u32 {
        self.chained
    }
}

impl AppController {
    pub fn start_renderer_ticker(&self, interval: Duration) {
        let controller = self.clone();
        tracing::info!(interval_ms = interval.as_millis() as u64, "Starting renderer ticker");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if controller.model.lock().await.should_quit().await {
                    tracing::debug!("Renderer ticker shutting down");
                    break;
                }
                controller.tick().await;
            }
        });
    }

    pub(crate) async fn tick(&self) {
        let model = self.model.lock().await;

        let Some(track_id) = model.ended_track().await else {
            let info = model.get_playback_info().await;
            if info.is_playing && info.progress_ms > 0 {
                self.auto_advance.lock().await.reset();
            }
            return;
        };

        model.history().lock().await.mark_completed(&track_id);

        let (allowed, chained) = {
            let mut guard = self.auto_advance.lock().await;
            (guard.try_begin(), guard.chained())
        };
        if allowed {
            tracing::debug!(track_id = %track_id, chained, "Track ended");
            let effects = model
                .with_sequencer(|s| {
                    let replay = match s.repeat() {
                        RepeatMode::One => s.current_track().cloned(),
                        _ => None,
                    };
                    match replay {
                        Some(track) => vec![Effect::RecordListen(track)],
                        None => s.advance(),
                    }
                })
                .await;
            self.apply_effects(&model, effects).await;
        } else {
            tracing::warn!(
                track_id = %track_id,
                max = MAX_CHAINED_AUTO_ADVANCES,
                "Tracks keep ending without progress, pausing playback"
            );
            let effects = model
                .with_sequencer(|s| if s.is_playing() { s.toggle_play() } else { Vec::new() })
                .await;
            self.apply_effects(&model, effects).await;
            model
                .set_error("Playback paused: tracks keep ending immediately".to_string())
                .await;
        }
    }
}
