//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! drives the sequencer and performs the effects it requests.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods
//! - `player_events`: Renderer ticker (end of track, auto-advance guard)

mod input;
mod playback;
mod player_events;

use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

use crate::model::{ActivityNotifier, AppModel, Effect, PreferencesUpdate, Sequencer};

use player_events::AutoAdvanceGuard;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    auto_advance: Arc<Mutex<AutoAdvanceGuard>>,
    preferences_tx: mpsc::UnboundedSender<PreferencesUpdate>,
}

impl AppController {
    /// Must be called from within a tokio runtime; spawns the preferences writer.
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        let (preferences_tx, preferences_rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run_preferences_writer(Arc::clone(&model), preferences_rx));

        Self {
            model,
            auto_advance: Arc::new(Mutex::new(AutoAdvanceGuard::default())),
            preferences_tx,
        }
    }

    /// Writes preference updates one at a time, in the order they were requested.
    async fn run_preferences_writer(
        model: Arc<Mutex<AppModel>>,
        mut updates: mpsc::UnboundedReceiver<PreferencesUpdate>,
    ) {
        let settings = model.lock().await.settings();
        drop(model);

        while let Some(update) = updates.recv().await {
            let settings = Arc::clone(&settings);
            match tokio::task::spawn_blocking(move || settings.set_playback_preferences(update)).await {
                Ok(Ok(())) => tracing::debug!(?update, "Playback preferences persisted"),
                Ok(Err(e)) => tracing::warn!(error = %e, ?update, "Failed to persist playback preferences"),
                Err(e) => tracing::warn!(error = %e, ?update, "Preferences write task failed"),
            }
        }
    }

    /// Run a user-initiated sequencer operation and perform its effects.
    pub(crate) async fn dispatch<F>(&self, action: &'static str, op: F)
    where
        F: FnOnce(&mut Sequencer) -> Vec<Effect>,
    {
        self.auto_advance.lock().await.reset();

        let model = self.model.lock().await;
        let effects = model.with_sequencer(op).await;
        tracing::debug!(action, effects = effects.len(), "Sequencer action applied");
        self.apply_effects(&model, effects).await;
    }

    /// Perform effects after the sequencer lock has been released, then realign the renderer.
    pub(crate) async fn apply_effects(&self, model: &AppModel, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::NotifyActivity(description) => {
                    model.notifier().notify_activity(&description);
                }
                Effect::PersistPreferences(update) => {
                    if self.preferences_tx.send(update).is_err() {
                        tracing::warn!(?update, "Preferences writer stopped, update dropped");
                    }
                }
                Effect::RestartTrack => {
                    tracing::debug!("Restarting current track");
                    model.restart_track().await;
                }
                Effect::RecordListen(track) => {
                    model.history().lock().await.record(&track);
                    // An explicit start always plays from the top
                    model.restart_track().await;
                }
            }
        }
        model.sync_timing().await;
    }
}
