mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use config::AppConfig;
use controller::AppController;
use model::{AppModel, CatalogProvider, FileSettingsStore, JsonCatalog, Sequencer, SettingsStore, TracingNotifier};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== playqueue-rs starting ===");
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    let catalog = Arc::new(
        JsonCatalog::load(&config.catalog_path)
            .with_context(|| format!("loading catalog from {}", config.catalog_path.display()))?,
    );
    if catalog.is_empty() {
        tracing::warn!(path = %config.catalog_path.display(), "Catalog has no songs");
    }

    let settings_store = FileSettingsStore::new(config.settings_path.clone());
    tracing::info!(path = %settings_store.path().display(), "Using playback settings file");
    let settings: Arc<dyn SettingsStore> = Arc::new(settings_store);

    let mut sequencer = Sequencer::new(catalog.clone(), settings.clone());
    sequencer.sync_with_settings();

    let app_model = AppModel::new(
        sequencer,
        settings,
        TracingNotifier::new(),
        catalog.library().to_vec(),
    );
    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    controller.initialize_playback(catalog.fetch_candidate_tracks()).await;
    controller.start_renderer_ticker(config.tick_interval);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("playqueue-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (playback, ui_state, tracks, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            let ui_state = model_guard.get_ui_state().await;
            let tracks = model_guard.content_tracks(ui_state.content_view).await;
            (
                model_guard.get_playback_info().await,
                ui_state,
                tracks,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &tracks);
        })?;

        // Short poll keeps the progress bar moving smoothly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
