// Rinkside entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Load the saved franchise or create a new one
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Wait for the app task to save and exit

use rinkside_core::config;
use rinkside_tui::app;
use rinkside_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging.filter)?;
    info!("Rinkside starting up");
    info!(
        "Config loaded: {} / {}, cap ${}M (floor ${}M)",
        config.new_franchise.nhl_team,
        config.new_franchise.ahl_team,
        config.league.cap_ceiling,
        config.league.cap_floor
    );

    // 3. Load or create the franchise
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let app_state =
        app::AppState::from_config(&config, &base_dir).context("failed to load franchise")?;
    info!(
        "Franchise ready: season {}, save file {}",
        app_state.tracker.current_season(),
        app_state.save_path.display()
    );

    // 4. Create channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {:#}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Wait for the app task to finish (with timeout)
    if tokio::time::timeout(std::time::Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        error!("App task did not finish within 5s; unsaved changes may be lost");
    }

    info!("Rinkside shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI). `RUST_LOG` overrides the configured filter.
fn init_tracing(filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("rinkside.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(filter))
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
