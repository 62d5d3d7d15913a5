// Statline entry point.
//
// Startup sequence:
// 1. Load config (seeding config/statline.toml from defaults/ if missing)
// 2. Initialize tracing (log to file, not terminal)
// 3. Resolve the score source (first CLI argument overrides the config)
// 4. Create mpsc channels
// 5. Spawn the controller task (loads data, then serves commands)
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::path::Path;
use std::time::Duration;

use statline_tui::app;
use statline_tui::config::{self, LoggingConfig};
use statline_tui::source;
use statline_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let mut config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    init_tracing(&config.logging, &cwd)?;
    info!("Statline starting up");

    // 3. Resolve the score source
    if let Some(location) = std::env::args().nth(1) {
        info!("Score source overridden on the command line: {}", location);
        config.data.source = location;
    }
    let format = config.data.resolved_format();
    let score_source = source::source_from_location(&config.data.source);
    info!(
        "Reading scores from {} as {:?}",
        score_source.describe(),
        format
    );

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Spawn the controller task
    let state = app::StatsState::new(config.view.top_seasons_limit);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(score_source, format, cmd_rx, ui_tx, state).await {
            error!("Controller error: {}", e);
        }
    });

    // 6. Run the TUI (blocks until 'q' or Ctrl+C)
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for the controller to finish (with timeout)
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Statline shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(logging: &LoggingConfig, base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = logging.resolved_dir(base_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("statline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
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
