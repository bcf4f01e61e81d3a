use std::path::PathBuf;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

const LOG_ENV: &str = "PORTFOLIO_LOG";
const LOG_FILE: &str = "portfolio.log";

/// Logs go to a file in the data dir since the terminal belongs to the UI.
pub fn initialize_logging(config: &AppConfig) -> color_eyre::Result<()> {
    let directory = config.data_dir().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join(LOG_FILE))?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
