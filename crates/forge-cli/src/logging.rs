// embed-forge/forge-cli
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "embed-forge.log";

/// Writes JSON logs to `<log_dir>/embed-forge.log`, replacing the file of the previous run.
/// The level is read from `FORGE_LOG` and defaults to `info`.
pub fn enable_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    if log_file_path.exists() {
        _ = fs::remove_file(log_file_path);
    }

    let filter = EnvFilter::try_from_env("FORGE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);

    let json_layer = tracing_subscriber::fmt::Layer::new()
        .json()
        .with_writer(appender)
        .with_ansi(false)
        .with_filter(filter);

    Registry::default().with(json_layer).try_init()?;
    Ok(())
}
