use crate::app_config::AppConfig;
use crate::cli::Cli;
use crate::domain::Endpoint;
use crate::gpsd::acquire_fix;
use crate::resolve_fix::resolve_fix;
use crate::store::{FileStore, LastFixStore, StoreError};
use clap::Parser;
use tracing::{debug, instrument, warn};

mod app_config;
mod cli;
mod domain;
mod gpsd;
mod resolve_fix;
mod store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    // stdout is reserved for the fix
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log().level())
        .init();

    debug!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if !cli.extra().is_empty() {
        warn!("⚠️ Ignoring extra arguments: {}", cli.extra().join(" "));
    }

    let endpoint = cli.endpoint(config.gpsd());
    if let Some(line) = run(&endpoint, &config).await? {
        println!("{}", line);
    }

    Ok(())
}

/// One read attempt against `endpoint`, falling back to the stored fix.
#[instrument(skip(config))]
async fn run(endpoint: &Endpoint, config: &AppConfig) -> Result<Option<String>, StoreError> {
    let store = LastFixStore::new(FileStore::new(config.store().directory()));
    let reading = acquire_fix(endpoint, config.gpsd().timeout()).await;

    resolve_fix(reading, &store, endpoint).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::gpsd::{TPV, VERSION, fake_daemon};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_log::test;

    const LINE: &str = "37.5 -122.1 10.0 2023-01-01T00:00:00Z";

    #[test(tokio::test)]
    async fn run_returns_the_live_fix_and_later_falls_back_to_it() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let config = AppConfigBuilder::new()
            .store_directory(dir.path().to_path_buf())
            .gpsd_timeout(Duration::from_millis(200))
            .build();

        let (live, live_daemon) = fake_daemon(vec![VERSION, TPV], false).await?;
        let (silent, silent_daemon) = fake_daemon(vec![VERSION], true).await?;

        assert_eq!(run(&live, &config).await?, Some(LINE.to_string()));
        live_daemon.await?;

        assert_eq!(run(&silent, &config).await?, None);
        silent_daemon.abort();

        // Nothing listens on `live` any more
        assert_eq!(run(&live, &config).await?, Some(LINE.to_string()));
        Ok(())
    }
}
