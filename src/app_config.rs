use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    gpsd: Gpsd,
    #[serde(default)]
    store: Store,
    log: Log,
}

impl AppConfig {
    /// Defaults, then `gpsfix.*` and `gpsfix_local.*` if present, then `GPSFIX_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(config::File::with_name("gpsfix").required(false))
                .add_source(config::File::with_name("gpsfix_local").required(false))
                .add_source(config::Environment::with_prefix("GPSFIX").separator("__")),
        )
    }

    fn build(sources: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        sources
            .set_default("gpsd.host", "127.0.0.1")?
            .set_default("gpsd.port", 2947_i64)?
            .set_default("gpsd.timeout", "15s")?
            .set_default("log.level", "warn")?
            .build()?
            .try_deserialize()
    }

    pub fn gpsd(&self) -> &Gpsd {
        &self.gpsd
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn log(&self) -> &Log {
        &self.log
    }
}

#[derive(Debug, Deserialize)]
pub struct Gpsd {
    host: String,
    port: u16,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Gpsd {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Store {
    directory: Option<PathBuf>,
}

impl Store {
    /// The configured directory, or `gpsfix` in the user's cache directory.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join(env!("CARGO_PKG_NAME")))
    }
}

#[derive(Debug, Deserialize)]
pub struct Log {
    #[serde(deserialize_with = "deserialize_level")]
    level: Level,
}

impl Log {
    pub fn level(&self) -> Level {
        self.level
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    Level::from_str(&level).map_err(|_| Error::custom(format!("invalid log level: {}, must be one of trace, debug, info, warn or error", level)))
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                gpsd: Gpsd {
                    host: "127.0.0.1".to_string(),
                    port: 2947,
                    timeout: Duration::from_secs(15),
                },
                store: Store { directory: None },
                log: Log { level: Level::WARN },
            },
        }
    }

    pub fn gpsd_timeout(mut self, timeout: Duration) -> Self {
        self.config.gpsd.timeout = timeout;
        self
    }

    pub fn store_directory(mut self, directory: PathBuf) -> Self {
        self.config.store.directory = Some(directory);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
