//! Data directory and `config.toml` handling.
//!
//! Credentials never pass through here; the binary takes them from the
//! environment.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use graphite_types::config::BotConfig;

/// Resolve the data directory from `GRAPHITE_DATA_DIR`, falling back to
/// `~/.graphite`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GRAPHITE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".graphite");
    }

    // Last resort: current directory
    PathBuf::from(".graphite")
}

/// SQLite URL for the database file inside `data_dir`.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("graphite.db").display())
}

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load `{data_dir}/config.toml`. Never fails: a missing file means
/// defaults, an unreadable or malformed one logs a warning and means defaults.
pub async fn load_bot_config(data_dir: &Path) -> BotConfig {
    let path = data_dir.join(CONFIG_FILE);

    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return BotConfig::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config file unreadable, using defaults");
            return BotConfig::default();
        }
    };

    parse_bot_config(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "config file malformed, using defaults");
        BotConfig::default()
    })
}

/// Parse config text. A zero `page_size` falls back to the default.
pub fn parse_bot_config(raw: &str) -> Result<BotConfig, toml::de::Error> {
    let mut config: BotConfig = toml::from_str(raw)?;
    if config.page_size == 0 {
        config.page_size = BotConfig::default().page_size;
    }
    Ok(config)
}
