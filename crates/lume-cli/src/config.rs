//! Application configuration for the command-line frontend.

use std::path::PathBuf;

/// Environment variable overriding the saved-edit directory.
pub const STORE_DIR_VAR: &str = "LUME_STORE_DIR";
/// Environment variable holding the tracing filter.
pub const LOG_VAR: &str = "LUME_LOG";
/// Filter used when `LUME_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";
/// Directory name under the platform data dir.
const APP_DIR: &str = "lume";

/// Runtime configuration for the `lume` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding `lume_saved_edits.json`.
    pub store_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl AppConfig {
    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_dir = lookup(STORE_DIR_VAR)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_store_dir);
        let log_filter = lookup(LOG_VAR)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            store_dir,
            log_filter,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn default_store_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(format!(".{APP_DIR}")),
    }
}
