//! Runtime configuration resolved from CLI flags and environment.

use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Directory under the home directory holding persisted state.
const DATA_DIR: &str = ".surfsensei";
const FEEDBACK_FILE: &str = "feedback.json";

/// Settings shared by the CLI and the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Where the feedback history lives. `None` means the home default.
    pub data_dir: Option<PathBuf>,
    /// Keep feedback in memory only.
    pub no_persist: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: None,
            no_persist: false,
        }
    }
}

impl Config {
    /// Resolve the data directory, falling back to `~/.surfsensei`.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(DATA_DIR)))
    }

    /// Path of the feedback history slot.
    pub fn feedback_path(&self) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join(FEEDBACK_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/surf")),
            ..Config::default()
        };
        assert_eq!(
            config.feedback_path(),
            Some(PathBuf::from("/tmp/surf/feedback.json"))
        );
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.api_key.is_none());
        assert!(!config.no_persist);
    }
}
