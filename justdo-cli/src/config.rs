//! Persisted CLI preferences.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "justdo";
const CONFIG_FILE_NAME: &str = "config.json";

/// Color theme for board rendering. Stored separately from the
/// session; logging out does not touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Dark => f.write_str("dark"),
            ColorMode::Light => f.write_str("light"),
        }
    }
}

/// Persisted preferences, one JSON file under the user config dir.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub color_mode: ColorMode,
}

impl Preferences {
    /// Load preferences from disk, returning defaults if not found.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&config_file_path())
    }

    fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
    }
}

fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}
