//! User settings, persisted as TOML in the platform config directory.
//!
//! - Linux: ~/.config/atlas/settings.toml
//! - macOS: ~/Library/Application Support/org.atlas.atlas/settings.toml
//! - Windows: %APPDATA%/atlas/atlas/config/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "atlas";
const APP_NAME: &str = "atlas";
const CONFIG_FILENAME: &str = "settings.toml";

/// Data file used when neither the command line nor the settings name one.
pub const DEFAULT_DATA_PATH: &str = "datos/paises.csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Location of the CSV data file. Relative paths resolve against the
    /// working directory.
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub style: OutputStyle,
    /// Group digits (`1,234,567`) in statistics.
    pub thousands: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            style: OutputStyle::default(),
            thousands: true,
        }
    }
}

/// How record lists are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One `- name | Población: ...` line per record.
    #[default]
    Lines,
    /// A bordered table.
    Table,
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

impl Settings {
    /// Load settings from `path`, or the platform default when `None`.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        match path.map(Path::to_path_buf).or_else(settings_path) {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| format!("Failed to write settings file: {}", e))?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }

    /// Data file to open: the command line wins over the settings file.
    pub fn resolve_data_path(&self, cli_path: Option<&Path>) -> PathBuf {
        cli_path.map_or_else(|| self.data.path.clone(), Path::to_path_buf)
    }
}
