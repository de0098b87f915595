//! Configuration for content-grid
//!
//! Read from `config.toml` in the platform config directory. A missing file
//! means defaults; command line flags override individual values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tui::keyboard::{KeyMap, KeyMapError};

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid key binding: {0}")]
    Keys(#[from] KeyMapError),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Default collection URL or file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub grid: GridSettings,
    pub keys: KeysConfig,
    pub tui: TuiConfig,
}

/// Layout and windowing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Rows in the grid; every row shows the same collection
    pub rows: usize,
    /// Items materialized either side of the focused one
    pub window_radius: usize,
    /// Cell width in terminal columns
    pub item_width: usize,
    /// Cell height in terminal rows
    pub item_height: usize,
    /// Columns between cells
    pub item_gap: usize,
    /// Strip scroll animation length
    pub transition_ms: u64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: 1,
            window_radius: 15,
            item_width: 18,
            item_height: 10,
            item_gap: 2,
            transition_ms: 300,
        }
    }
}

impl GridSettings {
    /// Distance from one cell's left edge to the next
    pub fn stride(&self) -> usize {
        self.item_width + self.item_gap
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Key names bound to each navigation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            next: names(&["ArrowRight", "Right", "l", "MediaTrackNext", "MediaFastForward"]),
            prev: names(&["ArrowLeft", "Left", "h", "MediaTrackPrevious", "MediaRewind"]),
            up: names(&["ArrowUp", "Up", "k"]),
            down: names(&["ArrowDown", "Down", "j"]),
            select: names(&["Enter", "Select", "Space", "MediaPlayPause"]),
        }
    }
}

/// TUI appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub theme: TuiTheme,
}

/// Color theme choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TuiTheme {
    #[default]
    CatppuccinMocha,
    CatppuccinLatte,
    Dracula,
    Nord,
    Custom,
}

impl GridConfig {
    fn project_dirs() -> Result<ProjectDirs, ConfigError> {
        ProjectDirs::from("", "", "content-grid").ok_or(ConfigError::NoConfigDir)
    }

    /// Directory holding `config.toml` and `custom-theme.json`
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        Ok(Self::project_dirs()?.config_dir().to_path_buf())
    }

    /// Directory for the log file
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(io_err)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the grid cannot lay out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.rows == 0 {
            return Err(ConfigError::Invalid {
                field: "grid.rows",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.grid.item_width == 0 || self.grid.item_height == 0 {
            return Err(ConfigError::Invalid {
                field: "grid.item_width/item_height",
                reason: "must be at least 1".to_string(),
            });
        }
        self.keymap()?;
        Ok(())
    }

    /// Resolved key map
    pub fn keymap(&self) -> Result<KeyMap, ConfigError> {
        Ok(KeyMap::from_config(&self.keys)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.grid.rows, 1);
        assert_eq!(config.grid.window_radius, 15);
        assert_eq!(config.grid.stride(), 20);
        assert_eq!(config.grid.transition(), Duration::from_millis(300));
        assert!(config.source.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = GridConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
source = "https://example.org/collection.json"

[grid]
rows = 2
window_radius = 4

[keys]
select = ["Enter"]

[tui]
theme = "nord"
"#,
        )
        .unwrap();

        let config = GridConfig::load_from(&path).unwrap();
        assert_eq!(config.source.as_deref(), Some("https://example.org/collection.json"));
        assert_eq!(config.grid.rows, 2);
        assert_eq!(config.grid.window_radius, 4);
        assert_eq!(config.grid.item_width, 18);
        assert_eq!(config.keys.select, vec!["Enter".to_string()]);
        assert_eq!(config.keys.next, KeysConfig::default().next);
        assert_eq!(config.tui.theme, TuiTheme::Nord);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = GridConfig::default();
        config.grid.rows = 3;
        config.tui.theme = TuiTheme::Dracula;

        config.save_to(&path).unwrap();
        assert_eq!(GridConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[grid]\nrows = 0\n").unwrap();

        assert!(matches!(
            GridConfig::load_from(&path),
            Err(ConfigError::Invalid { field: "grid.rows", .. })
        ));
    }

    #[test]
    fn test_unknown_key_name_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[keys]\nnext = [\"Warp\"]\n").unwrap();

        assert!(matches!(
            GridConfig::load_from(&path),
            Err(ConfigError::Keys(KeyMapError::UnknownKey(_)))
        ));
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[grid\n").unwrap();

        let err = GridConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
