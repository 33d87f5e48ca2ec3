use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::expand_path;

pub const DEFAULT_SCHEMA_FILE: &str = "anniversary_schema.json";
pub const DEFAULT_DATA_FILE: &str = "anniversary.json";
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;

/// Contents of config.toml
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub files: FileSettings,
    #[serde(default)]
    pub upcoming: UpcomingSettings,
}

#[derive(Debug, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_data")]
    pub data: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            data: default_data(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpcomingSettings {
    #[serde(default = "default_days")]
    pub days: i64,
}

impl Default for UpcomingSettings {
    fn default() -> Self {
        Self {
            days: default_days(),
        }
    }
}

fn default_schema() -> String {
    DEFAULT_SCHEMA_FILE.to_string()
}

fn default_data() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_days() -> i64 {
    DEFAULT_UPCOMING_DAYS
}

/// Startup configuration handed to `load_session`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub schema_path: PathBuf,
    pub data_path: PathBuf,
    pub upcoming_days: i64,
}

impl Settings {
    /// Default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::from_file_config(dir, &FileConfig::default())
    }

    /// Relative paths in config.toml are resolved against the config directory
    pub fn from_file_config(dir: &Path, config: &FileConfig) -> Self {
        let resolve = |p: &str| {
            let path = expand_path(p);
            if path.is_absolute() {
                path
            } else {
                dir.join(path)
            }
        };

        Self {
            schema_path: resolve(&config.files.schema),
            data_path: resolve(&config.files.data),
            upcoming_days: config.upcoming.days,
        }
    }
}
