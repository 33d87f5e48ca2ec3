mod settings;

pub use settings::{
    FileConfig, FileSettings, Settings, UpcomingSettings, DEFAULT_DATA_FILE, DEFAULT_SCHEMA_FILE,
    DEFAULT_UPCOMING_DAYS,
};

use crate::error::{AnniversaryError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Where config.toml, the schema and the data file live by default.
///
/// The platform config location when one is known, `$HOME/.anniversary` otherwise.
pub fn config_dir() -> Result<PathBuf> {
    match ProjectDirs::from("", "", "anniversary") {
        Some(dirs) => Ok(dirs.config_dir().to_path_buf()),
        None => home_dir()
            .map(|home| home.join(".anniversary"))
            .ok_or_else(|| {
                AnniversaryError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no config directory: HOME is not set",
                ))
            }),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Resolve a leading `~/` in paths taken from config.toml
pub fn expand_path(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Load config.toml (defaults if missing)
pub fn load_file_config(config_dir: &Path) -> Result<FileConfig> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| AnniversaryError::ConfigParse { path, source: e })
}

/// Resolve settings for a config directory
pub fn load_settings(config_dir: &Path) -> Result<Settings> {
    let config = load_file_config(config_dir)?;
    Ok(Settings::from_file_config(config_dir, &config))
}

/// Create the config directory with config.toml and the default schema
pub fn init_config_dir(config_dir: &Path) -> Result<Settings> {
    if config_dir.exists() {
        return Err(AnniversaryError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir)?;
    fs::write(config_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    let settings = load_settings(config_dir)?;
    fs::write(&settings.schema_path, SCHEMA_TEMPLATE)?;
    Ok(settings)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[files]
# Relative paths are resolved against this directory; ~ is expanded.
schema = "anniversary_schema.json"
data = "anniversary.json"

[upcoming]
days = 30   # window used by 'anniversary upcoming'
"#;

/// Default schema describing one anniversary record.
///
/// Edit the `enum` lists to change accepted provinces, or add one to
/// `anniversaryType` to restrict it.
pub const SCHEMA_TEMPLATE: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Anniversary",
  "type": "object",
  "properties": {
    "names": { "type": "string", "minLength": 1 },
    "anniversaryDate": {
      "type": "string",
      "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$"
    },
    "anniversaryType": { "type": "string", "minLength": 1 },
    "description": { "type": "string" },
    "email": {
      "type": "string",
      "pattern": "^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$"
    },
    "phone": {
      "type": "string",
      "pattern": "^[0-9()+. -]{7,20}$"
    },
    "address": {
      "type": "object",
      "minProperties": 1,
      "properties": {
        "streetAddress": { "type": "string" },
        "municipality": { "type": "string" },
        "province": {
          "type": "string",
          "enum": ["AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT"]
        },
        "postalCode": {
          "type": "string",
          "pattern": "^[A-Za-z][0-9][A-Za-z] ?[0-9][A-Za-z][0-9]$"
        }
      },
      "additionalProperties": false
    }
  },
  "required": ["names", "anniversaryDate", "anniversaryType"],
  "additionalProperties": false
}
"#;
