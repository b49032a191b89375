pub mod migrate;

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,

    /// Shared sheet backend: "sqlite", "csv" or "off".
    #[serde(default = "default_store_kind")]
    pub store_kind: String,
    #[serde(default = "default_store_path")]
    pub store_path: String,

    #[serde(default = "default_capacity")]
    pub default_capacity: u32,
    #[serde(default = "default_duplicate_window")]
    pub duplicate_window_secs: i64,
    #[serde(default = "default_undo_window")]
    pub undo_window_secs: i64,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    #[serde(default = "default_courtesy_keywords")]
    pub courtesy_keywords: Vec<String>,

    /// Hand sheet writes to background workers instead of waiting inline.
    #[serde(default)]
    pub background_sync: bool,
    #[serde(default = "default_sync_workers")]
    pub sync_workers: usize,
}

fn default_store_kind() -> String {
    "sqlite".to_string()
}
fn default_store_path() -> String {
    Config::config_dir()
        .join("guest_sheet.sqlite")
        .to_string_lossy()
        .to_string()
}
fn default_capacity() -> u32 {
    100
}
fn default_duplicate_window() -> i64 {
    5
}
fn default_undo_window() -> i64 {
    15
}
fn default_admin_password() -> String {
    "1234".to_string()
}
pub fn default_courtesy_keywords() -> Vec<String> {
    [
        "staff", "family", "familia", "família", "cortesia", "courtesy", "crew", "equipe",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_sync_workers() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_database(database: String) -> Self {
        Self {
            database,
            store_kind: default_store_kind(),
            store_path: default_store_path(),
            default_capacity: default_capacity(),
            duplicate_window_secs: default_duplicate_window(),
            undo_window_secs: default_undo_window(),
            admin_password: default_admin_password(),
            courtesy_keywords: default_courtesy_keywords(),
            background_sync: false,
            sync_workers: default_sync_workers(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var("RGUESTDESK_HOME") {
            return PathBuf::from(custom);
        }
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rguestdesk")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rguestdesk")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rguestdesk.conf")
    }

    /// Return the full path of the local SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rguestdesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                AppError::Config(format!("cannot parse {}: {}", path.display(), e))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config::with_database(db_path.to_string_lossy().to_string());

        // Write config file
        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                AppError::from(io::Error::new(
                    e.kind(),
                    format!("cannot create {}: {}", db_path.display(), e),
                ))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }

    pub fn duplicate_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.duplicate_window_secs.max(0))
    }

    pub fn undo_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.undo_window_secs.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.store_kind, "sqlite");
        assert_eq!(cfg.default_capacity, 100);
        assert_eq!(cfg.duplicate_window_secs, 5);
        assert_eq!(cfg.undo_window_secs, 15);
        assert_eq!(cfg.admin_password, "1234");
        assert!(cfg.courtesy_keywords.iter().any(|k| k == "staff"));
        assert!(!cfg.background_sync);
    }

    #[test]
    fn yaml_round_trip_keeps_overrides() {
        let mut cfg = Config::with_database("/tmp/y.sqlite".into());
        cfg.store_kind = "csv".into();
        cfg.background_sync = true;
        let back: Config = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back.store_kind, "csv");
        assert!(back.background_sync);
    }
}
