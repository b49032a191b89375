//! Configuration file upgrades: detect keys missing from older files and
//! fill them with their defaults, leaving user values untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn parse_mapping(content: &str) -> AppResult<Mapping> {
    let yaml: Value =
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(
            "configuration root must be a mapping".into(),
        )),
    }
}

fn defaults_mapping(database: &str) -> AppResult<Mapping> {
    let reference = Config::with_database(database.to_string());
    parse_mapping(&reference.to_yaml()?)
}

/// Keys present in the current schema but absent from `content`.
pub fn missing_fields(content: &str) -> AppResult<Vec<String>> {
    let current = parse_mapping(content)?;
    let defaults = defaults_mapping("")?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add missing keys to the config file at `path`.
///
/// Returns Ok(true) when the file was rewritten, Ok(false) when nothing
/// was missing.
pub fn run_config_migration(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        info(format!(
            "No configuration file at {}, nothing to migrate.",
            path.display()
        ));
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let mut current = parse_mapping(&content)?;

    let database = current
        .get(Value::String("database".into()))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| Config::database_file().to_string_lossy().to_string());

    let mut added = Vec::new();
    for (k, v) in defaults_mapping(&database)? {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if added.is_empty() {
        return Ok(false);
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, yaml)?;

    success(format!("Configuration migrated, added: {}", added.join(", ")));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_file_reports_new_keys() {
        let missing = missing_fields("database: /tmp/a.sqlite\nadmin_password: '9'\n").unwrap();
        assert!(missing.contains(&"store_kind".to_string()));
        assert!(missing.contains(&"undo_window_secs".to_string()));
        assert!(!missing.contains(&"database".to_string()));
        assert!(!missing.contains(&"admin_password".to_string()));
    }

    #[test]
    fn migration_keeps_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rguestdesk.conf");
        fs::write(&path, "database: /tmp/b.sqlite\nadmin_password: '140206'\n").unwrap();

        assert!(run_config_migration(&path).unwrap());
        let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.admin_password, "140206");
        assert_eq!(cfg.database, "/tmp/b.sqlite");

        assert!(!run_config_migration(&path).unwrap());
    }
}
