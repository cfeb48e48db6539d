// src/config.rs

use crate::settings::{SettingsError, SettingsResult};
use bevy::log::Level;
use directories_next::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "FovLock";
const APPLICATION: &str = "FovLockHud";
const CONFIG_FILE: &str = "hud_config.json";
const DB_FILE: &str = "settings.db";

/// Runner configuration. Overlay settings live in the settings database, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Settings database. Defaults to the platform data directory.
    pub db_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
    pub log_level: String,
    pub log_filter: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            poll_interval_ms: 16,
            log_level: "info".to_string(),
            log_filter: "wgpu=error,naga=warn".to_string(),
        }
    }
}

impl HudConfig {
    pub fn resolve_db_path(&self) -> SettingsResult<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DB_FILE)),
        }
    }

    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

fn project_dirs() -> SettingsResult<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(SettingsError::NoConfigDir)
}

pub fn default_config_path() -> SettingsResult<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// A missing file is not an error; defaults are returned instead.
pub fn load_config(path: &Path) -> SettingsResult<HudConfig> {
    match fs::File::open(path) {
        Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HudConfig::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(tag: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fovlock_hud_cfg_{}_{}.json", tag, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("fovlock_hud_cfg_does_not_exist.json");
        assert_eq!(load_config(&path).unwrap(), HudConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_config("partial", r#"{ "db_path": "/tmp/hud.db", "log_level": "debug" }"#);
        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/hud.db")));
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.poll_interval_ms, 16);
        assert_eq!(config.resolve_db_path().unwrap(), PathBuf::from("/tmp/hud.db"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_config("malformed", "{ not json");
        let result = load_config(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = HudConfig { log_level: "loud".to_string(), ..Default::default() };
        assert_eq!(config.level(), Level::INFO);
    }
}
