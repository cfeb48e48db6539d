// src/settings/error.rs

use super::value::SettingKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Table definition handed to the store is unusable. Configuration bug.
    #[error("Invalid table definition: {0}")]
    InvalidSchema(String),
    /// Upsert statement arguments are unusable. Configuration bug.
    #[error("Invalid upsert: {0}")]
    InvalidUpsert(String),
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
    #[error("Setting '{name}' holds {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: SettingKind,
        found: SettingKind,
    },
    #[error("Cannot read '{input}' as {expected} for setting '{name}'")]
    InvalidValue {
        name: String,
        input: String,
        expected: SettingKind,
    },
    #[error("Could not determine project directories")]
    NoConfigDir,
}

pub type SettingsResult<T> = Result<T, SettingsError>;
