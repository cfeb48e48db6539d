// src/settings/defaults.rs
// Compiled-in settings. Every name here is watched and persisted.

use super::table::Settings;
use super::value::SettingValue;

pub const IS_ENABLED: &str = "isEnabled";
pub const SHOW_WIDGET: &str = "showWidget";
pub const SHOW_TABLE: &str = "showTable";
pub const LOCK_ON_START: &str = "lockOnStart";
pub const NOTIFY_ON_LOCK_CHANGE: &str = "notifyOnLockChange";
/// Vertical widget offset in pixels.
pub const OFFSET: &str = "offset";

pub const WATCHED_SETTINGS: &[&str] = &[
    IS_ENABLED,
    SHOW_WIDGET,
    SHOW_TABLE,
    LOCK_ON_START,
    NOTIFY_ON_LOCK_CHANGE,
    OFFSET,
];

pub fn default_settings() -> Settings {
    Settings::from_pairs([
        (IS_ENABLED, SettingValue::Bool(true)),
        (SHOW_WIDGET, SettingValue::Bool(true)),
        (SHOW_TABLE, SettingValue::Bool(false)),
        (LOCK_ON_START, SettingValue::Bool(false)),
        (NOTIFY_ON_LOCK_CHANGE, SettingValue::Bool(true)),
        (OFFSET, SettingValue::Int(0)),
    ])
}
