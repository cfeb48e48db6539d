// src/settings/events.rs

use super::value::SettingValue;
use bevy::prelude::*;

/// A user-driven change to a watched setting.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SettingCommand {
    Toggle(String),
    Set(String, SettingValue),
    Adjust(String, i64),
}

/// Sent after a flush wrote rows to the store.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsFlushed {
    pub rows: usize,
}

impl SettingCommand {
    pub fn name(&self) -> &str {
        match self {
            SettingCommand::Toggle(name) | SettingCommand::Set(name, _) | SettingCommand::Adjust(name, _) => name,
        }
    }
}
