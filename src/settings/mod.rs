// src/settings/mod.rs

pub mod connection;
pub mod defaults;
pub mod error;
pub mod events;
pub mod sql;
pub mod store;
pub mod systems;
pub mod table;
pub mod value;

pub use defaults::{default_settings, WATCHED_SETTINGS};
pub use error::{SettingsError, SettingsResult};
pub use events::{SettingCommand, SettingsFlushed};
pub use store::SettingsStore;
pub use systems::{SettingsLocation, SettingsSet};
pub use table::Settings;
pub use value::SettingValue;

use crate::hud::events::OverlayClosed;
use bevy::prelude::*;
use std::path::PathBuf;
use systems::{
    apply_setting_commands_system, flush_settings_on_exit_system,
    flush_settings_on_overlay_close_system, mark_settings_dirty_system,
    open_settings_store_system,
};

/// Owns the settings store for the lifetime of the app: opened at startup,
/// flushed when the overlay closes and again on exit.
pub struct SettingsPlugin {
    location: SettingsLocation,
}

impl SettingsPlugin {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { location: SettingsLocation::File(path.into()) }
    }

    pub fn in_memory() -> Self {
        Self { location: SettingsLocation::InMemory }
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        // Defaults until the startup system replaces them with the merged table.
        app.insert_resource(self.location.clone())
            .insert_resource(default_settings());

        app.add_event::<SettingCommand>()
            .add_event::<SettingsFlushed>()
            .add_event::<OverlayClosed>();

        app.add_systems(Startup, open_settings_store_system);
        app.configure_sets(Update, (SettingsSet::Apply, SettingsSet::Flush).chain());
        app.add_systems(Update, apply_setting_commands_system.in_set(SettingsSet::Apply));
        app.add_systems(
            Update,
            (mark_settings_dirty_system, flush_settings_on_overlay_close_system)
                .chain()
                .in_set(SettingsSet::Flush),
        );
        app.add_systems(Last, flush_settings_on_exit_system);
    }
}
