// src/settings/systems.rs

use super::defaults::{default_settings, WATCHED_SETTINGS};
use super::events::{SettingCommand, SettingsFlushed};
use super::store::SettingsStore;
use super::table::Settings;
use crate::hud::events::OverlayClosed;
use bevy::app::AppExit;
use bevy::prelude::*;
use std::path::PathBuf;

/// Ordering for the per-frame settings work. Consumers of `Settings` that
/// react to commands run between `Apply` and `Flush`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSet {
    Apply,
    Flush,
}

/// Where the startup system opens the store.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub enum SettingsLocation {
    File(PathBuf),
    InMemory,
}

/// Opens the store, loads the compiled-in defaults over it, and hands both to
/// the world. Any failure here aborts startup.
pub fn open_settings_store_system(
    location: Res<SettingsLocation>,
    mut commands: Commands,
    mut app_exit_writer: EventWriter<AppExit>,
) {
    let opened = match &*location {
        SettingsLocation::File(path) => SettingsStore::open(path),
        SettingsLocation::InMemory => SettingsStore::open_in_memory(),
    };
    let loaded = opened.and_then(|mut store| {
        let settings = store.load(&default_settings())?;
        Ok((store, settings))
    });

    match loaded {
        Ok((store, settings)) => {
            info!("Settings: {} settings ready ({:?})", settings.len(), *location);
            commands.insert_resource(settings);
            commands.queue(move |world: &mut World| {
                world.insert_non_send_resource(store);
            });
        }
        Err(e) => {
            error!("Settings: could not initialize settings store: {}", e);
            app_exit_writer.write(AppExit::error());
        }
    }
}

/// Applies queued commands. Only commands that actually change a value flag
/// `Settings` as changed; `mark_settings_dirty_system` turns that into a dirty store.
pub fn apply_setting_commands_system(
    mut command_reader: EventReader<SettingCommand>,
    mut settings: ResMut<Settings>,
) {
    for command in command_reader.read() {
        let name = command.name();
        let before = settings.get(name);
        let table = settings.bypass_change_detection();
        let result = match command {
            SettingCommand::Toggle(name) => table.toggle(name).map(|_| ()),
            SettingCommand::Set(name, value) => table.set(name, *value).map(|_| ()),
            SettingCommand::Adjust(name, delta) => table.adjust(name, *delta).map(|_| ()),
        };
        match result {
            Ok(()) => {
                let after = settings.get(name);
                if after != before {
                    debug!("Settings: {} {:?} -> {:?}", name, before, after);
                    settings.set_changed();
                }
            }
            Err(e) => warn!("Settings: ignoring {:?}: {}", command, e),
        }
    }
}

/// Any write to `Settings` after it was loaded marks the store dirty, whether it
/// came through a `SettingCommand` or a system holding `ResMut<Settings>`.
pub fn mark_settings_dirty_system(
    settings: Res<Settings>,
    store: Option<NonSendMut<SettingsStore>>,
) {
    if settings.is_changed() && !settings.is_added() {
        mark_store_dirty(store);
    }
}

fn mark_store_dirty(store: Option<NonSendMut<SettingsStore>>) {
    match store {
        Some(mut store) => store.mark_dirty(),
        None => warn!("Settings: store is not open, changes will not be saved"),
    }
}

pub fn flush_settings_on_overlay_close_system(
    mut closed_reader: EventReader<OverlayClosed>,
    settings: Res<Settings>,
    store: Option<NonSendMut<SettingsStore>>,
    mut flushed_writer: EventWriter<SettingsFlushed>,
) {
    if closed_reader.read().count() == 0 {
        return;
    }
    if let Some(mut store) = store {
        flush_store(&mut store, &settings, &mut flushed_writer);
    }
}

pub fn flush_settings_on_exit_system(
    mut exit_reader: EventReader<AppExit>,
    settings: Res<Settings>,
    store: Option<NonSendMut<SettingsStore>>,
    mut flushed_writer: EventWriter<SettingsFlushed>,
) {
    if exit_reader.read().count() == 0 {
        return;
    }
    let Some(mut store) = store else {
        return;
    };
    // Catches writes made after `SettingsSet::Flush` in the final frame.
    if settings.is_changed() && !settings.is_added() {
        store.mark_dirty();
    }
    info!("Settings: saving before exit");
    flush_store(&mut store, &settings, &mut flushed_writer);
    if let Err(e) = store.checkpoint() {
        warn!("Settings: checkpoint on exit failed: {}", e);
    }
}

fn flush_store(
    store: &mut SettingsStore,
    settings: &Settings,
    flushed_writer: &mut EventWriter<SettingsFlushed>,
) {
    match store.flush(settings, WATCHED_SETTINGS) {
        Ok(0) => debug!("Settings: nothing to save"),
        Ok(rows) => {
            info!("Settings: saved {} settings", rows);
            flushed_writer.write(SettingsFlushed { rows });
        }
        // Not retried; the next change marks the store dirty again.
        Err(e) => error!("Settings: failed to save settings: {}", e),
    }
}
