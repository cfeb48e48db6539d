// src/hud/state.rs

use super::events::{FovCommand, LockStateChanged, OverlayClosed};
use super::fov::{FovReading, FovSource};
use super::notifications::{Notifications, ToastLevel};
use crate::settings::defaults::{IS_ENABLED, LOCK_ON_START, NOTIFY_ON_LOCK_CHANGE, OFFSET, SHOW_WIDGET};
use crate::settings::{Settings, SettingsFlushed};
use bevy::prelude::*;

/// What the overlay draws. Refreshed every frame from the FOV provider.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct HudState {
    pub reading: Option<FovReading>,
    pub locked: bool,
    pub patching_allowed: bool,
    pub widget_visible: bool,
    pub widget_offset: i64,
}

impl HudState {
    pub fn label(&self) -> String {
        match self.reading {
            Some(r) => {
                let lock = if self.locked { " [locked]" } else { "" };
                let patching = if self.patching_allowed { "" } else { " [no patching]" };
                format!("FOV {:.1} (raw {:.3}){}{}", r.display, r.raw, lock, patching)
            }
            None => "FOV --".to_string(),
        }
    }

    /// Drops everything read from the provider. Widget placement is kept.
    fn clear_provider_state(&mut self) {
        self.reading = None;
        self.locked = false;
        self.patching_allowed = false;
    }
}

pub fn poll_fov_system(
    source: Res<FovSource>,
    settings: Res<Settings>,
    mut state: ResMut<HudState>,
    mut lock_changed_writer: EventWriter<LockStateChanged>,
) {
    state.widget_visible = settings.get_bool(SHOW_WIDGET).unwrap_or(true);
    let offset = settings.get_int(OFFSET).unwrap_or(0);
    if offset != state.widget_offset {
        debug!("HUD: widget offset {} -> {}", state.widget_offset, offset);
        state.widget_offset = offset;
    }

    if !settings.get_bool(IS_ENABLED).unwrap_or(true) {
        if state.reading.is_some() || state.locked {
            debug!("HUD: disabled, clearing provider state");
        }
        state.clear_provider_state();
        return;
    }

    state.reading = source.current();
    state.patching_allowed = source.is_patching_allowed();

    let locked = source.is_locked();
    if locked != state.locked {
        state.locked = locked;
        info!("HUD: {}", state.label());
        lock_changed_writer.write(LockStateChanged { locked });
    }
}

pub fn notify_lock_change_system(
    mut lock_changed_reader: EventReader<LockStateChanged>,
    settings: Res<Settings>,
    time: Res<Time>,
    mut notifications: ResMut<Notifications>,
) {
    let notify = settings.get_bool(NOTIFY_ON_LOCK_CHANGE).unwrap_or(true);
    for change in lock_changed_reader.read() {
        if notify {
            let message = if change.locked { "FOV locked" } else { "FOV unlocked" };
            notifications.push(ToastLevel::Info, message, time.elapsed_secs_f64());
        }
    }
}

pub fn notify_settings_saved_system(
    mut flushed_reader: EventReader<SettingsFlushed>,
    time: Res<Time>,
    mut notifications: ResMut<Notifications>,
) {
    if let Some(flushed) = flushed_reader.read().last() {
        debug!("HUD: {} settings saved", flushed.rows);
        notifications.push(ToastLevel::Info, "Settings saved", time.elapsed_secs_f64());
    }
}

pub fn handle_fov_commands_system(
    mut command_reader: EventReader<FovCommand>,
    mut source: ResMut<FovSource>,
    time: Res<Time>,
    mut notifications: ResMut<Notifications>,
) {
    for command in command_reader.read() {
        if !source.is_patching_allowed() {
            warn!("HUD: {:?} ignored, {} provider does not allow patching", command, source.name());
            notifications.push(
                ToastLevel::Warning,
                "FOV lock unavailable",
                time.elapsed_secs_f64(),
            );
            continue;
        }
        let accepted = match command {
            FovCommand::Lock => source.lock(),
            FovCommand::Unlock => source.unlock(),
            FovCommand::Toggle => source.toggle(),
        };
        if !accepted {
            warn!("HUD: provider rejected {:?}", command);
        }
    }
}

pub fn apply_lock_on_start_system(
    settings: Res<Settings>,
    mut command_writer: EventWriter<FovCommand>,
) {
    if settings.get_bool(LOCK_ON_START).unwrap_or(false) {
        info!("HUD: lock on start requested");
        command_writer.write(FovCommand::Lock);
    }
}

/// Emits `OverlayClosed` when the widget goes from visible to hidden.
pub fn track_overlay_visibility_system(
    state: Res<HudState>,
    mut was_visible: Local<Option<bool>>,
    mut closed_writer: EventWriter<OverlayClosed>,
) {
    if *was_visible == Some(true) && !state.widget_visible {
        debug!("HUD: overlay closed");
        closed_writer.write(OverlayClosed);
    }
    *was_visible = Some(state.widget_visible);
}
