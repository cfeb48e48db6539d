// src/hud/mod.rs

pub mod events;
pub mod fov;
pub mod notifications;
pub mod state;

pub use fov::{FovSource, SimulatedFov};

use crate::settings::SettingsSet;
use bevy::prelude::*;
use events::{FovCommand, LockStateChanged, OverlayClosed};
use notifications::{expire_notifications_system, Notifications};
use state::{
    apply_lock_on_start_system, handle_fov_commands_system, notify_lock_change_system,
    notify_settings_saved_system, poll_fov_system, track_overlay_visibility_system, HudState,
};

/// Polls the FOV provider and keeps the overlay-facing resources current.
/// Insert a `FovSource` before adding the plugin to use a real provider;
/// otherwise the detached provider is used. Needs `SettingsPlugin`.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FovSource>()
            .init_resource::<HudState>()
            .init_resource::<Notifications>();

        app.add_event::<FovCommand>()
            .add_event::<LockStateChanged>()
            .add_event::<OverlayClosed>();

        app.add_systems(PostStartup, apply_lock_on_start_system);
        app.add_systems(
            Update,
            (
                notify_settings_saved_system,
                handle_fov_commands_system,
                poll_fov_system,
                notify_lock_change_system,
                track_overlay_visibility_system,
                expire_notifications_system,
            )
                .chain()
                .after(SettingsSet::Apply)
                .before(SettingsSet::Flush),
        );

        info!("HudPlugin initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::defaults::{IS_ENABLED, LOCK_ON_START, NOTIFY_ON_LOCK_CHANGE, SHOW_WIDGET};
    use crate::settings::{SettingCommand, SettingsStore};
    use super::notifications::ToastLevel;
    use rusqlite::types::Value;
    use crate::settings::{default_settings, SettingValue, Settings, SettingsPlugin};

    fn hud_app(provider: SimulatedFov, settings: Option<Settings>) -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(FovSource::new(provider));
        app.add_plugins(SettingsPlugin::in_memory());
        app.add_plugins(HudPlugin);
        if let Some(settings) = settings {
            // Replace the loaded table once startup has run.
            let override_settings = move |mut res: ResMut<Settings>| {
                *res = settings.clone();
            };
            app.add_systems(PostStartup, override_settings.before(apply_lock_on_start_system));
        }
        app.update();
        app
    }

    #[test]
    fn test_poll_fills_hud_state() {
        let app = hud_app(SimulatedFov::default(), None);
        let state = app.world().resource::<HudState>();
        assert_eq!(state.reading.map(|r| r.display), Some(90.0));
        assert!(state.patching_allowed);
        assert!(!state.locked);
        assert!(state.widget_visible);
    }

    #[test]
    fn test_toggle_command_locks_and_notifies() {
        let mut app = hud_app(SimulatedFov::default(), None);
        app.world_mut().send_event(FovCommand::Toggle);
        app.update();

        assert!(app.world().resource::<FovSource>().is_locked());
        assert!(app.world().resource::<HudState>().locked);
        let toasts = app.world().resource::<Notifications>();
        assert_eq!(toasts.iter().last().map(|t| t.message.as_str()), Some("FOV locked"));
    }

    #[test]
    fn test_command_refused_without_patching() {
        let provider = SimulatedFov { patching_allowed: false, ..Default::default() };
        let mut app = hud_app(provider, None);
        app.world_mut().send_event(FovCommand::Lock);
        app.update();

        assert!(!app.world().resource::<FovSource>().is_locked());
        let toasts = app.world().resource::<Notifications>();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().level, ToastLevel::Warning);
    }

    #[test]
    fn test_lock_on_start() {
        let mut settings = default_settings();
        settings.set(LOCK_ON_START, SettingValue::Bool(true)).unwrap();
        let app = hud_app(SimulatedFov::default(), Some(settings));
        assert!(app.world().resource::<FovSource>().is_locked());
    }

    #[test]
    fn test_disabled_hud_clears_reading() {
        let mut settings = default_settings();
        settings.set(IS_ENABLED, SettingValue::Bool(false)).unwrap();
        let app = hud_app(SimulatedFov::default(), Some(settings));
        assert!(app.world().resource::<HudState>().reading.is_none());
    }

    #[test]
    fn test_disabling_hud_clears_lock_and_patching_state() {
        let mut app = hud_app(SimulatedFov::default(), None);
        app.world_mut().send_event(FovCommand::Lock);
        app.update();
        assert!(app.world().resource::<HudState>().locked);

        app.world_mut()
            .send_event(SettingCommand::Set(IS_ENABLED.to_string(), SettingValue::Bool(false)));
        app.update();

        let state = app.world().resource::<HudState>();
        assert!(state.reading.is_none());
        assert!(!state.locked);
        assert!(!state.patching_allowed);
        assert!(state.widget_visible);
    }

    #[test]
    fn test_lock_change_without_notify_adds_no_toast() {
        let mut settings = default_settings();
        settings.set(NOTIFY_ON_LOCK_CHANGE, SettingValue::Bool(false)).unwrap();
        let mut app = hud_app(SimulatedFov::default(), Some(settings));
        app.world_mut().send_event(FovCommand::Lock);
        app.update();

        assert!(app.world().resource::<HudState>().locked);
        assert_eq!(app.world().resource::<Notifications>().len(), 0);
    }

    #[test]
    fn test_hiding_widget_closes_overlay_and_saves() {
        let mut app = hud_app(SimulatedFov::default(), None);
        app.world_mut()
            .send_event(SettingCommand::Toggle(SHOW_WIDGET.to_string()));
        app.update();

        let store = app.world().non_send_resource::<SettingsStore>();
        assert!(!store.is_dirty());
        let rows = store.persisted_rows().unwrap();
        assert!(rows.contains(&(SHOW_WIDGET.to_string(), Value::Integer(0))));

        app.update();
        let toasts = app.world().resource::<Notifications>();
        assert_eq!(toasts.iter().last().map(|t| t.message.as_str()), Some("Settings saved"));
    }
}
