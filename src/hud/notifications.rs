// src/hud/notifications.rs

use bevy::prelude::*;
use std::collections::VecDeque;

pub const MAX_TOASTS: usize = 5;
/// Identical messages pushed within this window collapse into one.
pub const DEBOUNCE_SECS: f64 = 1.5;
pub const TOAST_LIFETIME_SECS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub shown_at: f64,
}

/// Toasts waiting for the overlay to draw them. Newest at the back.
#[derive(Resource, Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Toast>,
}

impl Notifications {
    /// Returns false when the message was debounced.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: f64) -> bool {
        let message = message.into();
        if let Some(last) = self.queue.back_mut() {
            if last.message == message && now - last.shown_at < DEBOUNCE_SECS {
                last.shown_at = now;
                return false;
            }
        }
        if self.queue.len() == MAX_TOASTS {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast { level, message, shown_at: now });
        true
    }

    pub fn expire(&mut self, now: f64) {
        self.queue.retain(|t| {
            let alive = now - t.shown_at < TOAST_LIFETIME_SECS;
            if !alive {
                trace!("HUD: {:?} toast expired: {}", t.level, t.message);
            }
            alive
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

pub fn expire_notifications_system(time: Res<Time>, mut notifications: ResMut<Notifications>) {
    let now = time.elapsed_secs_f64();
    if notifications.iter().any(|t| now - t.shown_at >= TOAST_LIFETIME_SECS) {
        notifications.expire(now);
    }
}
