// src/hud/events.rs

use bevy::prelude::*;

/// Lock requests forwarded to the FOV provider.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FovCommand {
    Lock,
    Unlock,
    Toggle,
}

/// The overlay window was closed. Pending settings are saved on this.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct OverlayClosed;

/// The lock state observed by the poll system flipped.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockStateChanged {
    pub locked: bool,
}
