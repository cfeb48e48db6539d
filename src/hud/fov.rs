// src/hud/fov.rs
//! Boundary to the native FOV plugin.
//!
//! The plugin owns FOV conversion, memory patching and the lock itself. The
//! HUD only reads its state and forwards lock commands.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovReading {
    /// Value as the engine stores it (radians on most hosts).
    pub raw: f32,
    /// Value in degrees as shown to the player.
    pub display: f32,
}

pub trait FovProvider: Send + Sync + 'static {
    /// `None` while no camera is available.
    fn current(&self) -> Option<FovReading>;
    fn lock(&mut self) -> bool;
    fn unlock(&mut self) -> bool;
    fn is_locked(&self) -> bool;
    fn is_patching_allowed(&self) -> bool;

    fn toggle(&mut self) -> bool {
        if self.is_locked() {
            self.unlock()
        } else {
            self.lock()
        }
    }

    fn name(&self) -> &'static str;
}

/// Used when the native plugin is not loaded.
#[derive(Debug, Default)]
pub struct DetachedFov;

impl FovProvider for DetachedFov {
    fn current(&self) -> Option<FovReading> {
        None
    }

    fn lock(&mut self) -> bool {
        false
    }

    fn unlock(&mut self) -> bool {
        false
    }

    fn is_locked(&self) -> bool {
        false
    }

    fn is_patching_allowed(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "detached"
    }
}

/// In-process stand-in for the native plugin.
#[derive(Debug, Clone)]
pub struct SimulatedFov {
    pub display_degrees: f32,
    pub locked: bool,
    pub patching_allowed: bool,
}

impl Default for SimulatedFov {
    fn default() -> Self {
        Self {
            display_degrees: 90.0,
            locked: false,
            patching_allowed: true,
        }
    }
}

impl FovProvider for SimulatedFov {
    fn current(&self) -> Option<FovReading> {
        Some(FovReading {
            raw: self.display_degrees.to_radians(),
            display: self.display_degrees,
        })
    }

    fn lock(&mut self) -> bool {
        if !self.patching_allowed {
            return false;
        }
        self.locked = true;
        true
    }

    fn unlock(&mut self) -> bool {
        if !self.patching_allowed {
            return false;
        }
        self.locked = false;
        true
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn is_patching_allowed(&self) -> bool {
        self.patching_allowed
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[derive(Resource)]
pub struct FovSource(pub Box<dyn FovProvider>);

impl FovSource {
    pub fn new(provider: impl FovProvider) -> Self {
        Self(Box::new(provider))
    }
}

impl Default for FovSource {
    fn default() -> Self {
        Self::new(DetachedFov)
    }
}

impl std::ops::Deref for FovSource {
    type Target = dyn FovProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for FovSource {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
