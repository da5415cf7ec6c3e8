//! Gameplay tuning for pooled projectiles.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Horizontal muzzle speed in pixels per second.
    pub muzzle_speed: f32,

    /// Number of projectiles shared by every shooter in the session.
    pub pool_capacity: usize,

    /// World-space box size in pixels.
    pub width: f32,
    pub height: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            muzzle_speed: 750.0,
            pool_capacity: 40,
            width: 16.0,
            height: 16.0,
        }
    }
}
