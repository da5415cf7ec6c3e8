//! Gameplay tuning for side-scrolling player characters.
//!
//! Keep this separate from runtime configuration (tick rates, buffer sizes, etc.).

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal walking speed in pixels per second.
    pub velocity_x: f32,

    /// Upward speed applied when a jump starts, in pixels per second.
    pub velocity_jump: f32,

    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,

    /// Hitbox size in world pixels, standing and squatting.
    pub body_width: f32,
    pub body_height: f32,
    pub body_height_squat: f32,

    /// Where the player appears on session start and after each respawn.
    pub respawn_x: f32,
    pub respawn_y: f32,

    /// Projectile spawn point relative to the feet, mirrored by facing.
    pub muzzle_offset_x: f32,
    pub muzzle_offset_y: f32,

    /// Minimum time between two shots.
    pub fire_cooldown_ms: u64,

    /// Upward speed of the little hop played on death.
    pub death_hop_velocity: f32,

    /// Length of the death animation before the body is removed.
    pub death_animation_ms: u64,

    /// Number of chunks thrown when the body is removed.
    pub gib_count: u32,
}

impl PlayerTuning {
    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }

    pub fn death_animation(&self) -> Duration {
        Duration::from_millis(self.death_animation_ms)
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            velocity_x: 350.0,
            velocity_jump: 800.0,
            gravity: 1500.0,
            body_width: 30.0,
            body_height: 84.0,
            body_height_squat: 38.4,
            respawn_x: 100.0,
            respawn_y: 100.0,
            muzzle_offset_x: 45.0,
            muzzle_offset_y: 75.0,
            fire_cooldown_ms: 300,
            death_hop_velocity: 100.0,
            // 3 frames at 15 fps.
            death_animation_ms: 200,
            gib_count: 10,
        }
    }
}
