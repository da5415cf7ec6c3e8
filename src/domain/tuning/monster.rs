//! Gameplay tuning for monsters. Monsters hold stats only; they do not move.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonsterTuning {
    /// Hits needed to bring the monster down.
    pub health: u32,

    /// Animation selected while the monster is active.
    pub idle_animation: String,

    /// Length of the death animation before the monster is removed.
    pub death_animation_ms: u64,

    /// Number of chunks thrown when the monster is removed.
    pub gib_count: u32,
}

impl MonsterTuning {
    pub fn death_animation(&self) -> Duration {
        Duration::from_millis(self.death_animation_ms)
    }
}

impl Default for MonsterTuning {
    fn default() -> Self {
        Self {
            health: 1,
            idle_animation: "attack".to_string(),
            // 6 frames at 50 fps.
            death_animation_ms: 120,
            gib_count: 8,
        }
    }
}
