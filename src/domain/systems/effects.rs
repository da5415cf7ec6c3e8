use crate::domain::state::EntityId;
use serde::Serialize;

/// Cosmetic or bookkeeping event published by a tick. Nothing reads it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Effect {
    /// Explosion where a projectile hit something.
    Impact { x: f32, y: f32 },
    /// Particle burst thrown when a body is removed from play.
    Gibs {
        source: EntityId,
        x: f32,
        y: f32,
        count: u32,
    },
    /// A collectible was picked up; scoring happens outside the simulation.
    Collected {
        player_id: EntityId,
        collectible_id: EntityId,
    },
}

/// Tick-local queue of effects. The core decides when and where; rendering is elsewhere.
#[derive(Debug, Default)]
pub struct EffectsSpawner {
    pending: Vec<Effect>,
}

impl EffectsSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_impact_effect(&mut self, x: f32, y: f32) {
        self.pending.push(Effect::Impact { x, y });
    }

    pub fn spawn_gib_effect(&mut self, source: EntityId, x: f32, y: f32, count: u32) {
        self.pending.push(Effect::Gibs {
            source,
            x,
            y,
            count,
        });
    }

    pub fn collected(&mut self, player_id: EntityId, collectible_id: EntityId) {
        self.pending.push(Effect::Collected {
            player_id,
            collectible_id,
        });
    }

    pub fn pending(&self) -> &[Effect] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }
}
