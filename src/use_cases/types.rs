// Use-case level inputs/outputs for the game loop.

use crate::domain::systems::effects::Effect;
use crate::domain::{EntityId, InputSignals, MonsterSnapshot, PlayerSnapshot, ProjectileSnapshot};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum GameEvent {
    Input {
        player_id: EntityId,
        input: InputSignals,
    },
    EndSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Starting { in_seconds: u32 },
    Running,
    Ended,
}

/// Named animation picked for one live entity this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSelection {
    pub entity_id: EntityId,
    pub state: String,
}

#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub tick: u64,
    /// Simulated time at the end of the tick.
    pub time: Duration,
    pub players: Vec<PlayerSnapshot>,
    pub monsters: Vec<MonsterSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub animations: Vec<AnimationSelection>,
    pub effects: Vec<Effect>,
}
