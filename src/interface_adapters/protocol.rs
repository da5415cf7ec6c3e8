// Wire protocol DTOs for the JSON-lines host adapter.

use crate::domain::systems::effects::Effect;
use crate::domain::{EntityId, InputSignals, MonsterSnapshot, PlayerSnapshot, ProjectileSnapshot};
use crate::use_cases::{AnimationSelection, GameEvent, SessionState, WorldUpdate};
use serde::{Deserialize, Serialize};

/// Lines the simulation writes for the host.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Snapshot of the world after a tick.
    WorldUpdate(WorldUpdateDto),
    // Session lifecycle transitions (countdown, running, ended).
    SessionState(SessionStateDto),
}

/// Lines the host writes to drive the simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Latest key state for one player; it stays latched until replaced.
    Input(PlayerInputDto),
    End,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInputDto {
    pub player_id: EntityId,
    // Keys sit next to `player_id` on the wire; missing ones are released.
    #[serde(flatten)]
    pub input: InputSignals,
}

impl From<ClientMessage> for GameEvent {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::Input(dto) => GameEvent::Input {
                player_id: dto.player_id,
                input: dto.input,
            },
            ClientMessage::End => GameEvent::EndSession,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub time_ms: u64,
    pub players: Vec<PlayerSnapshot>,
    pub monsters: Vec<MonsterSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub animations: Vec<AnimationDto>,
    pub effects: Vec<Effect>,
}

impl From<WorldUpdate> for WorldUpdateDto {
    fn from(update: WorldUpdate) -> Self {
        Self {
            tick: update.tick,
            time_ms: update.time.as_millis() as u64,
            players: update.players,
            monsters: update.monsters,
            projectiles: update.projectiles,
            animations: update.animations.into_iter().map(AnimationDto::from).collect(),
            effects: update.effects,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimationDto {
    pub entity_id: EntityId,
    pub state: String,
}

impl From<AnimationSelection> for AnimationDto {
    fn from(selection: AnimationSelection) -> Self {
        Self {
            entity_id: selection.entity_id,
            state: selection.state,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum SessionStateDto {
    Starting { in_seconds: u32 },
    Running,
    Ended,
}

impl From<SessionState> for SessionStateDto {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Starting { in_seconds } => SessionStateDto::Starting { in_seconds },
            SessionState::Running => SessionStateDto::Running,
            SessionState::Ended => SessionStateDto::Ended,
        }
    }
}
