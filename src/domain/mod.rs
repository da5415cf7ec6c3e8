// Domain layer: core simulation types and rules.

pub mod arena;
pub mod errors;
pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use arena::Arena;
pub use state::{
    AnimState, Body, EntityId, EntityRef, Facing, Group, InputSignals, Life, MonsterSnapshot,
    Overlap, PlayerSnapshot, ProjectileSnapshot,
};
