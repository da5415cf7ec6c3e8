// Use cases layer: application workflows for the simulation.

pub mod game;
pub mod session;
pub mod types;

pub use game::{WorldSettings, world_task};
pub use session::Session;
pub use types::{AnimationSelection, GameEvent, SessionState, WorldUpdate};
