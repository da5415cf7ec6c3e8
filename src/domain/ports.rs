use crate::domain::arena::Arena;
use crate::domain::state::Overlap;

// Port for the physics collaborator.
//
// `step` integrates every enabled body in the arena by `dt` seconds, updates
// `touching_ground`, and reports the pairs whose boxes intersect afterwards.
// It may move bodies but must not change any game state.
pub trait PhysicsWorld: Send {
    fn step(&mut self, arena: &mut Arena, dt: f32) -> Vec<Overlap>;
}
