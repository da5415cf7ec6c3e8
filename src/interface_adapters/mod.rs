// Interface adapters: host protocol, stdio streams and the physics collaborator.

pub mod physics;
pub mod protocol;
pub mod stdio;
