pub mod monster;
pub mod player;
pub mod projectile;
pub mod session;
