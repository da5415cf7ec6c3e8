pub mod combat;
pub mod effects;
pub mod lifecycle;
pub mod player_controller;
pub mod projectiles;
