//! Per-session layout and tuning.
//!
//! Every player, monster and fixture in a session is described here, so player
//! variants differ only in data. Missing keys fall back to the defaults, which
//! reproduce the two-player lava stage.

use super::monster::MonsterTuning;
use super::player::PlayerTuning;
use super::projectile::ProjectileTuning;
use crate::domain::errors::SessionError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        // 800x600 stage with 500px of sky above it.
        Self {
            min_x: 0.0,
            max_x: 800.0,
            min_y: -500.0,
            max_y: 600.0,
        }
    }
}

/// Box placed in the world. `x`/`y` is the bottom-centre anchor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub animation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonsterSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub tuning: MonsterTuning,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub world: WorldBounds,
    pub projectile: ProjectileTuning,
    pub players: Vec<PlayerTuning>,
    pub hazards: Vec<FixtureSpec>,
    pub obstacles: Vec<FixtureSpec>,
    pub monsters: Vec<MonsterSpec>,
    pub collectibles: Vec<FixtureSpec>,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.players.is_empty() {
            return Err(SessionError::NoPlayers);
        }
        if self.projectile.pool_capacity == 0 {
            return Err(SessionError::EmptyProjectilePool);
        }
        if self.world.min_x >= self.world.max_x || self.world.min_y >= self.world.max_y {
            return Err(SessionError::InvalidWorldBounds);
        }
        for (index, p) in self.players.iter().enumerate() {
            if p.body_width <= 0.0 || p.body_height <= 0.0 || p.body_height_squat <= 0.0 {
                return Err(SessionError::InvalidBody {
                    what: format!("player #{index}"),
                });
            }
        }
        let fixtures = self
            .hazards
            .iter()
            .chain(&self.obstacles)
            .chain(&self.collectibles);
        for f in fixtures {
            if f.width <= 0.0 || f.height <= 0.0 {
                return Err(SessionError::InvalidBody {
                    what: format!("fixture at ({}, {})", f.x, f.y),
                });
            }
        }
        for m in &self.monsters {
            if m.width <= 0.0 || m.height <= 0.0 {
                return Err(SessionError::InvalidBody {
                    what: format!("monster at ({}, {})", m.x, m.y),
                });
            }
            // A monster must be able to lose its last health point to ever die.
            if m.tuning.health == 0 {
                return Err(SessionError::InvalidMonster {
                    what: format!("monster at ({}, {})", m.x, m.y),
                });
            }
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let platform = |x: f32, top: f32| FixtureSpec {
            x,
            y: top + 24.0,
            width: 180.0,
            height: 24.0,
            animation: None,
        };

        Self {
            world: WorldBounds::default(),
            projectile: ProjectileTuning::default(),
            players: vec![
                PlayerTuning::default(),
                PlayerTuning {
                    respawn_y: 300.0,
                    ..PlayerTuning::default()
                },
            ],
            hazards: vec![
                FixtureSpec {
                    x: 400.0,
                    y: 311.0,
                    width: 50.0,
                    height: 80.0,
                    animation: Some("flame".to_string()),
                },
                // Lava strip along the bottom of the stage.
                FixtureSpec {
                    x: 400.0,
                    y: 650.0,
                    width: 800.0,
                    height: 100.0,
                    animation: None,
                },
            ],
            obstacles: vec![
                platform(100.0, 450.0),
                platform(700.0, 450.0),
                platform(400.0, 300.0),
                platform(50.0, 150.0),
                platform(750.0, 150.0),
            ],
            monsters: vec![MonsterSpec {
                x: 400.0,
                y: 300.0,
                width: 120.0,
                height: 120.0,
                tuning: MonsterTuning::default(),
            }],
            collectibles: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_defaults_are_used_then_config_is_valid() {
        let config = SessionConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.players.len(), 2);
    }

    #[test]
    fn when_no_players_are_configured_then_validation_fails() {
        let config = SessionConfig {
            players: Vec::new(),
            ..SessionConfig::default()
        };

        assert!(matches!(config.validate(), Err(SessionError::NoPlayers)));
    }

    #[test]
    fn when_pool_is_empty_then_validation_fails() {
        let mut config = SessionConfig::default();
        config.projectile.pool_capacity = 0;

        assert!(matches!(
            config.validate(),
            Err(SessionError::EmptyProjectilePool)
        ));
    }

    #[test]
    fn when_monster_has_no_size_then_validation_fails() {
        let mut config = SessionConfig::default();
        config.monsters[0].width = 0.0;

        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidBody { .. })
        ));
    }

    #[test]
    fn when_monster_has_no_health_then_validation_fails() {
        let mut config = SessionConfig::default();
        config.monsters[0].tuning.health = 0;

        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidMonster { .. })
        ));
    }
}
