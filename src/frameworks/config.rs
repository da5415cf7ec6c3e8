use crate::domain::errors::SessionError;
use crate::domain::tuning::session::SessionConfig;
use std::{env, fmt, path::Path, path::PathBuf, time::Duration};

// Runtime constants (not gameplay tuning).

pub fn tick_interval() -> Duration {
    let millis = env::var("TICK_INTERVAL_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(16);
    Duration::from_millis(millis)
}

pub fn start_countdown() -> Duration {
    let secs = env::var("START_COUNTDOWN_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(3);
    Duration::from_secs(secs)
}

// 0 disables the time limit.
pub fn session_time_limit() -> Duration {
    let secs = env::var("SESSION_TIME_LIMIT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    Duration::from_secs(secs)
}

pub fn session_config_path() -> Option<PathBuf> {
    env::var("SESSION_CONFIG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(SessionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read session config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse session config: {e}"),
            ConfigError::Invalid(e) => write!(f, "invalid session config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parses a JSON session layout. Keys that are left out keep their defaults.
pub fn parse_session_config(text: &str) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = serde_json::from_str(text).map_err(ConfigError::Parse)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Loads the session layout from `path`, or the built-in stage when unset.
pub fn load_session_config(path: Option<&Path>) -> Result<SessionConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_session_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_config_overrides_some_fields_then_the_rest_keep_defaults() {
        let config = parse_session_config(
            r#"{
                "projectile": { "pool_capacity": 5 },
                "players": [ { "respawn_x": 250.0 } ]
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.projectile.pool_capacity, 5);
        assert_eq!(config.projectile.muzzle_speed, 750.0);
        assert_eq!(config.players.len(), 1);
        assert_eq!(config.players[0].respawn_x, 250.0);
        assert_eq!(config.players[0].fire_cooldown_ms, 300);
        assert_eq!(config.monsters.len(), 1);
    }

    #[test]
    fn when_config_has_no_players_then_it_is_invalid() {
        let result = parse_session_config(r#"{ "players": [] }"#);

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(SessionError::NoPlayers))
        ));
    }

    #[test]
    fn when_monster_starts_without_health_then_config_is_rejected() {
        let result = parse_session_config(
            r#"{ "monsters": [ { "x": 400.0, "y": 300.0, "width": 120.0, "height": 120.0,
                                "tuning": { "health": 0 } } ] }"#,
        );

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(SessionError::InvalidMonster { .. }))
        ));
    }

    #[test]
    fn when_config_is_not_json_then_parse_fails() {
        assert!(matches!(
            parse_session_config("players = 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn when_no_path_is_given_then_builtin_stage_is_used() {
        let config = load_session_config(None).expect("defaults are valid");

        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn when_file_is_missing_then_io_error_is_reported() {
        let result = load_session_config(Some(Path::new("/nonexistent/arena.json")));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
