use std::fmt;

// Domain-level errors for session setup. The simulation itself has none.
#[derive(Debug)]
pub enum SessionError {
    NoPlayers,
    EmptyProjectilePool,
    InvalidWorldBounds,
    InvalidBody { what: String },
    InvalidMonster { what: String },
    ZeroTickInterval,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoPlayers => write!(f, "session needs at least one player"),
            SessionError::EmptyProjectilePool => write!(f, "projectile pool capacity must be > 0"),
            SessionError::InvalidWorldBounds => write!(f, "world bounds are empty"),
            SessionError::InvalidBody { what } => write!(f, "{what} has a non-positive size"),
            SessionError::InvalidMonster { what } => write!(f, "{what} starts without health"),
            SessionError::ZeroTickInterval => write!(f, "tick interval must be > 0"),
        }
    }
}

impl std::error::Error for SessionError {}
