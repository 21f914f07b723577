use thiserror::Error;

use super::types::Direction;

/// Errors that can arise while loading a world or running a session.
#[derive(Debug, Error)]
pub enum GameError {
    /// A scenario id (current location or move destination) does not resolve.
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    /// The current scenario has no exit in the requested direction.
    #[error("no exit leading {0}")]
    NoExit(Direction),

    /// The move would cost more time than the player has left.
    #[error("not enough time: need {needed}, have {available}")]
    InsufficientTime { needed: i32, available: i32 },

    /// A session was started without a loaded world.
    #[error("no world loaded")]
    WorldNotLoaded,

    /// An action was issued against a session that already ended.
    #[error("session is over")]
    SessionOver,

    /// Wrapper around IO errors (world files, config files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A world file row that could not be understood.
    #[error("bad world data at line {line}: {reason}")]
    WorldFormat { line: usize, reason: String },

    /// Wrapper around JSON seed deserialization errors.
    #[error("world seed error: {0}")]
    WorldParse(#[from] serde_json::Error),
}
