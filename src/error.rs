//! Centralized error types for the platformer.
//!
//! Gameplay failures (spikes, enemies, falling) are scene transitions and never
//! show up here; these types cover broken invariants and bad configuration.

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// Systems that hit a non-fatal problem write this as an event instead of
/// aborting the frame.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while decoding or instantiating a level.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// A runtime spawn asked for a tile the legend does not define.
    #[error("Tile '{0}' is not in the legend")]
    UnknownTile(char),

    #[error("Level layout has no rows")]
    EmptyLayout,

    #[error("Level {0} does not exist")]
    LevelNotFound(usize),
}

/// Errors related to entity lookups during reactions.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EntityError {
    #[error("Entity {0} has no tile cell")]
    MissingTileCell(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
