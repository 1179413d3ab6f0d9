//! Error types for game construction.

use thiserror::Error;

use crate::game::ImageId;

/// Convenient result alias for fallible game setup.
pub type Result<T> = std::result::Result<T, GameError>;

/// Broken setup contracts. These abort construction; nothing at runtime
/// produces them once a [`GameState`](crate::game::GameState) exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// An entity needs an image the sprite sheet does not provide.
    #[error("no sprite bound for {0:?}")]
    MissingSprite(ImageId),
    /// Screen geometry cannot hold the play field.
    #[error("invalid screen geometry: {msg}")]
    InvalidGeometry {
        /// What was wrong with the configuration.
        msg: String,
    },
}
