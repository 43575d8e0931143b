//! # Game Error Types

use std::path::PathBuf;

use kiln_core::RegistryError;
use thiserror::Error;

/// Errors that can occur in the game layer.
#[derive(Error, Debug)]
pub enum GameError {
    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A texture could not be loaded.
    #[error("failed to load asset {asset_id} from {}: {reason}", path.display())]
    Asset {
        /// Asset id the texture was requested under.
        asset_id: String,
        /// File the texture was read from.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Invalid game configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The global log subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// Filesystem failure outside asset loading.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
