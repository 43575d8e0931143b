//! # KILN Game Layer
//!
//! Collaborators that consume the [`kiln_core`] registry:
//! - [`components`]: 2D transform, rigid body and sprite data
//! - [`systems`]: movement integration and sprite rendering
//! - [`assets`]: texture cache keyed by asset id
//! - [`logging`]: subscriber setup and an in-memory log history
//! - [`game`]: configuration and the fixed-timestep loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use kiln::{Game, GameConfig, RecordingCanvas};
//!
//! let mut game = Game::new(GameConfig::from_toml_file("kiln.toml")?)?;
//! game.setup()?;
//! let frames = game.run_headless(&mut RecordingCanvas::default())?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assets;
pub mod components;
pub mod error;
pub mod game;
pub mod logging;
pub mod systems;

pub use assets::{AssetStore, FileTextureLoader, Texture, TextureLoader};
pub use components::{Rect, RigidBody, Sprite, Transform, Vec2};
pub use error::{GameError, GameResult};
pub use game::{AssetEntry, Game, GameConfig, RunSummary, SpawnBlueprint, SpriteBlueprint};
pub use logging::{init_logging, LogEntry, LogHistory, LogLevel};
pub use systems::{Canvas, DrawCommand, MovementSystem, RecordingCanvas, RenderSystem};
