//! # Game Loop
//!
//! Owns the registry and the asset store, spawns the level described by a
//! [`GameConfig`], and drives frames at a fixed timestep:
//!
//! ```text
//! tick(dt):    registry.update() -> MovementSystem::run(dt)
//! render():    canvas.clear() -> RenderSystem::run() -> canvas.present()
//! ```
//!
//! There is no window here. A real backend implements [`Canvas`]; tests and
//! the `kiln` binary use [`RecordingCanvas`](crate::RecordingCanvas).

use std::path::{Path, PathBuf};

use kiln_core::{Entity, Registry, RegistryConfig};
use serde::Deserialize;

use crate::assets::{AssetStore, FileTextureLoader, TextureLoader};
use crate::components::{RigidBody, Sprite, Transform};
use crate::error::{GameError, GameResult};
use crate::systems::{Canvas, MovementSystem, RenderSystem};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Texture to load before the first frame.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    /// Id sprites refer to.
    pub id: String,
    /// File to load.
    pub path: PathBuf,
}

/// Sprite as written in a level file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteBlueprint {
    /// Texture id.
    pub asset_id: String,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Source region left edge.
    #[serde(default)]
    pub src_x: i32,
    /// Source region top edge.
    #[serde(default)]
    pub src_y: i32,
}

impl From<&SpriteBlueprint> for Sprite {
    fn from(blueprint: &SpriteBlueprint) -> Self {
        Sprite::new(blueprint.asset_id.clone(), blueprint.width, blueprint.height)
            .with_source(blueprint.src_x, blueprint.src_y)
    }
}

/// Entity spawned during [`Game::setup`]. Absent components are not attached.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnBlueprint {
    /// Optional transform.
    pub transform: Option<Transform>,
    /// Optional rigid body.
    pub rigid_body: Option<RigidBody>,
    /// Optional sprite.
    pub sprite: Option<SpriteBlueprint>,
}

/// Game configuration, usually read from a TOML level file.
///
/// ```toml
/// target_fps = 60
/// max_frames = 120
///
/// [registry]
/// max_component_types = 32
///
/// [[assets]]
/// id = "tank-image"
/// path = "assets/tank.png"
///
/// [[spawns]]
/// transform = { position = { x = 10.0, y = 30.0 } }
/// rigid_body = { velocity = { x = 40.0, y = 0.0 } }
/// sprite = { asset_id = "tank-image", width = 32, height = 32 }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Fixed simulation rate.
    pub target_fps: u32,
    /// Frames run by [`Game::run_headless`].
    pub max_frames: u64,
    /// Registry sizing.
    pub registry: RegistryConfig,
    /// Textures to load.
    pub assets: Vec<AssetEntry>,
    /// Entities to spawn.
    pub spawns: Vec<SpawnBlueprint>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            target_fps: 60,
            max_frames: 60,
            registry: RegistryConfig::default(),
            assets: Vec::new(),
            spawns: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the text does not parse or a value is
    /// out of range.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a level file.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Io`] if the file cannot be read, otherwise as
    /// [`GameConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] for a zero frame rate or window size, and
    /// the registry's error for an invalid `[registry]` table.
    pub fn validate(&self) -> GameResult<()> {
        if self.target_fps == 0 {
            return Err(GameError::Config("target_fps must be greater than 0".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(GameError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        self.registry.validate()?;
        Ok(())
    }

    /// Seconds per frame.
    #[must_use]
    pub fn frame_time(&self) -> f64 {
        1.0 / f64::from(self.target_fps)
    }
}

// ============================================================================
// GAME
// ============================================================================

/// Totals of a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames simulated and rendered.
    pub frames: u64,
    /// Quads drawn over all frames.
    pub draws: u64,
    /// Live entities after the last frame.
    pub alive: usize,
}

/// Registry, assets and level.
pub struct Game<L: TextureLoader = FileTextureLoader> {
    config: GameConfig,
    registry: Registry,
    assets: AssetStore<L>,
    spawned: Vec<Entity>,
}

impl Game<FileTextureLoader> {
    /// Creates a game that loads textures from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_loader(config, FileTextureLoader)
    }
}

impl<L: TextureLoader> Game<L> {
    /// Creates a game that loads textures through `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_loader(config: GameConfig, loader: L) -> GameResult<Self> {
        config.validate()?;
        let registry = Registry::new(config.registry.clone())?;

        tracing::info!(
            width = config.window_width,
            height = config.window_height,
            fps = config.target_fps,
            "game created"
        );

        Ok(Self {
            config,
            registry,
            assets: AssetStore::new(loader),
            spawned: Vec::new(),
        })
    }

    /// Registers the systems, loads the textures and spawns the level.
    ///
    /// Spawned entities are active once this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if a texture fails to load or a system is already registered.
    pub fn setup(&mut self) -> GameResult<()> {
        self.registry.add_system(MovementSystem::new)?;
        self.registry.add_system(RenderSystem::new)?;

        for asset in &self.config.assets {
            self.assets.add_texture(&asset.id, &asset.path)?;
        }

        for blueprint in &self.config.spawns {
            let entity = self.registry.try_create_entity()?;
            let mut handle = self.registry.entity_mut(entity);
            if let Some(transform) = blueprint.transform {
                handle.add_component(transform)?;
            }
            if let Some(rigid_body) = blueprint.rigid_body {
                handle.add_component(rigid_body)?;
            }
            if let Some(sprite) = &blueprint.sprite {
                handle.add_component(Sprite::from(sprite))?;
            }
            self.spawned.push(entity);
        }

        self.registry.update();
        tracing::info!(
            entities = self.spawned.len(),
            textures = self.assets.len(),
            "level loaded"
        );
        Ok(())
    }

    /// Reconciles pending entities and advances movement by `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Game::setup`] has not run.
    pub fn tick(&mut self, dt: f64) -> GameResult<()> {
        self.registry.update();
        MovementSystem::run(&mut self.registry, dt)?;
        Ok(())
    }

    /// Draws one frame onto `canvas`.
    ///
    /// # Returns
    ///
    /// Number of quads drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Game::setup`] has not run.
    pub fn render<C: Canvas>(&self, canvas: &mut C) -> GameResult<usize> {
        canvas.clear();
        let drawn = RenderSystem::run(&self.registry, &self.assets, canvas)?;
        canvas.present();
        Ok(drawn)
    }

    /// Runs `max_frames` frames at `1 / target_fps` without waiting between them.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Game::tick`] or [`Game::render`].
    pub fn run_headless<C: Canvas>(&mut self, canvas: &mut C) -> GameResult<RunSummary> {
        let dt = self.config.frame_time();
        let mut summary = RunSummary::default();

        for _ in 0..self.config.max_frames {
            self.tick(dt)?;
            summary.draws += self.render(canvas)? as u64;
            summary.frames += 1;
        }

        summary.alive = self.registry.alive_count();
        tracing::info!(
            frames = summary.frames,
            draws = summary.draws,
            alive = summary.alive,
            "headless run finished"
        );
        Ok(summary)
    }

    /// Configuration the game was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The entity registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The entity registry, mutably.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Loaded textures.
    #[must_use]
    pub fn assets(&self) -> &AssetStore<L> {
        &self.assets
    }

    /// Entities spawned from the level, in file order.
    #[must_use]
    pub fn spawned(&self) -> &[Entity] {
        &self.spawned
    }
}
