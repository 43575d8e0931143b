//! # Game Systems
//!
//! Movement integrates velocity into position. Rendering turns every
//! transform + sprite pair into a [`DrawCommand`] on a [`Canvas`].
//!
//! Both systems live inside the registry, so their per-frame entry points are
//! associated functions that look themselves up, copy the member list, and
//! then touch components.

use kiln_core::{ComponentTypes, Registry, RegistryResult, System, SystemBase};

use crate::assets::{AssetStore, TextureLoader};
use crate::components::{Rect, RigidBody, Sprite, Transform};

// ============================================================================
// CANVAS
// ============================================================================

/// One textured quad to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Asset id of the texture.
    pub texture: String,
    /// Region of the texture.
    pub src: Rect,
    /// Destination on screen.
    pub dst: Rect,
    /// Rotation in degrees.
    pub rotation: f64,
}

/// Render target.
pub trait Canvas {
    /// Clears the frame.
    fn clear(&mut self);

    /// Queues one quad.
    fn draw(&mut self, command: DrawCommand);

    /// Shows the finished frame.
    fn present(&mut self) {}
}

/// Canvas that keeps the commands of the last frame and counts presented frames.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    /// Commands drawn since the last clear.
    pub commands: Vec<DrawCommand>,
    /// Number of presented frames.
    pub frames: u64,
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

// ============================================================================
// MOVEMENT
// ============================================================================

/// Moves entities with a [`Transform`] and a [`RigidBody`].
pub struct MovementSystem {
    base: SystemBase,
}

impl MovementSystem {
    /// Creates the system, registering its component types.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has no room for the component types.
    pub fn new(types: &mut ComponentTypes) -> RegistryResult<Self> {
        let mut base = SystemBase::new();
        base.require_component::<Transform>(types)?
            .require_component::<RigidBody>(types)?;
        Ok(Self { base })
    }

    /// Advances every member by `velocity * dt`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SystemNotFound`](kiln_core::RegistryError) if
    /// the system is not registered.
    pub fn run(registry: &mut Registry, dt: f64) -> RegistryResult<()> {
        let members = registry.get_system::<Self>()?.members().to_vec();

        for entity in members {
            let velocity = registry.get_component::<RigidBody>(entity)?.velocity;
            registry.get_component_mut::<Transform>(entity)?.position += velocity * dt;
        }
        Ok(())
    }
}

impl System for MovementSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "MovementSystem"
    }
}

// ============================================================================
// RENDER
// ============================================================================

/// Draws entities with a [`Transform`] and a [`Sprite`].
pub struct RenderSystem {
    base: SystemBase,
}

impl RenderSystem {
    /// Creates the system, registering its component types.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has no room for the component types.
    pub fn new(types: &mut ComponentTypes) -> RegistryResult<Self> {
        let mut base = SystemBase::new();
        base.require_component::<Transform>(types)?
            .require_component::<Sprite>(types)?;
        Ok(Self { base })
    }

    /// Draws every member whose texture is loaded, in member order.
    ///
    /// Sprites whose asset id is not in `assets` are skipped with a warning.
    ///
    /// # Returns
    ///
    /// Number of quads drawn.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SystemNotFound`](kiln_core::RegistryError) if
    /// the system is not registered.
    pub fn run<L: TextureLoader, C: Canvas>(
        registry: &Registry,
        assets: &AssetStore<L>,
        canvas: &mut C,
    ) -> RegistryResult<usize> {
        let mut drawn = 0;
        for &entity in registry.get_system::<Self>()?.members() {
            let transform = registry.get_component::<Transform>(entity)?;
            let sprite = registry.get_component::<Sprite>(entity)?;

            if !assets.contains(&sprite.asset_id) {
                tracing::warn!(%entity, asset_id = %sprite.asset_id, "sprite texture not loaded");
                continue;
            }

            canvas.draw(DrawCommand {
                texture: sprite.asset_id.clone(),
                src: sprite.src_rect,
                dst: destination(transform, sprite),
                rotation: transform.rotation,
            });
            drawn += 1;
        }
        Ok(drawn)
    }
}

impl System for RenderSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "RenderSystem"
    }
}

/// Screen rectangle: position truncated to pixels, size scaled by the transform.
#[allow(clippy::cast_possible_truncation)]
fn destination(transform: &Transform, sprite: &Sprite) -> Rect {
    Rect::new(
        transform.position.x as i32,
        transform.position.y as i32,
        (f64::from(sprite.width) * transform.scale.x) as i32,
        (f64::from(sprite.height) * transform.scale.y) as i32,
    )
}
