//! # 2D Components
//!
//! Plain data attached to entities through the registry. Transforms and rigid
//! bodies can be written directly in a level file.

use std::ops::{Add, AddAssign, Mul};

use kiln_core::Component;
use serde::Deserialize;

/// 2D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// One on both axes
    pub const ONE: Self = Self::new(1.0, 1.0);
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Integer rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Position, scale and rotation of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World position.
    pub position: Vec2,
    /// Scale factor per axis.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Component for Transform {}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

impl Transform {
    /// Creates a transform.
    #[must_use]
    pub const fn new(position: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    /// Unscaled, unrotated transform at `position`.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self::new(position, Vec2::ONE, 0.0)
    }
}

/// Linear velocity of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RigidBody {
    /// World units per second.
    pub velocity: Vec2,
}

impl Component for RigidBody {}

impl RigidBody {
    /// Creates a rigid body moving at `velocity`.
    #[must_use]
    pub const fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// Textured quad drawn at the entity's transform.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Id of the texture in the asset store.
    pub asset_id: String,
    /// Width in pixels before scaling.
    pub width: i32,
    /// Height in pixels before scaling.
    pub height: i32,
    /// Region of the texture to draw.
    pub src_rect: Rect,
}

impl Component for Sprite {}

impl Sprite {
    /// Creates a sprite drawing the top-left `width` x `height` region of `asset_id`.
    #[must_use]
    pub fn new(asset_id: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            src_rect: Rect::new(0, 0, width, height),
        }
    }

    /// Moves the source region origin to (`x`, `y`).
    #[must_use]
    pub fn with_source(mut self, x: i32, y: i32) -> Self {
        self.src_rect.x = x;
        self.src_rect.y = y;
        self
    }
}
