//! Fixed-arity value types used throughout the document model
//!
//! This module defines the small `Copy` tuples that every node carries:
//! - [`Vec3`]: 3D position or scale
//! - [`Quaternion`]: rotation as (x, y, z, w)
//! - [`Color`]: linear RGBA color
//! - [`Transform`]: position, rotation and scale of a node
//!
//! None of these have identity; they are copied by value. All components are
//! `f32`, matching the 32-bit floats stored on the wire.

use serde::{Deserialize, Serialize};

/// 3-component float vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// All components zero
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// All components one
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    /// Components in storage order
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self {
        Vec3::new(a[0], a[1], a[2])
    }
}

/// Rotation quaternion stored as (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W (scalar) component
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion from its components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Quaternion { x, y, z, w }
    }

    /// Components in storage order (x, y, z, w)
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(a: [f32; 4]) -> Self {
        Quaternion::new(a[0], a[1], a[2], a[3])
    }
}

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from its components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Components in storage order (r, g, b, a)
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(a: [f32; 4]) -> Self {
        Color::new(a[0], a[1], a[2], a[3])
    }
}

/// Position, rotation and scale of a node
///
/// The default is the identity transform: zero position, identity rotation,
/// unit scale. On the wire a transform equal to the identity is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub pos: Vec3,
    /// Rotation
    pub rot: Quaternion,
    /// Non-uniform scale
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform
    pub const IDENTITY: Transform = Transform {
        pos: Vec3::ZERO,
        rot: Quaternion::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform from its parts
    pub const fn new(pos: Vec3, rot: Quaternion, scale: Vec3) -> Self {
        Transform { pos, rot, scale }
    }

    /// Identity transform moved to `pos`
    pub fn from_position(pos: Vec3) -> Self {
        Transform {
            pos,
            ..Transform::IDENTITY
        }
    }

    /// Returns true if every component equals the identity's
    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}
