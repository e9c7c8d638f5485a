//! Brush style attached to every stroke line

use serde::{Deserialize, Serialize};

/// Shape of the brush tip used to render a stroke
///
/// Values outside the known set are kept as [`BrushType::Other`] so a document
/// written by a newer tool still round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrushType {
    /// Flat camera-facing ribbon
    #[default]
    Ribbon,
    /// Round tube
    Cylinder,
    /// Chain of spheres
    Sphere,
    /// Square-section tube
    Cube,
    /// Unrecognized wire value
    Other(u8),
}

impl BrushType {
    /// Wire discriminant
    pub fn to_u8(self) -> u8 {
        match self {
            BrushType::Ribbon => 0,
            BrushType::Cylinder => 1,
            BrushType::Sphere => 2,
            BrushType::Cube => 3,
            BrushType::Other(v) => v,
        }
    }

    /// Map a wire discriminant back to a brush type
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => BrushType::Ribbon,
            1 => BrushType::Cylinder,
            2 => BrushType::Sphere,
            3 => BrushType::Cube,
            other => BrushType::Other(other),
        }
    }
}

/// How the brush deposits paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrushMode {
    /// Freehand stroke
    #[default]
    Stroke,
    /// Filled surface between stroke samples
    Fill,
    /// Unrecognized wire value
    Other(u8),
}

impl BrushMode {
    /// Wire discriminant
    pub fn to_u8(self) -> u8 {
        match self {
            BrushMode::Stroke => 0,
            BrushMode::Fill => 1,
            BrushMode::Other(v) => v,
        }
    }

    /// Map a wire discriminant back to a brush mode
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => BrushMode::Stroke,
            1 => BrushMode::Fill,
            other => BrushMode::Other(other),
        }
    }
}

/// Rendering settings of a stroke
///
/// Stored inline in the line table as a fixed 16-byte struct. The default
/// style (all flags off, texture 0) is omitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrushStyle {
    /// Brush tip shape
    pub brush_type: BrushType,
    /// Paint deposit mode
    pub brush_mode: BrushMode,
    /// Render only the front face
    pub is_one_sided: bool,
    /// Flat (unlit) shading
    pub is_flat: bool,
    /// Fade opacity towards the stroke ends
    pub taper_opacity: bool,
    /// Narrow width towards the stroke ends
    pub taper_shape: bool,
    /// Ignore per-sample widths
    pub constant_width: bool,
    /// Render as several parallel lines
    pub multi_line: bool,
    /// Web-style connective rendering
    pub is_web: bool,
    /// Texture coordinates in object space instead of along the stroke
    pub is_object_space_tex: bool,
    /// Index into the host's brush texture table
    pub texture_index: i32,
}

impl BrushStyle {
    /// Returns true if this style equals the default
    pub fn is_default(&self) -> bool {
        *self == BrushStyle::default()
    }
}
