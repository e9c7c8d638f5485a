//! Schema model for the flatanim binary layout
//!
//! Each table has a fixed list of fields addressed by slot number. Slots are
//! stable across schema versions: they are never reused or reordered, new
//! fields only take new slots. A slot that is missing from a table's vtable,
//! or beyond the vtable's end, reads as the field's default.
//!
//! ## Tables
//!
//! | Table | Slot | Field | Type | Default |
//! |-------|------|-------|------|---------|
//! | Stage | 0 | trans | Transform | identity |
//! | Stage | 1 | symbols | [Symbol] | empty |
//! | Playable | 0 | display_name | string | "Stage" |
//! | Playable | 1 | trans | Transform | identity |
//! | Playable | 2 | opacity | f32 | 1.0 |
//! | Playable | 3 | is_visible | bool | true |
//! | Playable | 4 | expanded_in_layer_list | bool | false |
//! | Playable | 5 | index_in_symbol | i32 | 0 |
//! | Symbol | 0 | base | Playable | defaults |
//! | Symbol | 1 | symbols | [Symbol] | empty |
//! | Symbol | 2 | timelines | [Timeline] | empty |
//! | Symbol | 3 | child_order | [u8] | timelines, then symbols |
//! | Timeline | 0 | base | Playable | defaults |
//! | Timeline | 1 | frames | [Frame] | empty |
//! | Frame | 0 | trans | Transform | identity |
//! | Frame | 1 | is_instance | bool | false |
//! | Frame | 2 | lines | [Line] | empty |
//! | Line | 0 | trans | Transform | identity |
//! | Line | 1 | settings | BrushSettings | default style |
//! | Line | 2 | points | [Vec3] | empty |
//! | Line | 3 | widths | [f32] | empty |
//! | Line | 4 | colors | [Color] | empty |
//! | Line | 5 | lights | [f32] | empty |
//! | Line | 6 | rotations | [Quaternion] | empty |
//! | Line | 7 | cam_orientations | [Quaternion] | empty |
//!
//! ## Structs
//!
//! Structs are stored inline with 4-byte alignment:
//!
//! ```text
//! Vec3          12 bytes  x y z                       (f32 each)
//! Quaternion    16 bytes  x y z w                     (f32 each)
//! Color         16 bytes  r g b a                     (f32 each)
//! Transform     40 bytes  pos:Vec3 rot:Quaternion scale:Vec3
//! BrushSettings 16 bytes  brush_type:u8 brush_mode:u8
//!                         is_one_sided is_flat taper_opacity taper_shape
//!                         constant_width multi_line is_web is_object_space_tex (u8 each)
//!                         padding:[u8; 2] texture_index:i32
//! ```

use byteorder::{ByteOrder, LittleEndian};
use flatanim_core::{BrushMode, BrushStyle, BrushType, Color, Quaternion, Transform, Vec3};

/// Stage (root) table slots
pub mod stage {
    /// Root transform
    pub const TRANS: u16 = 0;
    /// Top-level symbols
    pub const SYMBOLS: u16 = 1;
}

/// Playable table slots
pub mod playable {
    /// Display name string
    pub const DISPLAY_NAME: u16 = 0;
    /// Local transform
    pub const TRANS: u16 = 1;
    /// Opacity
    pub const OPACITY: u16 = 2;
    /// Visibility flag
    pub const IS_VISIBLE: u16 = 3;
    /// Layer-list expansion flag
    pub const EXPANDED_IN_LAYER_LIST: u16 = 4;
    /// Index within the parent symbol
    pub const INDEX_IN_SYMBOL: u16 = 5;
}

/// Symbol table slots
pub mod symbol {
    /// Playable base sub-table
    pub const BASE: u16 = 0;
    /// Child symbols
    pub const SYMBOLS: u16 = 1;
    /// Child timelines
    pub const TIMELINES: u16 = 2;
    /// Interleaving of child timelines and symbols
    pub const CHILD_ORDER: u16 = 3;
}

/// Timeline table slots
pub mod timeline {
    /// Playable base sub-table
    pub const BASE: u16 = 0;
    /// Frames
    pub const FRAMES: u16 = 1;
}

/// Frame table slots
pub mod frame {
    /// Frame transform
    pub const TRANS: u16 = 0;
    /// Instance flag
    pub const IS_INSTANCE: u16 = 1;
    /// Lines
    pub const LINES: u16 = 2;
}

/// Line table slots
pub mod line {
    /// Line transform
    pub const TRANS: u16 = 0;
    /// Brush settings struct
    pub const SETTINGS: u16 = 1;
    /// Sample positions
    pub const POINTS: u16 = 2;
    /// Sample widths
    pub const WIDTHS: u16 = 3;
    /// Sample colors
    pub const COLORS: u16 = 4;
    /// Sample light intensity
    pub const LIGHTS: u16 = 5;
    /// Sample rotations
    pub const ROTATIONS: u16 = 6;
    /// Sample camera orientations
    pub const CAM_ORIENTATIONS: u16 = 7;
}

/// `child_order` tag for a timeline child
pub const CHILD_TAG_TIMELINE: u8 = 0;

/// `child_order` tag for a symbol child
pub const CHILD_TAG_SYMBOL: u8 = 1;

/// Wire type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 1-byte boolean
    Bool,
    /// 32-bit signed integer
    Int,
    /// 32-bit float
    Float,
    /// Length-prefixed UTF-8 string
    String,
    /// Inline fixed-size struct
    Struct(&'static str),
    /// Offset to a sub-table
    Table(&'static str),
    /// Vector of packed scalars
    ScalarVector(&'static str),
    /// Vector of packed structs
    StructVector(&'static str),
    /// Vector of offsets to sub-tables
    TableVector(&'static str),
}

/// One field of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name
    pub name: &'static str,
    /// Stable slot number
    pub slot: u16,
    /// Wire type
    pub kind: FieldKind,
    /// Value read when the field is absent
    pub default: &'static str,
}

/// A table and its fields in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    /// Table name
    pub name: &'static str,
    /// Fields ordered by slot
    pub fields: &'static [FieldDef],
}

const fn field(name: &'static str, slot: u16, kind: FieldKind, default: &'static str) -> FieldDef {
    FieldDef {
        name,
        slot,
        kind,
        default,
    }
}

/// The complete document schema, root table first
pub const TABLES: &[TableDef] = &[
    TableDef {
        name: "Stage",
        fields: &[
            field("trans", stage::TRANS, FieldKind::Struct("Transform"), "identity"),
            field("symbols", stage::SYMBOLS, FieldKind::TableVector("Symbol"), "[]"),
        ],
    },
    TableDef {
        name: "Playable",
        fields: &[
            field("display_name", playable::DISPLAY_NAME, FieldKind::String, "\"Stage\""),
            field("trans", playable::TRANS, FieldKind::Struct("Transform"), "identity"),
            field("opacity", playable::OPACITY, FieldKind::Float, "1.0"),
            field("is_visible", playable::IS_VISIBLE, FieldKind::Bool, "true"),
            field(
                "expanded_in_layer_list",
                playable::EXPANDED_IN_LAYER_LIST,
                FieldKind::Bool,
                "false",
            ),
            field("index_in_symbol", playable::INDEX_IN_SYMBOL, FieldKind::Int, "0"),
        ],
    },
    TableDef {
        name: "Symbol",
        fields: &[
            field("base", symbol::BASE, FieldKind::Table("Playable"), "defaults"),
            field("symbols", symbol::SYMBOLS, FieldKind::TableVector("Symbol"), "[]"),
            field("timelines", symbol::TIMELINES, FieldKind::TableVector("Timeline"), "[]"),
            field(
                "child_order",
                symbol::CHILD_ORDER,
                FieldKind::ScalarVector("u8"),
                "timelines then symbols",
            ),
        ],
    },
    TableDef {
        name: "Timeline",
        fields: &[
            field("base", timeline::BASE, FieldKind::Table("Playable"), "defaults"),
            field("frames", timeline::FRAMES, FieldKind::TableVector("Frame"), "[]"),
        ],
    },
    TableDef {
        name: "Frame",
        fields: &[
            field("trans", frame::TRANS, FieldKind::Struct("Transform"), "identity"),
            field("is_instance", frame::IS_INSTANCE, FieldKind::Bool, "false"),
            field("lines", frame::LINES, FieldKind::TableVector("Line"), "[]"),
        ],
    },
    TableDef {
        name: "Line",
        fields: &[
            field("trans", line::TRANS, FieldKind::Struct("Transform"), "identity"),
            field("settings", line::SETTINGS, FieldKind::Struct("BrushSettings"), "defaults"),
            field("points", line::POINTS, FieldKind::StructVector("Vec3"), "[]"),
            field("widths", line::WIDTHS, FieldKind::ScalarVector("f32"), "[]"),
            field("colors", line::COLORS, FieldKind::StructVector("Color"), "[]"),
            field("lights", line::LIGHTS, FieldKind::ScalarVector("f32"), "[]"),
            field("rotations", line::ROTATIONS, FieldKind::StructVector("Quaternion"), "[]"),
            field(
                "cam_orientations",
                line::CAM_ORIENTATIONS,
                FieldKind::StructVector("Quaternion"),
                "[]",
            ),
        ],
    },
];

/// Look up a table definition by name
pub fn table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().find(|t| t.name == name)
}

/// A fixed-size struct stored inline in tables and vectors
pub trait WireStruct: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Required alignment
    const ALIGN: usize = 4;

    /// Write into `dst[..SIZE]`
    fn write_to(&self, dst: &mut [u8]);

    /// Read from `src[..SIZE]`
    fn read_from(src: &[u8]) -> Self;
}

fn put_f32s(dst: &mut [u8], values: &[f32]) {
    for (i, v) in values.iter().enumerate() {
        LittleEndian::write_f32(&mut dst[i * 4..i * 4 + 4], *v);
    }
}

fn get_f32(src: &[u8], index: usize) -> f32 {
    LittleEndian::read_f32(&src[index * 4..index * 4 + 4])
}

impl WireStruct for Vec3 {
    const SIZE: usize = 12;

    fn write_to(&self, dst: &mut [u8]) {
        put_f32s(dst, &self.to_array());
    }

    fn read_from(src: &[u8]) -> Self {
        Vec3::new(get_f32(src, 0), get_f32(src, 1), get_f32(src, 2))
    }
}

impl WireStruct for Quaternion {
    const SIZE: usize = 16;

    fn write_to(&self, dst: &mut [u8]) {
        put_f32s(dst, &self.to_array());
    }

    fn read_from(src: &[u8]) -> Self {
        Quaternion::new(
            get_f32(src, 0),
            get_f32(src, 1),
            get_f32(src, 2),
            get_f32(src, 3),
        )
    }
}

impl WireStruct for Color {
    const SIZE: usize = 16;

    fn write_to(&self, dst: &mut [u8]) {
        put_f32s(dst, &self.to_array());
    }

    fn read_from(src: &[u8]) -> Self {
        Color::new(
            get_f32(src, 0),
            get_f32(src, 1),
            get_f32(src, 2),
            get_f32(src, 3),
        )
    }
}

impl WireStruct for Transform {
    const SIZE: usize = 40;

    fn write_to(&self, dst: &mut [u8]) {
        self.pos.write_to(&mut dst[0..12]);
        self.rot.write_to(&mut dst[12..28]);
        self.scale.write_to(&mut dst[28..40]);
    }

    fn read_from(src: &[u8]) -> Self {
        Transform::new(
            Vec3::read_from(&src[0..12]),
            Quaternion::read_from(&src[12..28]),
            Vec3::read_from(&src[28..40]),
        )
    }
}

impl WireStruct for BrushStyle {
    const SIZE: usize = 16;

    fn write_to(&self, dst: &mut [u8]) {
        dst[0] = self.brush_type.to_u8();
        dst[1] = self.brush_mode.to_u8();
        let flags = [
            self.is_one_sided,
            self.is_flat,
            self.taper_opacity,
            self.taper_shape,
            self.constant_width,
            self.multi_line,
            self.is_web,
            self.is_object_space_tex,
        ];
        for (i, flag) in flags.iter().enumerate() {
            dst[2 + i] = u8::from(*flag);
        }
        dst[10] = 0;
        dst[11] = 0;
        LittleEndian::write_i32(&mut dst[12..16], self.texture_index);
    }

    fn read_from(src: &[u8]) -> Self {
        BrushStyle {
            brush_type: BrushType::from_u8(src[0]),
            brush_mode: BrushMode::from_u8(src[1]),
            is_one_sided: src[2] != 0,
            is_flat: src[3] != 0,
            taper_opacity: src[4] != 0,
            taper_shape: src[5] != 0,
            constant_width: src[6] != 0,
            multi_line: src[7] != 0,
            is_web: src[8] != 0,
            is_object_space_tex: src[9] != 0,
            texture_index: LittleEndian::read_i32(&src[12..16]),
        }
    }
}
