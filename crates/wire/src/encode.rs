//! Document to buffer encoding
//!
//! The encoder walks the document in post-order so every table's children
//! are finished before the table itself is started. All writes go through
//! one [`Builder`] owned by the encoder for the duration of the call.

use flatanim_core::{
    BrushStyle, Child, CodecLimits, Frame, Line, PlayableBase, Stage, Symbol, Timeline, Transform,
    DEFAULT_DISPLAY_NAME, DEFAULT_OPACITY,
};

use crate::builder::{Builder, Offset};
use crate::error::{EncodeError, EncodeResult};
use crate::scalar::Scalar;
use crate::schema::{self, WireStruct, CHILD_TAG_SYMBOL, CHILD_TAG_TIMELINE};

/// Encode a document with default limits
pub fn encode(stage: &Stage) -> EncodeResult<Vec<u8>> {
    encode_with(stage, &CodecLimits::default())
}

/// Encode a document with explicit limits
pub fn encode_with(stage: &Stage, limits: &CodecLimits) -> EncodeResult<Vec<u8>> {
    let mut encoder = Encoder {
        builder: Builder::new(),
        limits,
    };
    let root = encoder.stage(stage)?;
    encoder.builder.finish(root)
}

struct Encoder<'l> {
    builder: Builder,
    limits: &'l CodecLimits,
}

impl Encoder<'_> {
    fn stage(&mut self, stage: &Stage) -> EncodeResult<Offset> {
        let mut symbols = Vec::with_capacity(stage.symbols.len());
        for symbol in &stage.symbols {
            symbols.push(self.symbol(symbol, 1)?);
        }
        let symbols = self.table_vector(&symbols)?;

        let b = &mut self.builder;
        b.start_table();
        b.add_struct(schema::stage::TRANS, &stage.transform, &Transform::IDENTITY)?;
        b.add_optional_offset(schema::stage::SYMBOLS, symbols)?;
        b.end_table()
    }

    fn symbol(&mut self, symbol: &Symbol, depth: usize) -> EncodeResult<Offset> {
        if depth > self.limits.max_depth {
            return Err(EncodeError::DepthLimitExceeded {
                limit: self.limits.max_depth,
            });
        }

        let mut symbols = Vec::new();
        let mut timelines = Vec::new();
        let mut tags = Vec::with_capacity(symbol.children.len());
        for child in &symbol.children {
            match child {
                Child::Symbol(s) => {
                    symbols.push(self.symbol(s, depth + 1)?);
                    tags.push(CHILD_TAG_SYMBOL);
                }
                Child::Timeline(t) => {
                    timelines.push(self.timeline(t)?);
                    tags.push(CHILD_TAG_TIMELINE);
                }
            }
        }

        let base = self.playable(&symbol.base)?;
        let symbols = self.table_vector(&symbols)?;
        let timelines = self.table_vector(&timelines)?;
        let order = if needs_child_order(&tags) {
            Some(self.scalar_vector(&tags)?)
        } else {
            None
        };

        let b = &mut self.builder;
        b.start_table();
        b.add_offset(schema::symbol::BASE, base)?;
        b.add_optional_offset(schema::symbol::SYMBOLS, symbols)?;
        b.add_optional_offset(schema::symbol::TIMELINES, timelines)?;
        b.add_optional_offset(schema::symbol::CHILD_ORDER, order)?;
        b.end_table()
    }

    fn playable(&mut self, base: &PlayableBase) -> EncodeResult<Offset> {
        // An empty name is stored as the default, which is then omitted.
        let name = if base.display_name.is_empty() || base.display_name == DEFAULT_DISPLAY_NAME {
            None
        } else {
            Some(self.builder.create_string(&base.display_name)?)
        };

        let b = &mut self.builder;
        b.start_table();
        b.add_struct(schema::playable::TRANS, &base.transform, &Transform::IDENTITY)?;
        b.add_scalar(schema::playable::OPACITY, base.opacity, DEFAULT_OPACITY)?;
        b.add_scalar(schema::playable::INDEX_IN_SYMBOL, base.index_in_symbol, 0)?;
        b.add_optional_offset(schema::playable::DISPLAY_NAME, name)?;
        b.add_scalar(schema::playable::IS_VISIBLE, base.is_visible, true)?;
        b.add_scalar(
            schema::playable::EXPANDED_IN_LAYER_LIST,
            base.expanded_in_layer_list,
            false,
        )?;
        b.end_table()
    }

    fn timeline(&mut self, timeline: &Timeline) -> EncodeResult<Offset> {
        let mut frames = Vec::with_capacity(timeline.frames.len());
        for frame in &timeline.frames {
            frames.push(self.frame(frame)?);
        }
        let base = self.playable(&timeline.base)?;
        let frames = self.table_vector(&frames)?;

        let b = &mut self.builder;
        b.start_table();
        b.add_offset(schema::timeline::BASE, base)?;
        b.add_optional_offset(schema::timeline::FRAMES, frames)?;
        b.end_table()
    }

    fn frame(&mut self, frame: &Frame) -> EncodeResult<Offset> {
        let mut lines = Vec::with_capacity(frame.lines.len());
        for line in &frame.lines {
            lines.push(self.line(line)?);
        }
        let lines = self.table_vector(&lines)?;

        let b = &mut self.builder;
        b.start_table();
        b.add_struct(schema::frame::TRANS, &frame.transform, &Transform::IDENTITY)?;
        b.add_optional_offset(schema::frame::LINES, lines)?;
        b.add_scalar(schema::frame::IS_INSTANCE, frame.is_instance, false)?;
        b.end_table()
    }

    fn line(&mut self, line: &Line) -> EncodeResult<Offset> {
        use schema::line as slot;

        line.validate()?;

        // All six share one length, so either all are written or none.
        let vectors = if line.points.is_empty() {
            Vec::new()
        } else {
            vec![
                (slot::POINTS, self.struct_vector(&line.points)?),
                (slot::WIDTHS, self.scalar_vector(&line.widths)?),
                (slot::COLORS, self.struct_vector(&line.colors)?),
                (slot::LIGHTS, self.scalar_vector(&line.lights)?),
                (slot::ROTATIONS, self.struct_vector(&line.rotations)?),
                (slot::CAM_ORIENTATIONS, self.struct_vector(&line.cam_orientations)?),
            ]
        };

        let b = &mut self.builder;
        b.start_table();
        b.add_struct(slot::TRANS, &line.transform, &Transform::IDENTITY)?;
        b.add_struct(slot::SETTINGS, &line.brush, &BrushStyle::default())?;
        for (field, offset) in vectors {
            b.add_offset(field, offset)?;
        }
        b.end_table()
    }

    /// Offsets to child tables, or `None` when there are no children
    fn table_vector(&mut self, offsets: &[Offset]) -> EncodeResult<Option<Offset>> {
        if offsets.is_empty() {
            return Ok(None);
        }
        self.builder.create_offset_vector(offsets).map(Some)
    }

    fn scalar_vector<T: Scalar>(&mut self, items: &[T]) -> EncodeResult<Offset> {
        self.builder.create_scalar_vector(items)
    }

    fn struct_vector<S: WireStruct>(&mut self, items: &[S]) -> EncodeResult<Offset> {
        self.builder.create_struct_vector(items)
    }
}

/// A child order is stored only when a symbol precedes a timeline
fn needs_child_order(tags: &[u8]) -> bool {
    tags.windows(2)
        .any(|w| w[0] == CHILD_TAG_SYMBOL && w[1] == CHILD_TAG_TIMELINE)
}
