//! Buffer to document decoding
//!
//! Decoding walks the buffer depth-first from the root Stage table and
//! materializes an owned [`Stage`]. Every offset is bounds-checked by the
//! [`reader`](crate::reader) views. Nesting depth and the number of tables
//! visited are bounded by [`CodecLimits`].
//!
//! A document is a strict tree: every table, vector and string has exactly
//! one parent. The decoder records the position of each object it follows and
//! rejects a second reference with [`DecodeError::SharedOffset`], so the
//! decoded tree is never larger than the buffer it came from.

use rustc_hash::FxHashSet;

use flatanim_core::{
    BrushStyle, Child, CodecLimits, Color, Frame, Line, LineSequence, PlayableBase, Quaternion,
    Stage, Symbol, Timeline, Transform, Vec3, DEFAULT_DISPLAY_NAME, DEFAULT_OPACITY,
};

use crate::error::{DecodeError, DecodeResult};
use crate::reader::{Buffer, Table, Vector};
use crate::schema::{self, WireStruct, CHILD_TAG_SYMBOL, CHILD_TAG_TIMELINE};

const UOFFSET_SIZE: usize = 4;

/// Decode a buffer with default limits
pub fn decode(bytes: &[u8]) -> DecodeResult<Stage> {
    decode_with(bytes, &CodecLimits::default())
}

/// Decode a buffer with explicit limits
pub fn decode_with(bytes: &[u8], limits: &CodecLimits) -> DecodeResult<Stage> {
    Decoder::new(bytes, limits).stage()
}

struct Decoder<'a, 'l> {
    buf: Buffer<'a>,
    limits: &'l CodecLimits,
    tables: usize,
    seen: FxHashSet<usize>,
}

impl<'a, 'l> Decoder<'a, 'l> {
    fn new(bytes: &'a [u8], limits: &'l CodecLimits) -> Self {
        Decoder {
            buf: Buffer::new(bytes),
            limits,
            tables: 0,
            seen: FxHashSet::default(),
        }
    }

    /// Record a followed object; each may be reached only once
    fn claim(&mut self, offset: usize) -> DecodeResult<()> {
        if !self.seen.insert(offset) {
            return Err(DecodeError::SharedOffset { offset });
        }
        Ok(())
    }

    /// Count one more table against the budget
    fn visit(&mut self, table: Table<'a>) -> DecodeResult<Table<'a>> {
        self.claim(table.position())?;
        self.tables += 1;
        if self.tables > self.limits.max_tables {
            return Err(DecodeError::TableLimitExceeded {
                limit: self.limits.max_tables,
            });
        }
        Ok(table)
    }

    fn vector(
        &mut self,
        table: &Table<'a>,
        slot: u16,
        elem_size: usize,
    ) -> DecodeResult<Option<Vector<'a>>> {
        let vec = table.vector(slot, elem_size)?;
        if let Some(v) = &vec {
            self.claim(v.position())?;
        }
        Ok(vec)
    }

    fn string(&mut self, table: &Table<'a>, slot: u16) -> DecodeResult<Option<&'a str>> {
        if let Some(pos) = table.target(slot)? {
            self.claim(pos)?;
        }
        table.string(slot)
    }

    fn stage(&mut self) -> DecodeResult<Stage> {
        let root = self.buf.root_table()?;
        let root = self.visit(root)?;

        let transform = read_transform(&root, schema::stage::TRANS)?;
        let mut symbols = Vec::new();
        if let Some(vec) = self.vector(&root, schema::stage::SYMBOLS, UOFFSET_SIZE)? {
            symbols.reserve(vec.len());
            for i in 0..vec.len() {
                let table = self.visit(vec.table(i)?)?;
                symbols.push(self.symbol(table, 1)?);
            }
        }
        Ok(Stage { transform, symbols })
    }

    fn symbol(&mut self, table: Table<'a>, depth: usize) -> DecodeResult<Symbol> {
        if depth > self.limits.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.limits.max_depth,
            });
        }

        let base = self.playable(&table, schema::symbol::BASE)?;
        let symbols = self.vector(&table, schema::symbol::SYMBOLS, UOFFSET_SIZE)?;
        let timelines = self.vector(&table, schema::symbol::TIMELINES, UOFFSET_SIZE)?;
        let order = self.vector(&table, schema::symbol::CHILD_ORDER, 1)?;

        let symbol_count = symbols.map_or(0, |v| v.len());
        let timeline_count = timelines.map_or(0, |v| v.len());
        let tags = match order {
            Some(order) => child_tags(&order, symbol_count, timeline_count)?,
            None => legacy_child_tags(symbol_count, timeline_count),
        };

        let mut children = Vec::with_capacity(tags.len());
        let (mut next_symbol, mut next_timeline) = (0, 0);
        for tag in tags {
            match (tag, symbols, timelines) {
                (CHILD_TAG_SYMBOL, Some(vec), _) => {
                    let child = self.visit(vec.table(next_symbol)?)?;
                    next_symbol += 1;
                    children.push(Child::Symbol(self.symbol(child, depth + 1)?));
                }
                (CHILD_TAG_TIMELINE, _, Some(vec)) => {
                    let child = self.visit(vec.table(next_timeline)?)?;
                    next_timeline += 1;
                    children.push(Child::Timeline(self.timeline(child)?));
                }
                // child_tags checked the counts against the vectors
                _ => {
                    return Err(DecodeError::InvalidChildOrder {
                        reason: "tag refers to a missing child vector",
                    })
                }
            }
        }

        Ok(Symbol { base, children })
    }

    fn playable(&mut self, owner: &Table<'a>, slot: u16) -> DecodeResult<PlayableBase> {
        let table = match owner.table(slot)? {
            Some(t) => self.visit(t)?,
            None => return Ok(PlayableBase::default()),
        };
        let display_name = self
            .string(&table, schema::playable::DISPLAY_NAME)?
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();
        Ok(PlayableBase {
            display_name,
            transform: read_transform(&table, schema::playable::TRANS)?,
            opacity: table.scalar(schema::playable::OPACITY, DEFAULT_OPACITY)?,
            is_visible: table.scalar(schema::playable::IS_VISIBLE, true)?,
            expanded_in_layer_list: table.scalar(schema::playable::EXPANDED_IN_LAYER_LIST, false)?,
            index_in_symbol: table.scalar(schema::playable::INDEX_IN_SYMBOL, 0i32)?,
        })
    }

    fn timeline(&mut self, table: Table<'a>) -> DecodeResult<Timeline> {
        let base = self.playable(&table, schema::timeline::BASE)?;
        let mut frames = Vec::new();
        if let Some(vec) = self.vector(&table, schema::timeline::FRAMES, UOFFSET_SIZE)? {
            frames.reserve(vec.len());
            for i in 0..vec.len() {
                let frame = self.visit(vec.table(i)?)?;
                frames.push(self.frame(frame)?);
            }
        }
        Ok(Timeline { base, frames })
    }

    fn frame(&mut self, table: Table<'a>) -> DecodeResult<Frame> {
        let mut lines = Vec::new();
        if let Some(vec) = self.vector(&table, schema::frame::LINES, UOFFSET_SIZE)? {
            lines.reserve(vec.len());
            for i in 0..vec.len() {
                let line = self.visit(vec.table(i)?)?;
                lines.push(self.line(line)?);
            }
        }
        Ok(Frame {
            transform: read_transform(&table, schema::frame::TRANS)?,
            is_instance: table.scalar(schema::frame::IS_INSTANCE, false)?,
            lines,
        })
    }

    fn line(&mut self, table: Table<'a>) -> DecodeResult<Line> {
        use schema::line;

        let points = self.vector(&table, line::POINTS, Vec3::SIZE)?;
        let widths = self.vector(&table, line::WIDTHS, 4)?;
        let colors = self.vector(&table, line::COLORS, Color::SIZE)?;
        let lights = self.vector(&table, line::LIGHTS, 4)?;
        let rotations = self.vector(&table, line::ROTATIONS, Quaternion::SIZE)?;
        let cam_orientations = self.vector(&table, line::CAM_ORIENTATIONS, Quaternion::SIZE)?;

        let lengths = [
            (LineSequence::Points, len_of(&points)),
            (LineSequence::Widths, len_of(&widths)),
            (LineSequence::Colors, len_of(&colors)),
            (LineSequence::Lights, len_of(&lights)),
            (LineSequence::Rotations, len_of(&rotations)),
            (LineSequence::CamOrientations, len_of(&cam_orientations)),
        ];
        let count = if self.limits.truncate_parallel_vectors {
            lengths.iter().map(|(_, n)| *n).min().unwrap_or(0)
        } else {
            let expected = lengths[0].1;
            if let Some((sequence, actual)) = lengths.iter().find(|(_, n)| *n != expected) {
                return Err(DecodeError::ParallelLengthMismatch {
                    sequence: *sequence,
                    expected,
                    actual: *actual,
                });
            }
            expected
        };

        Ok(Line {
            transform: read_transform(&table, line::TRANS)?,
            brush: table.wire_struct::<BrushStyle>(line::SETTINGS)?.unwrap_or_default(),
            points: structs_of(&points, count)?,
            widths: scalars_of(&widths, count)?,
            colors: structs_of(&colors, count)?,
            lights: scalars_of(&lights, count)?,
            rotations: structs_of(&rotations, count)?,
            cam_orientations: structs_of(&cam_orientations, count)?,
        })
    }
}

fn read_transform(table: &Table<'_>, slot: u16) -> DecodeResult<Transform> {
    Ok(table.wire_struct::<Transform>(slot)?.unwrap_or_default())
}

fn len_of(vec: &Option<Vector<'_>>) -> usize {
    vec.as_ref().map_or(0, |v| v.len())
}

fn scalars_of(vec: &Option<Vector<'_>>, count: usize) -> DecodeResult<Vec<f32>> {
    match vec {
        Some(v) => v.scalars(count),
        None => Ok(Vec::new()),
    }
}

fn structs_of<S: WireStruct>(vec: &Option<Vector<'_>>, count: usize) -> DecodeResult<Vec<S>> {
    match vec {
        Some(v) => v.wire_structs(count),
        None => Ok(Vec::new()),
    }
}

/// Read and check an explicit child order against the child vectors
fn child_tags(order: &Vector<'_>, symbols: usize, timelines: usize) -> DecodeResult<Vec<u8>> {
    let tags: Vec<u8> = order.scalars(order.len())?;
    let mut seen_symbols = 0usize;
    let mut seen_timelines = 0usize;
    for tag in &tags {
        match *tag {
            CHILD_TAG_SYMBOL => seen_symbols += 1,
            CHILD_TAG_TIMELINE => seen_timelines += 1,
            _ => {
                return Err(DecodeError::InvalidChildOrder {
                    reason: "unknown child tag",
                })
            }
        }
    }
    if seen_symbols != symbols {
        return Err(DecodeError::InvalidChildOrder {
            reason: "symbol count differs from symbols vector",
        });
    }
    if seen_timelines != timelines {
        return Err(DecodeError::InvalidChildOrder {
            reason: "timeline count differs from timelines vector",
        });
    }
    Ok(tags)
}

/// Buffers without a child order list timelines first, then symbols
fn legacy_child_tags(symbols: usize, timelines: usize) -> Vec<u8> {
    let mut tags = vec![CHILD_TAG_TIMELINE; timelines];
    tags.resize(timelines + symbols, CHILD_TAG_SYMBOL);
    tags
}
