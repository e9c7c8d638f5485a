//! Animation document tree
//!
//! The document is a strict tree rooted at a [`Stage`]:
//!
//! ```text
//! Stage
//! └── Symbol*            (PlayableBase + ordered children)
//!     ├── Symbol*        (nested, unbounded depth)
//!     └── Timeline*      (PlayableBase + frames)
//!         └── Frame*     (transform, is_instance)
//!             └── Line*  (transform, brush, per-sample vectors)
//! ```
//!
//! Every node has exactly one owner. Symbol and Timeline share their
//! common fields by embedding a [`PlayableBase`].

use serde::{Deserialize, Serialize};

use crate::brush::BrushStyle;
use crate::error::{LineSequence, ValidationError};
use crate::types::{Color, Quaternion, Transform, Vec3};

/// Display name used when a playable has none
pub const DEFAULT_DISPLAY_NAME: &str = "Stage";

/// Default playable opacity
pub const DEFAULT_OPACITY: f32 = 1.0;

/// Root of an animation document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    /// Root transform
    pub transform: Transform,
    /// Top-level symbols in order
    pub symbols: Vec<Symbol>,
}

impl Stage {
    /// Create an empty stage with an identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level symbol
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbols.push(symbol);
        self
    }

    /// Wrap every top-level symbol into one root symbol named `display_name`
    ///
    /// This is the shape an importer hands to a host: a single symbol whose
    /// children are the stage's symbols, in order. The stage transform is
    /// carried by the root symbol.
    pub fn into_root_symbol(self, display_name: impl Into<String>) -> Symbol {
        let mut root = Symbol::named(display_name);
        root.base.transform = self.transform;
        root.children = self.symbols.into_iter().map(Child::Symbol).collect();
        root
    }

    /// Check every line in the document for parallel-length violations
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut stack: Vec<&Symbol> = self.symbols.iter().collect();
        while let Some(symbol) = stack.pop() {
            for child in &symbol.children {
                match child {
                    Child::Symbol(s) => stack.push(s),
                    Child::Timeline(t) => {
                        for frame in &t.frames {
                            for line in &frame.lines {
                                line.validate()?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Count nodes and samples in the document
    ///
    /// Walks the tree with an explicit stack, so arbitrarily deep documents
    /// are safe to inspect.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::default();
        let mut stack: Vec<(&Symbol, usize)> = self.symbols.iter().map(|s| (s, 1)).collect();
        while let Some((symbol, depth)) = stack.pop() {
            stats.symbols += 1;
            stats.max_depth = stats.max_depth.max(depth);
            for child in &symbol.children {
                match child {
                    Child::Symbol(s) => stack.push((s, depth + 1)),
                    Child::Timeline(t) => {
                        stats.timelines += 1;
                        stats.frames += t.frames.len();
                        for frame in &t.frames {
                            stats.lines += frame.lines.len();
                            stats.samples += frame
                                .lines
                                .iter()
                                .map(|l| l.sample_count())
                                .sum::<usize>();
                        }
                    }
                }
            }
        }
        stats
    }
}

/// Node and sample counts for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Symbols at any depth
    pub symbols: usize,
    /// Timelines at any depth
    pub timelines: usize,
    /// Frames across all timelines
    pub frames: usize,
    /// Lines across all frames
    pub lines: usize,
    /// Stroke samples across all lines
    pub samples: usize,
    /// Deepest symbol nesting; top-level symbols are depth 1
    pub max_depth: usize,
}

/// Fields shared by every playable node (symbols and timelines)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayableBase {
    /// Name shown in the layer list
    pub display_name: String,
    /// Local transform
    pub transform: Transform,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Visibility flag
    pub is_visible: bool,
    /// Whether the node is expanded in the host's layer list
    pub expanded_in_layer_list: bool,
    /// Position of this node inside its parent symbol
    pub index_in_symbol: i32,
}

impl PlayableBase {
    /// Default fields with the given display name
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }
}

impl Default for PlayableBase {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            transform: Transform::IDENTITY,
            opacity: DEFAULT_OPACITY,
            is_visible: true,
            expanded_in_layer_list: false,
            index_in_symbol: 0,
        }
    }
}

/// A child of a symbol: either a nested symbol or a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Child {
    /// Nested symbol
    Symbol(Symbol),
    /// Timeline with frames
    Timeline(Timeline),
}

impl Child {
    /// Shared playable fields of either variant
    pub fn base(&self) -> &PlayableBase {
        match self {
            Child::Symbol(s) => &s.base,
            Child::Timeline(t) => &t.base,
        }
    }

    /// Returns true for the timeline variant
    pub fn is_timeline(&self) -> bool {
        matches!(self, Child::Timeline(_))
    }
}

impl From<Symbol> for Child {
    fn from(s: Symbol) -> Self {
        Child::Symbol(s)
    }
}

impl From<Timeline> for Child {
    fn from(t: Timeline) -> Self {
        Child::Timeline(t)
    }
}

/// A playable that groups ordered child symbols and timelines
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Symbol {
    /// Shared playable fields
    #[serde(default)]
    pub base: PlayableBase,
    /// Children in display order
    #[serde(default)]
    pub children: Vec<Child>,
}

impl Symbol {
    /// Empty symbol with the given display name
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            base: PlayableBase::named(display_name),
            children: Vec::new(),
        }
    }

    /// Append a child
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Child symbols in order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.children.iter().filter_map(|c| match c {
            Child::Symbol(s) => Some(s),
            Child::Timeline(_) => None,
        })
    }

    /// Child timelines in order
    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.children.iter().filter_map(|c| match c {
            Child::Timeline(t) => Some(t),
            Child::Symbol(_) => None,
        })
    }
}

// Dropping a nested Symbol through the generated glue recurses once per
// level; unlink the subtree onto a heap stack instead.
impl Drop for Symbol {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(child) = stack.pop() {
            if let Child::Symbol(mut symbol) = child {
                stack.append(&mut symbol.children);
            }
        }
    }
}

/// A playable holding an ordered sequence of frames
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// Shared playable fields
    pub base: PlayableBase,
    /// Frames in playback order
    pub frames: Vec<Frame>,
}

impl Timeline {
    /// Empty timeline with the given display name
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            base: PlayableBase::named(display_name),
            frames: Vec::new(),
        }
    }

    /// Append a frame
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }
}

/// One frame of a timeline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Frame transform
    pub transform: Transform,
    /// The frame reuses geometry from elsewhere instead of owning it
    pub is_instance: bool,
    /// Strokes drawn in this frame
    pub lines: Vec<Line>,
}

impl Frame {
    /// Append a line
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }
}

/// A drawable stroke
///
/// The six per-sample vectors are parallel: index `i` of each describes
/// sample `i` of the stroke. They must all have the same length; see
/// [`Line::validate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    /// Line transform
    pub transform: Transform,
    /// Brush settings
    pub brush: BrushStyle,
    /// Sample positions
    pub points: Vec<Vec3>,
    /// Sample widths
    pub widths: Vec<f32>,
    /// Sample colors
    pub colors: Vec<Color>,
    /// Sample light intensity
    pub lights: Vec<f32>,
    /// Sample rotations
    pub rotations: Vec<Quaternion>,
    /// Sample camera-facing orientations
    pub cam_orientations: Vec<Quaternion>,
}

impl Line {
    /// Number of stroke samples (the length of `points`)
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// Append one sample to every per-sample vector
    pub fn push_sample(
        &mut self,
        point: Vec3,
        width: f32,
        color: Color,
        light: f32,
        rotation: Quaternion,
        cam_orientation: Quaternion,
    ) {
        self.points.push(point);
        self.widths.push(width);
        self.colors.push(color);
        self.lights.push(light);
        self.rotations.push(rotation);
        self.cam_orientations.push(cam_orientation);
    }

    /// Lengths of every per-sample vector, `points` first
    pub fn sequence_lengths(&self) -> [(LineSequence, usize); 6] {
        [
            (LineSequence::Points, self.points.len()),
            (LineSequence::Widths, self.widths.len()),
            (LineSequence::Colors, self.colors.len()),
            (LineSequence::Lights, self.lights.len()),
            (LineSequence::Rotations, self.rotations.len()),
            (LineSequence::CamOrientations, self.cam_orientations.len()),
        ]
    }

    /// Check that every per-sample vector has the length of `points`
    pub fn validate(&self) -> Result<(), ValidationError> {
        let expected = self.points.len();
        for (sequence, actual) in self.sequence_lengths() {
            if actual != expected {
                return Err(ValidationError::ParallelLengthMismatch {
                    sequence,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
