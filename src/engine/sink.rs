//! The client-facing event sink.
//!
//! The engine reports everything it does to an [`EventSink`] supplied at
//! construction. All hooks default to no-ops, so an analyzer implements only
//! what it cares about. References handed to a hook (graphics state, paths,
//! matrices) are snapshots of this instant: the engine mutates the underlying
//! values as soon as the hook returns, so durable copies must be cloned.

use std::rc::Rc;

use crate::core::error::EngineError;
use crate::core::font::{Font, GlyphCode};
use crate::core::geometry::{Matrix, Point, Rect};
use crate::core::graphics::FillRule;
use crate::core::parser::Object;
use crate::core::stream::ImageXObject;
use crate::engine::graphics_state::GraphicsState;
use crate::engine::path::Path;

/// How a finished path is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPaintMode {
    Stroke,
    Fill(FillRule),
    FillStroke(FillRule),
    /// `n`: the path was dropped without painting (still ends a pending clip)
    None,
}

/// A sink's override for the engine's error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Swallow the error and continue with the next operator
    Continue,
    /// Propagate the error out of stream processing
    Abort,
}

/// Receiver for interpretation events.
pub trait EventSink {
    /// `BT` executed.
    fn begin_text(&mut self) {}

    /// `ET` executed.
    fn end_text(&mut self) {}

    /// One glyph event per decoded code, in decode order. `trm` is the text
    /// rendering matrix for this glyph; `displacement` its advance in text
    /// space.
    fn show_glyph(
        &mut self,
        _trm: &Matrix,
        _font: &Rc<dyn Font>,
        _code: GlyphCode,
        _displacement: Point,
    ) {
    }

    /// A glyph of a non-Type 3 font, ready for the client's glyph renderer.
    /// Type 3 glyphs are replayed as nested content streams instead.
    fn show_font_glyph(
        &mut self,
        _trm: &Matrix,
        _font: &Rc<dyn Font>,
        _code: GlyphCode,
        _displacement: Point,
    ) {
    }

    /// `BMC` / `BDC`, with the resolved property list when one was given.
    fn begin_marked_content(&mut self, _tag: &str, _properties: Option<&Object>) {}

    /// `EMC`.
    fn end_marked_content(&mut self) {}

    /// `MP` / `DP`.
    fn marked_content_point(&mut self, _tag: &str, _properties: Option<&Object>) {}

    /// A path-painting operator finished; `path` is in user space, the CTM is
    /// on `state`.
    fn paint_path(&mut self, _mode: PathPaintMode, _path: &Path, _state: &GraphicsState) {}

    /// `Do` on an image XObject, or an inline image. Sample data is still in
    /// its stored encoding.
    fn draw_image(&mut self, _image: &ImageXObject, _state: &GraphicsState) {}

    /// `sh` with the named shading dictionary.
    fn draw_shading(&mut self, _name: &str, _shading: &Object, _state: &GraphicsState) {}

    /// `d0` / `d1` inside a Type 3 char proc.
    fn type3_glyph_metrics(&mut self, _wx: f64, _wy: f64, _bbox: Option<Rect>) {}

    /// An operator with no registered handler.
    fn unsupported_operator(&mut self, _name: &str, _operands: &[Object]) {}

    /// Lets the sink override the engine's recovery policy for a failed
    /// operator. Returning `None` applies the built-in policy.
    fn operator_error(&mut self, _operator: &str, _error: &EngineError) -> Option<Recovery> {
        None
    }
}

/// A glyph event captured by [`RecordingSink`].
#[derive(Debug, Clone)]
pub struct GlyphEvent {
    pub trm: Matrix,
    pub font: String,
    pub code: GlyphCode,
    pub displacement: Point,
}

/// A path-paint event captured by [`RecordingSink`], with the graphics state
/// cloned at paint time.
#[derive(Debug, Clone)]
pub struct PaintEvent {
    pub mode: PathPaintMode,
    pub path: Path,
    pub state: GraphicsState,
}

/// A sink that records events for inspection; the reference sink for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Human-readable event trace, in emission order
    pub events: Vec<String>,
    pub glyphs: Vec<GlyphEvent>,
    pub paints: Vec<PaintEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }
}

impl EventSink for RecordingSink {
    fn begin_text(&mut self) {
        self.events.push("begin_text".to_string());
    }

    fn end_text(&mut self) {
        self.events.push("end_text".to_string());
    }

    fn show_glyph(
        &mut self,
        trm: &Matrix,
        font: &Rc<dyn Font>,
        code: GlyphCode,
        displacement: Point,
    ) {
        self.events
            .push(format!("show_glyph({}, {})", font.name(), code.value));
        self.glyphs.push(GlyphEvent {
            trm: *trm,
            font: font.name().to_string(),
            code,
            displacement,
        });
    }

    fn begin_marked_content(&mut self, tag: &str, properties: Option<&Object>) {
        self.events.push(format!(
            "begin_marked_content({}, props={})",
            tag,
            properties.is_some()
        ));
    }

    fn end_marked_content(&mut self) {
        self.events.push("end_marked_content".to_string());
    }

    fn marked_content_point(&mut self, tag: &str, _properties: Option<&Object>) {
        self.events.push(format!("marked_content_point({})", tag));
    }

    fn paint_path(&mut self, mode: PathPaintMode, path: &Path, state: &GraphicsState) {
        self.events.push(format!("paint_path({:?})", mode));
        self.paints.push(PaintEvent {
            mode,
            path: path.clone(),
            state: state.clone(),
        });
    }

    fn draw_image(&mut self, image: &ImageXObject, _state: &GraphicsState) {
        self.events
            .push(format!("draw_image({}x{})", image.width, image.height));
    }

    fn draw_shading(&mut self, name: &str, _shading: &Object, _state: &GraphicsState) {
        self.events.push(format!("draw_shading({})", name));
    }

    fn type3_glyph_metrics(&mut self, wx: f64, _wy: f64, bbox: Option<Rect>) {
        self.events
            .push(format!("type3_glyph_metrics({}, bbox={})", wx, bbox.is_some()));
    }

    fn unsupported_operator(&mut self, name: &str, operands: &[Object]) {
        self.events
            .push(format!("unsupported({}, {} operands)", name, operands.len()));
    }
}
