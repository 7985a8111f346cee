//! Tiling patterns.

use super::geometry::Rect;
use super::stream::ContentStream;

/// Whether the pattern cell carries its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintType {
    /// Paint type 1: the cell specifies its own colors
    Colored,
    /// Paint type 2: the cell is a stencil; the caller supplies the color
    Uncolored,
}

/// A tiling pattern: a content stream replicated across the plane.
///
/// The cell's matrix lives on the [`ContentStream`]; callers pass the matrix
/// to use (usually that one, possibly combined with an outer transform) to
/// the engine's tiling-pattern driver.
#[derive(Debug, Clone)]
pub struct TilingPattern {
    pub stream: ContentStream,
    pub bbox: Rect,
    pub x_step: f64,
    pub y_step: f64,
    pub paint_type: PaintType,
}

impl TilingPattern {
    pub fn new(stream: ContentStream, bbox: Rect, paint_type: PaintType) -> Self {
        // Zero steps mean "same as the bbox" in practice
        TilingPattern {
            stream,
            bbox,
            x_step: bbox.width(),
            y_step: bbox.height(),
            paint_type,
        }
    }

    pub fn with_steps(mut self, x_step: f64, y_step: f64) -> Self {
        self.x_step = x_step;
        self.y_step = y_step;
        self
    }
}
