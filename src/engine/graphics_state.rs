//! The graphics state and its text-state sub-record.
//!
//! The state is a value type cloned wholesale by `q` and by nested-stream
//! entry; nothing in it is shared mutably, so a clone is a true snapshot.
//! Fonts are immutable and shared by reference count.

use std::rc::Rc;

use crate::core::font::Font;
use crate::core::geometry::{Matrix, Rect};
use crate::core::graphics::{
    BlendMode, ColorComponents, ColorSpace, DashPattern, FillRule, LineCap, LineJoin,
    RenderingIntent, SoftMask, TextRenderingMode,
};
use crate::engine::path::Path;

/// One entry of the clip chain: a device-space path plus its winding rule.
/// The effective clip region is the intersection of all entries.
#[derive(Debug, Clone)]
pub struct ClipPath {
    pub path: Path,
    pub rule: FillRule,
}

/// Text-specific parameters (PDF 32000-1 section 9.3).
#[derive(Debug, Clone)]
pub struct TextState {
    pub font: Option<Rc<dyn Font>>,
    pub font_size: f64,
    /// Tc, in unscaled text space units
    pub char_spacing: f64,
    /// Tw, applied to single-byte code 32 only
    pub word_spacing: f64,
    /// Tz, as a percentage (default 100)
    pub horizontal_scaling: f64,
    /// TL, consumed by T* and friends
    pub leading: f64,
    /// Ts
    pub rise: f64,
    pub rendering_mode: TextRenderingMode,
    /// TK from an ext-g-state
    pub knockout: bool,
}

impl Default for TextState {
    fn default() -> Self {
        TextState {
            font: None,
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            rise: 0.0,
            rendering_mode: TextRenderingMode::Fill,
            knockout: true,
        }
    }
}

/// The device-independent graphics state (PDF 32000-1 section 8.4).
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current transformation matrix, user space to device space
    pub ctm: Matrix,

    /// Clip chain in device space
    pub clip: Vec<ClipPath>,

    pub stroke_color_space: ColorSpace,
    pub stroke_color: ColorComponents,
    /// Pattern name when the stroke space is `Pattern`
    pub stroke_pattern: Option<String>,

    pub fill_color_space: ColorSpace,
    pub fill_color: ColorComponents,
    /// Pattern name when the fill space is `Pattern`
    pub fill_pattern: Option<String>,

    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub dash_pattern: DashPattern,

    pub rendering_intent: RenderingIntent,
    pub flatness: f64,

    /// CA, stroking alpha constant
    pub stroke_alpha: f64,
    /// ca, non-stroking alpha constant
    pub fill_alpha: f64,
    pub blend_mode: BlendMode,
    pub soft_mask: Option<SoftMask>,

    pub overprint_stroke: bool,
    pub overprint_fill: bool,
    pub overprint_mode: i32,

    pub text: TextState,
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState {
            ctm: Matrix::IDENTITY,
            clip: Vec::new(),
            stroke_color_space: ColorSpace::DeviceGray,
            stroke_color: ColorSpace::DeviceGray.initial_color(),
            stroke_pattern: None,
            fill_color_space: ColorSpace::DeviceGray,
            fill_color: ColorSpace::DeviceGray.initial_color(),
            fill_pattern: None,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash_pattern: DashPattern::solid(),
            rendering_intent: RenderingIntent::RelativeColorimetric,
            flatness: 1.0,
            stroke_alpha: 1.0,
            fill_alpha: 1.0,
            blend_mode: BlendMode::Normal,
            soft_mask: None,
            overprint_stroke: false,
            overprint_fill: false,
            overprint_mode: 0,
            text: TextState::default(),
        }
    }
}

impl GraphicsState {
    pub fn new() -> Self {
        GraphicsState::default()
    }

    /// The state a fresh stack starts from: defaults with the clip set to the
    /// given rectangle (the page crop box, or a pattern cell's bounds).
    pub fn with_clip_rect(rect: Rect) -> Self {
        let mut state = GraphicsState::default();
        state.clip.push(ClipPath {
            path: Path::from_rect(rect),
            rule: FillRule::NonZero,
        });
        state
    }

    /// Concatenates `m` onto the CTM; `m` applies first, as with `cm`.
    pub fn concatenate(&mut self, m: &Matrix) {
        self.ctm = m.multiply(&self.ctm);
    }

    /// Intersects the clip chain with a device-space path.
    pub fn intersect_clip(&mut self, path: Path, rule: FillRule) {
        self.clip.push(ClipPath { path, rule });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;

    #[test]
    fn test_defaults() {
        let state = GraphicsState::new();
        assert_eq!(state.ctm, Matrix::IDENTITY);
        assert_eq!(state.line_width, 1.0);
        assert_eq!(state.stroke_alpha, 1.0);
        assert_eq!(state.fill_color.as_slice(), &[0.0]);
        assert_eq!(state.text.horizontal_scaling, 100.0);
        assert!(state.clip.is_empty());
        assert!(state.dash_pattern.is_solid());
    }

    #[test]
    fn test_concatenate_applies_new_matrix_first() {
        let mut state = GraphicsState::new();
        state.concatenate(&Matrix::translation(10.0, 20.0));
        state.concatenate(&Matrix::scaling(2.0, 2.0));
        // The scale is innermost: the origin maps through scale, then translate.
        assert_eq!(
            state.ctm.transform_point(Point::new(1.0, 1.0)),
            Point::new(12.0, 22.0)
        );
    }

    #[test]
    fn test_clone_is_a_snapshot() {
        let mut state = GraphicsState::new();
        state.line_width = 4.0;
        state.dash_pattern = DashPattern {
            array: vec![3.0, 1.0],
            phase: 0.5,
        };

        let saved = state.clone();
        state.line_width = 9.0;
        state.dash_pattern.array.push(7.0);

        assert_eq!(saved.line_width, 4.0);
        assert_eq!(saved.dash_pattern.array, vec![3.0, 1.0]);
    }

    #[test]
    fn test_with_clip_rect() {
        let state = GraphicsState::with_clip_rect(Rect::new(0.0, 0.0, 612.0, 792.0));
        assert_eq!(state.clip.len(), 1);
        assert_eq!(
            state.clip[0].path.bounding_box(),
            Some(Rect::new(0.0, 0.0, 612.0, 792.0))
        );
    }
}
