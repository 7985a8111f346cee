//! Imaging-model vocabulary shared between the document surface and the
//! interpreter: line styles, color, blend modes, and the external
//! graphics-state parameter dictionary applied by the `gs` operator.

use std::rc::Rc;

use smallvec::{SmallVec, smallvec};

use super::font::Font;
use super::geometry::Matrix;
use super::stream::FormXObject;

/// Line cap style (PDF 32000-1 section 8.4.3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Butt cap (default)
    #[default]
    Butt = 0,
    /// Round cap
    Round = 1,
    /// Projecting square cap
    ProjectingSquare = 2,
}

impl LineCap {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(LineCap::Butt),
            1 => Some(LineCap::Round),
            2 => Some(LineCap::ProjectingSquare),
            _ => None,
        }
    }
}

/// Line join style (PDF 32000-1 section 8.4.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Miter join (default)
    #[default]
    Miter = 0,
    /// Round join
    Round = 1,
    /// Bevel join
    Bevel = 2,
}

impl LineJoin {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(LineJoin::Miter),
            1 => Some(LineJoin::Round),
            2 => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

/// Winding rule for fills and clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Text rendering mode (PDF 32000-1 section 9.3.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRenderingMode {
    /// Fill text (default)
    #[default]
    Fill = 0,
    Stroke = 1,
    FillStroke = 2,
    /// Invisible text, still advances and still emits glyph events
    Invisible = 3,
    FillClip = 4,
    StrokeClip = 5,
    FillStrokeClip = 6,
    Clip = 7,
}

impl TextRenderingMode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TextRenderingMode::Fill),
            1 => Some(TextRenderingMode::Stroke),
            2 => Some(TextRenderingMode::FillStroke),
            3 => Some(TextRenderingMode::Invisible),
            4 => Some(TextRenderingMode::FillClip),
            5 => Some(TextRenderingMode::StrokeClip),
            6 => Some(TextRenderingMode::FillStrokeClip),
            7 => Some(TextRenderingMode::Clip),
            _ => None,
        }
    }
}

/// Blend mode for transparency composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            // Compatible is a PDF 1.2 alias for Normal
            "Normal" | "Compatible" => Some(BlendMode::Normal),
            "Multiply" => Some(BlendMode::Multiply),
            "Screen" => Some(BlendMode::Screen),
            "Overlay" => Some(BlendMode::Overlay),
            "Darken" => Some(BlendMode::Darken),
            "Lighten" => Some(BlendMode::Lighten),
            "ColorDodge" => Some(BlendMode::ColorDodge),
            "ColorBurn" => Some(BlendMode::ColorBurn),
            "HardLight" => Some(BlendMode::HardLight),
            "SoftLight" => Some(BlendMode::SoftLight),
            "Difference" => Some(BlendMode::Difference),
            "Exclusion" => Some(BlendMode::Exclusion),
            "Hue" => Some(BlendMode::Hue),
            "Saturation" => Some(BlendMode::Saturation),
            "Color" => Some(BlendMode::Color),
            "Luminosity" => Some(BlendMode::Luminosity),
            _ => None,
        }
    }
}

/// Rendering intent (PDF 32000-1 section 8.6.5.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    AbsoluteColorimetric,
    #[default]
    RelativeColorimetric,
    Saturation,
    Perceptual,
}

impl RenderingIntent {
    /// Unknown intents fall back to the default rather than failing; viewers
    /// are expected to tolerate them.
    pub fn from_name(name: &str) -> Self {
        match name {
            "AbsoluteColorimetric" => RenderingIntent::AbsoluteColorimetric,
            "RelativeColorimetric" => RenderingIntent::RelativeColorimetric,
            "Saturation" => RenderingIntent::Saturation,
            "Perceptual" => RenderingIntent::Perceptual,
            _ => RenderingIntent::RelativeColorimetric,
        }
    }
}

/// Color components in the current color space, inline up to CMYK.
pub type ColorComponents = SmallVec<[f32; 4]>;

/// The color spaces the engine models directly. Anything richer (ICC,
/// Separation, Indexed, ...) is resolved by the client into one of these via
/// the resource dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
    /// Pattern space; the color carries a pattern name into the sink
    Pattern,
}

impl ColorSpace {
    /// Maps the device color-space names that need no resource lookup.
    pub fn from_device_name(name: &str) -> Option<Self> {
        match name {
            "DeviceGray" | "G" => Some(ColorSpace::DeviceGray),
            "DeviceRGB" | "RGB" => Some(ColorSpace::DeviceRgb),
            "DeviceCMYK" | "CMYK" => Some(ColorSpace::DeviceCmyk),
            "Pattern" => Some(ColorSpace::Pattern),
            _ => None,
        }
    }

    /// The initial color installed when the space is selected: black for the
    /// device spaces, nothing for patterns.
    pub fn initial_color(&self) -> ColorComponents {
        match self {
            ColorSpace::DeviceGray => smallvec![0.0],
            ColorSpace::DeviceRgb => smallvec![0.0, 0.0, 0.0],
            ColorSpace::DeviceCmyk => smallvec![0.0, 0.0, 0.0, 1.0],
            ColorSpace::Pattern => SmallVec::new(),
        }
    }
}

/// Line dash pattern: alternating on/off lengths plus a starting phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashPattern {
    pub array: Vec<f64>,
    pub phase: f64,
}

impl DashPattern {
    pub fn solid() -> Self {
        DashPattern::default()
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }
}

/// Soft-mask flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftMaskKind {
    Luminosity,
    Alpha,
}

/// A soft mask definition as it appears in an ext-g-state dictionary: the
/// transparency group producing the mask plus its flavor.
#[derive(Debug, Clone)]
pub struct SoftMaskDef {
    pub group: Rc<FormXObject>,
    pub kind: SoftMaskKind,
}

/// A soft mask installed in the graphics state. The initial transformation
/// matrix records the CTM in effect when the `gs` operator ran; mask
/// processing replaces the CTM with it.
#[derive(Debug, Clone)]
pub struct SoftMask {
    pub group: Rc<FormXObject>,
    pub kind: SoftMaskKind,
    pub initial_matrix: Matrix,
}

/// The `/SMask` entry of an ext-g-state: absent, explicitly `/None`, or a
/// mask definition.
#[derive(Debug, Clone, Default)]
pub enum SoftMaskSetting {
    #[default]
    Keep,
    Clear,
    Set(SoftMaskDef),
}

/// An external graphics-state parameter dictionary (`/ExtGState` resource).
///
/// Every field is optional; the `gs` operator applies only the entries that
/// are present.
#[derive(Debug, Clone, Default)]
pub struct ExtGState {
    pub line_width: Option<f64>,
    pub line_cap: Option<LineCap>,
    pub line_join: Option<LineJoin>,
    pub miter_limit: Option<f64>,
    pub dash_pattern: Option<DashPattern>,
    pub rendering_intent: Option<RenderingIntent>,
    pub flatness: Option<f64>,
    pub stroke_alpha: Option<f64>,
    pub fill_alpha: Option<f64>,
    pub blend_mode: Option<BlendMode>,
    pub soft_mask: SoftMaskSetting,
    pub overprint_stroke: Option<bool>,
    pub overprint_fill: Option<bool>,
    pub overprint_mode: Option<i32>,
    pub font: Option<(Rc<dyn Font>, f64)>,
    pub text_knockout: Option<bool>,
}
