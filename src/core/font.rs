//! The font capability surface consumed by the text sub-engine.
//!
//! The engine needs very little from a font: how to cut the next character
//! code out of a string operand, the glyph's advance in text space, and the
//! vertical-mode position vector. Type 3 fonts additionally expose their char
//! procs and font matrix so glyphs can be replayed as nested content streams.

use std::rc::Rc;

use super::error::{EngineError, EngineResult};
use super::geometry::{Matrix, Point};
use super::stream::ContentStream;

/// A character code decoded from a string operand, together with the number
/// of bytes it consumed. Word spacing applies only to the single-byte code 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCode {
    pub value: u32,
    pub byte_count: u8,
}

impl GlyphCode {
    pub fn new(value: u32, byte_count: u8) -> Self {
        GlyphCode { value, byte_count }
    }

    /// True exactly when this code triggers word spacing.
    pub fn is_word_space(&self) -> bool {
        self.byte_count == 1 && self.value == 32
    }
}

/// Cursor over the bytes of a string operand. `Font::read_code` consumes one
/// to n bytes per call.
#[derive(Debug)]
pub struct CodeReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CodeReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        CodeReader { bytes, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos.min(self.bytes.len())
    }

    pub fn read_byte(&mut self) -> EngineResult<u8> {
        let byte = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| EngineError::parse("string operand exhausted mid-code"))?;
        self.pos += 1;
        Ok(byte)
    }
}

/// A font, as seen by the engine.
///
/// Implementations come from the client's document model; the engine only
/// ships [`StandardFont`] so it can keep showing text when a content stream
/// forgets to select a font.
pub trait Font: std::fmt::Debug {
    /// The font's name, for diagnostics and sink events.
    fn name(&self) -> &str;

    /// Decodes the next character code, consuming 1-n bytes.
    fn read_code(&self, reader: &mut CodeReader<'_>) -> EngineResult<GlyphCode>;

    /// The glyph's advance vector in text space (glyph-space units / 1000).
    fn displacement(&self, code: GlyphCode) -> Point;

    /// Whether the font uses vertical writing mode.
    fn is_vertical(&self) -> bool {
        false
    }

    /// Text-space offset from the horizontal origin to the vertical origin.
    /// Only meaningful for vertical fonts.
    fn position_vector(&self, _code: GlyphCode) -> Point {
        Point::ZERO
    }

    /// Type 3 discriminator; `Some` routes glyphs through char-proc replay.
    fn type3(&self) -> Option<&dyn Type3Font> {
        None
    }
}

/// The extra capabilities of a Type 3 font.
pub trait Type3Font: std::fmt::Debug {
    /// The content stream drawing the glyph for `code`, if one exists.
    fn char_proc(&self, code: GlyphCode) -> Option<Rc<ContentStream>>;

    /// The font matrix mapping glyph space to text space.
    fn font_matrix(&self) -> Matrix;
}

/// Glyph widths of the built-in Helvetica, for codes 32..=126, in
/// glyph-space units (Adobe AFM metrics).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // 'a'..'p'
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'q'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// A metrics-only standard font with single-byte codes.
///
/// Used as the fallback when a text-showing operator runs without a font
/// selected; clients may also use it for simple-font documents where real
/// glyph programs are not needed.
#[derive(Debug, Clone)]
pub struct StandardFont {
    name: String,
    widths: &'static [u16],
    first_code: u32,
    default_width: u16,
}

impl StandardFont {
    /// The built-in Helvetica metrics.
    pub fn helvetica() -> Self {
        StandardFont {
            name: "Helvetica".to_string(),
            widths: &HELVETICA_WIDTHS,
            first_code: 32,
            default_width: 500,
        }
    }
}

impl Font for StandardFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_code(&self, reader: &mut CodeReader<'_>) -> EngineResult<GlyphCode> {
        let byte = reader.read_byte()?;
        Ok(GlyphCode::new(byte as u32, 1))
    }

    fn displacement(&self, code: GlyphCode) -> Point {
        let width = code
            .value
            .checked_sub(self.first_code)
            .and_then(|index| self.widths.get(index as usize))
            .copied()
            .unwrap_or(self.default_width);
        Point::new(f64::from(width) / 1000.0, 0.0)
    }
}
