//! The text-showing sub-engine.
//!
//! `Tj` and friends funnel into [`StreamEngine::show_text`], which decodes
//! character codes, computes the per-glyph text rendering matrix
//! `Trm = P · Tm · CTM`, emits one glyph event per code, and advances the
//! text matrix by the glyph displacement plus spacing. Type 3 glyphs replay
//! their char procs as nested content streams.

use std::rc::Rc;

use log::{error, warn};

use crate::core::error::EngineResult;
use crate::core::font::{CodeReader, Font, GlyphCode};
use crate::core::geometry::{Matrix, Point};
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::sink::EventSink;

impl<S: EventSink> StreamEngine<S> {
    /// `Tj`: shows a string operand. A distinct entry point so clients can
    /// tell whole-string shows apart from `TJ` fragments if they interpose.
    pub fn show_text_string(&mut self, bytes: &[u8]) -> EngineResult<()> {
        self.show_text(bytes)
    }

    /// `TJ`: alternates positional adjustments and string fragments.
    /// Numbers translate the text matrix, strings are shown, a nested array
    /// is a producer bug worth only a log line, anything else is malformed.
    pub fn show_text_array(&mut self, elements: &[Object]) -> EngineResult<()> {
        for element in elements {
            match element {
                Object::Number(adjustment) => {
                    let text = &self.graphics_state().text;
                    let font_size = text.font_size;
                    let h_scale = text.horizontal_scaling / 100.0;
                    let vertical = text
                        .font
                        .as_ref()
                        .is_some_and(|font| font.is_vertical());
                    let offset = -adjustment / 1000.0 * font_size;
                    let (tx, ty) = if vertical {
                        (0.0, offset)
                    } else {
                        (offset * h_scale, 0.0)
                    };
                    self.apply_text_adjustment(tx, ty);
                }
                Object::String(bytes) => self.show_text(bytes)?,
                Object::Array(_) => {
                    error!("nested array in TJ operand, skipping element");
                }
                other => {
                    return Err(crate::core::error::EngineError::malformed_text_array(
                        other.type_name(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Translates the text matrix by a `TJ` adjustment.
    pub fn apply_text_adjustment(&mut self, tx: f64, ty: f64) {
        match self.text_matrix_mut() {
            Some(tm) => tm.translate(tx, ty),
            None => warn!("text adjustment outside BT/ET, ignoring"),
        }
    }

    /// Shows encoded text, emitting one glyph event per decoded code.
    pub fn show_text(&mut self, bytes: &[u8]) -> EngineResult<()> {
        if self.text_matrix().is_none() {
            warn!("text-showing operator outside BT/ET, ignoring");
            return Ok(());
        }

        let font: Rc<dyn Font> = match self.graphics_state().text.font.clone() {
            Some(font) => font,
            None => {
                let fallback = self.default_font();
                warn!("no font selected, falling back to {}", fallback.name());
                fallback
            }
        };

        let (font_size, h_scale, char_spacing, word_spacing, rise) = {
            let text = &self.graphics_state().text;
            (
                text.font_size,
                text.horizontal_scaling / 100.0,
                text.char_spacing,
                text.word_spacing,
                text.rise,
            )
        };
        let parameters = Matrix::new(font_size * h_scale, 0.0, 0.0, font_size, 0.0, rise);

        let mut reader = CodeReader::new(bytes);
        while !reader.is_empty() {
            let code = font.read_code(&mut reader)?;

            let word_spacing = if code.is_word_space() { word_spacing } else { 0.0 };

            let Some(tm) = self.text_matrix() else {
                // A handler the client registered may have ended the text
                // object mid-string; nothing sensible is left to do.
                warn!("text matrix vanished mid-string, stopping");
                return Ok(());
            };
            let ctm = self.graphics_state().ctm;
            let mut trm = parameters.multiply(&tm).multiply(&ctm);
            if font.is_vertical() {
                let v = font.position_vector(code);
                trm.translate(v.x, v.y);
            }

            let displacement = font.displacement(code);
            self.show_glyph(&trm, &font, code, displacement)?;

            let (tx, ty) = if font.is_vertical() {
                (0.0, displacement.y * font_size + char_spacing + word_spacing)
            } else {
                (
                    (displacement.x * font_size + char_spacing + word_spacing) * h_scale,
                    0.0,
                )
            };
            if let Some(tm) = self.text_matrix_mut() {
                tm.translate(tx, ty);
            }
        }
        Ok(())
    }

    /// Emits the glyph event and, for Type 3 fonts, replays the char proc as
    /// a nested content stream.
    fn show_glyph(
        &mut self,
        trm: &Matrix,
        font: &Rc<dyn Font>,
        code: GlyphCode,
        displacement: Point,
    ) -> EngineResult<()> {
        self.emit_sink(|sink| sink.show_glyph(trm, font, code, displacement));
        match font.type3() {
            Some(type3) => match type3.char_proc(code) {
                Some(char_proc) => {
                    self.process_type3_stream(&char_proc, &type3.font_matrix(), trm)
                }
                None => {
                    warn!("no char proc for code {} in {}", code.value, font.name());
                    Ok(())
                }
            },
            None => {
                self.emit_sink(|sink| sink.show_font_glyph(trm, font, code, displacement));
                Ok(())
            }
        }
    }
}
