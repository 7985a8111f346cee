//! Text object, state, positioning and showing operators, plus the Type 3
//! glyph-metrics pair.

use log::warn;

use crate::core::error::EngineResult;
use crate::core::geometry::{Matrix, Rect};
use crate::core::graphics::TextRenderingMode;
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::operator::{
    OperatorHandler, array_arg, int_arg, matrix_arg, name_arg, number_arg, string_arg,
};
use crate::engine::sink::EventSink;

/// `BT`
pub struct BeginText;

impl<S: EventSink> OperatorHandler<S> for BeginText {
    fn name(&self) -> &'static str {
        "BT"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.set_text_matrix(Some(Matrix::IDENTITY));
        engine.set_text_line_matrix(Some(Matrix::IDENTITY));
        engine.emit_sink(|sink| sink.begin_text());
        Ok(())
    }
}

/// `ET`
pub struct EndText;

impl<S: EventSink> OperatorHandler<S> for EndText {
    fn name(&self) -> &'static str {
        "ET"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.set_text_matrix(None);
        engine.set_text_line_matrix(None);
        engine.emit_sink(|sink| sink.end_text());
        Ok(())
    }
}

/// `Tc`
pub struct SetCharSpacing;

impl<S: EventSink> OperatorHandler<S> for SetCharSpacing {
    fn name(&self) -> &'static str {
        "Tc"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().text.char_spacing = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `Tw`
pub struct SetWordSpacing;

impl<S: EventSink> OperatorHandler<S> for SetWordSpacing {
    fn name(&self) -> &'static str {
        "Tw"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().text.word_spacing = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `Tz`
pub struct SetHorizontalScaling;

impl<S: EventSink> OperatorHandler<S> for SetHorizontalScaling {
    fn name(&self) -> &'static str {
        "Tz"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().text.horizontal_scaling = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `TL`
pub struct SetTextLeading;

impl<S: EventSink> OperatorHandler<S> for SetTextLeading {
    fn name(&self) -> &'static str {
        "TL"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().text.leading = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `Tf`
pub struct SetFontAndSize;

impl<S: EventSink> OperatorHandler<S> for SetFontAndSize {
    fn name(&self) -> &'static str {
        "Tf"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let name = name_arg(operator, operands, 0)?;
        let size = number_arg(operator, operands, 1)?;
        let font = engine.lookup_font(name)?;
        let text = &mut engine.graphics_state_mut().text;
        text.font = Some(font);
        text.font_size = size;
        Ok(())
    }
}

/// `Tr`
pub struct SetTextRenderingMode;

impl<S: EventSink> OperatorHandler<S> for SetTextRenderingMode {
    fn name(&self) -> &'static str {
        "Tr"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let code = int_arg(operator, operands, 0)?;
        match TextRenderingMode::from_code(code) {
            Some(mode) => engine.graphics_state_mut().text.rendering_mode = mode,
            None => warn!("invalid text rendering mode {}, ignoring", code),
        }
        Ok(())
    }
}

/// `Ts`
pub struct SetTextRise;

impl<S: EventSink> OperatorHandler<S> for SetTextRise {
    fn name(&self) -> &'static str {
        "Ts"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().text.rise = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `Td`
pub struct MoveText;

impl<S: EventSink> OperatorHandler<S> for MoveText {
    fn name(&self) -> &'static str {
        "Td"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let tx = number_arg(operator, operands, 0)?;
        let ty = number_arg(operator, operands, 1)?;
        let Some(tlm) = engine.text_line_matrix_mut() else {
            warn!("Td outside BT/ET, ignoring");
            return Ok(());
        };
        tlm.translate(tx, ty);
        let moved = *tlm;
        engine.set_text_matrix(Some(moved));
        Ok(())
    }
}

/// `TD`: `Td` plus setting the leading to `-ty`.
pub struct MoveTextSetLeading;

impl<S: EventSink> OperatorHandler<S> for MoveTextSetLeading {
    fn name(&self) -> &'static str {
        "TD"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let ty = number_arg(operator, operands, 1)?;
        engine.graphics_state_mut().text.leading = -ty;
        engine.process_operator("Td", operands)
    }
}

/// `Tm`
pub struct SetTextMatrix;

impl<S: EventSink> OperatorHandler<S> for SetTextMatrix {
    fn name(&self) -> &'static str {
        "Tm"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let matrix = matrix_arg(operator, operands)?;
        if engine.text_matrix().is_none() {
            warn!("Tm outside BT/ET, ignoring");
            return Ok(());
        }
        engine.set_text_matrix(Some(matrix));
        engine.set_text_line_matrix(Some(matrix));
        Ok(())
    }
}

/// `T*`
pub struct NextLine;

impl<S: EventSink> OperatorHandler<S> for NextLine {
    fn name(&self) -> &'static str {
        "T*"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        let leading = engine.graphics_state().text.leading;
        let Some(tlm) = engine.text_line_matrix_mut() else {
            warn!("T* outside BT/ET, ignoring");
            return Ok(());
        };
        tlm.translate(0.0, -leading);
        let moved = *tlm;
        engine.set_text_matrix(Some(moved));
        Ok(())
    }
}

/// `Tj`
pub struct ShowText;

impl<S: EventSink> OperatorHandler<S> for ShowText {
    fn name(&self) -> &'static str {
        "Tj"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let bytes = string_arg(operator, operands, 0)?;
        engine.show_text_string(bytes)
    }
}

/// `TJ`
pub struct ShowTextAdjusted;

impl<S: EventSink> OperatorHandler<S> for ShowTextAdjusted {
    fn name(&self) -> &'static str {
        "TJ"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let elements = array_arg(operator, operands, 0)?;
        engine.show_text_array(elements)
    }
}

/// `'`: next line, then show.
pub struct NextLineShowText;

impl<S: EventSink> OperatorHandler<S> for NextLineShowText {
    fn name(&self) -> &'static str {
        "'"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let bytes = string_arg(operator, operands, 0)?;
        engine.process_operator("T*", &[])?;
        engine.show_text_string(bytes)
    }
}

/// `"`: set word and char spacing, next line, show.
pub struct NextLineShowTextWithSpacing;

impl<S: EventSink> OperatorHandler<S> for NextLineShowTextWithSpacing {
    fn name(&self) -> &'static str {
        "\""
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let word_spacing = number_arg(operator, operands, 0)?;
        let char_spacing = number_arg(operator, operands, 1)?;
        let bytes = string_arg(operator, operands, 2)?;
        let text = &mut engine.graphics_state_mut().text;
        text.word_spacing = word_spacing;
        text.char_spacing = char_spacing;
        engine.process_operator("T*", &[])?;
        engine.show_text_string(bytes)
    }
}

/// `d0`: Type 3 glyph width.
pub struct SetCharWidth;

impl<S: EventSink> OperatorHandler<S> for SetCharWidth {
    fn name(&self) -> &'static str {
        "d0"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let wx = number_arg(operator, operands, 0)?;
        let wy = number_arg(operator, operands, 1)?;
        engine.emit_sink(|sink| sink.type3_glyph_metrics(wx, wy, None));
        Ok(())
    }
}

/// `d1`: Type 3 glyph width and bounding box.
pub struct SetCharWidthAndBounds;

impl<S: EventSink> OperatorHandler<S> for SetCharWidthAndBounds {
    fn name(&self) -> &'static str {
        "d1"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let wx = number_arg(operator, operands, 0)?;
        let wy = number_arg(operator, operands, 1)?;
        let llx = number_arg(operator, operands, 2)?;
        let lly = number_arg(operator, operands, 3)?;
        let urx = number_arg(operator, operands, 4)?;
        let ury = number_arg(operator, operands, 5)?;
        let bbox = Rect::new(llx, lly, urx, ury);
        engine.emit_sink(|sink| sink.type3_glyph_metrics(wx, wy, Some(bbox)));
        Ok(())
    }
}
