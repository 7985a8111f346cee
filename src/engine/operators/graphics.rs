//! Graphics-state operators: `q Q cm w J j M d ri i gs`.

use log::warn;

use crate::core::error::EngineResult;
use crate::core::graphics::{LineCap, LineJoin, RenderingIntent};
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::operator::{
    OperatorHandler, array_arg, int_arg, matrix_arg, name_arg, number_arg,
};
use crate::engine::sink::EventSink;

/// `q`
pub struct SaveState;

impl<S: EventSink> OperatorHandler<S> for SaveState {
    fn name(&self) -> &'static str {
        "q"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.save_graphics_state();
        Ok(())
    }
}

/// `Q`
pub struct RestoreState;

impl<S: EventSink> OperatorHandler<S> for RestoreState {
    fn name(&self) -> &'static str {
        "Q"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.restore_graphics_state()
    }
}

/// `cm`
pub struct Concatenate;

impl<S: EventSink> OperatorHandler<S> for Concatenate {
    fn name(&self) -> &'static str {
        "cm"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let matrix = matrix_arg(operator, operands)?;
        engine.graphics_state_mut().concatenate(&matrix);
        Ok(())
    }
}

/// `w`
pub struct SetLineWidth;

impl<S: EventSink> OperatorHandler<S> for SetLineWidth {
    fn name(&self) -> &'static str {
        "w"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().line_width = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `J`
pub struct SetLineCapStyle;

impl<S: EventSink> OperatorHandler<S> for SetLineCapStyle {
    fn name(&self) -> &'static str {
        "J"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let code = int_arg(operator, operands, 0)?;
        match LineCap::from_code(code) {
            Some(cap) => engine.graphics_state_mut().line_cap = cap,
            None => warn!("invalid line cap {}, ignoring", code),
        }
        Ok(())
    }
}

/// `j`
pub struct SetLineJoinStyle;

impl<S: EventSink> OperatorHandler<S> for SetLineJoinStyle {
    fn name(&self) -> &'static str {
        "j"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let code = int_arg(operator, operands, 0)?;
        match LineJoin::from_code(code) {
            Some(join) => engine.graphics_state_mut().line_join = join,
            None => warn!("invalid line join {}, ignoring", code),
        }
        Ok(())
    }
}

/// `M`
pub struct SetMiterLimit;

impl<S: EventSink> OperatorHandler<S> for SetMiterLimit {
    fn name(&self) -> &'static str {
        "M"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().miter_limit = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `d`
pub struct SetLineDashPattern;

impl<S: EventSink> OperatorHandler<S> for SetLineDashPattern {
    fn name(&self) -> &'static str {
        "d"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let elements = array_arg(operator, operands, 0)?;
        let phase = number_arg(operator, operands, 1)?;
        let mut array = Vec::with_capacity(elements.len());
        for element in elements {
            match element.as_number() {
                Some(value) => array.push(value),
                None => warn!(
                    "non-numeric dash array element ({}), skipping",
                    element.type_name()
                ),
            }
        }
        engine.set_line_dash_pattern(array, phase);
        Ok(())
    }
}

/// `ri`
pub struct SetRenderingIntent;

impl<S: EventSink> OperatorHandler<S> for SetRenderingIntent {
    fn name(&self) -> &'static str {
        "ri"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let name = name_arg(operator, operands, 0)?;
        engine.graphics_state_mut().rendering_intent = RenderingIntent::from_name(name);
        Ok(())
    }
}

/// `i`
pub struct SetFlatness;

impl<S: EventSink> OperatorHandler<S> for SetFlatness {
    fn name(&self) -> &'static str {
        "i"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        engine.graphics_state_mut().flatness = number_arg(operator, operands, 0)?;
        Ok(())
    }
}

/// `gs`
pub struct SetGraphicsStateParameters;

impl<S: EventSink> OperatorHandler<S> for SetGraphicsStateParameters {
    fn name(&self) -> &'static str {
        "gs"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let name = name_arg(operator, operands, 0)?;
        let parameters = engine.lookup_ext_g_state(name)?;
        engine.apply_ext_g_state(&parameters);
        Ok(())
    }
}
