//! Color operators: color-space selection, component colors, the
//! pattern-aware `SCN`/`scn` pair, and shading fills.

use smallvec::SmallVec;

use crate::core::error::{EngineError, EngineResult};
use crate::core::graphics::{ColorComponents, ColorSpace};
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::operator::{OperatorHandler, name_arg, number_arg, require_operands};
use crate::engine::sink::EventSink;

fn set_stroke_space<S: EventSink>(engine: &mut StreamEngine<S>, space: ColorSpace) {
    let state = engine.graphics_state_mut();
    state.stroke_color = space.initial_color();
    state.stroke_color_space = space;
    state.stroke_pattern = None;
}

fn set_fill_space<S: EventSink>(engine: &mut StreamEngine<S>, space: ColorSpace) {
    let state = engine.graphics_state_mut();
    state.fill_color = space.initial_color();
    state.fill_color_space = space;
    state.fill_pattern = None;
}

/// Splits `SCN`/`scn` operands into numeric components and the optional
/// trailing pattern name.
fn components_and_pattern<'a>(
    operator: &str,
    operands: &'a [Object],
) -> EngineResult<(ColorComponents, Option<&'a str>)> {
    let mut components: ColorComponents = SmallVec::new();
    let mut pattern = None;
    for (index, operand) in operands.iter().enumerate() {
        match operand {
            Object::Number(value) => components.push(*value as f32),
            Object::Name(name) if index + 1 == operands.len() => pattern = Some(name.as_str()),
            _ => {
                return Err(EngineError::missing_operand(
                    operator,
                    index + 1,
                    operands.len(),
                ));
            }
        }
    }
    Ok((components, pattern))
}

/// `CS`
pub struct SetStrokeColorSpace;

impl<S: EventSink> OperatorHandler<S> for SetStrokeColorSpace {
    fn name(&self) -> &'static str {
        "CS"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let space = engine.lookup_color_space(name_arg(operator, operands, 0)?)?;
        set_stroke_space(engine, space);
        Ok(())
    }
}

/// `cs`
pub struct SetFillColorSpace;

impl<S: EventSink> OperatorHandler<S> for SetFillColorSpace {
    fn name(&self) -> &'static str {
        "cs"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let space = engine.lookup_color_space(name_arg(operator, operands, 0)?)?;
        set_fill_space(engine, space);
        Ok(())
    }
}

fn set_stroke_color<S: EventSink>(
    engine: &mut StreamEngine<S>,
    operator: &str,
    operands: &[Object],
) -> EngineResult<()> {
    let (components, pattern) = components_and_pattern(operator, operands)?;
    if let Some(name) = pattern {
        // The pattern must exist in scope; the name rides on the state for
        // the sink to resolve at paint time.
        engine.lookup_pattern(name)?;
        engine.graphics_state_mut().stroke_pattern = Some(name.to_string());
    }
    engine.graphics_state_mut().stroke_color = components;
    Ok(())
}

fn set_fill_color<S: EventSink>(
    engine: &mut StreamEngine<S>,
    operator: &str,
    operands: &[Object],
) -> EngineResult<()> {
    let (components, pattern) = components_and_pattern(operator, operands)?;
    if let Some(name) = pattern {
        engine.lookup_pattern(name)?;
        engine.graphics_state_mut().fill_pattern = Some(name.to_string());
    }
    engine.graphics_state_mut().fill_color = components;
    Ok(())
}

/// `SC`
pub struct SetStrokeColor;

impl<S: EventSink> OperatorHandler<S> for SetStrokeColor {
    fn name(&self) -> &'static str {
        "SC"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        set_stroke_color(engine, operator, operands)
    }
}

/// `SCN`
pub struct SetStrokeColorN;

impl<S: EventSink> OperatorHandler<S> for SetStrokeColorN {
    fn name(&self) -> &'static str {
        "SCN"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        set_stroke_color(engine, operator, operands)
    }
}

/// `sc`
pub struct SetFillColor;

impl<S: EventSink> OperatorHandler<S> for SetFillColor {
    fn name(&self) -> &'static str {
        "sc"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        set_fill_color(engine, operator, operands)
    }
}

/// `scn`
pub struct SetFillColorN;

impl<S: EventSink> OperatorHandler<S> for SetFillColorN {
    fn name(&self) -> &'static str {
        "scn"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        set_fill_color(engine, operator, operands)
    }
}

fn components(
    operator: &str,
    operands: &[Object],
    count: usize,
) -> EngineResult<ColorComponents> {
    require_operands(operator, operands, count)?;
    let mut values: ColorComponents = SmallVec::new();
    for index in 0..count {
        values.push(number_arg(operator, operands, index)? as f32);
    }
    Ok(values)
}

/// `G`
pub struct SetStrokeGray;

impl<S: EventSink> OperatorHandler<S> for SetStrokeGray {
    fn name(&self) -> &'static str {
        "G"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let color = components(operator, operands, 1)?;
        set_stroke_space(engine, ColorSpace::DeviceGray);
        engine.graphics_state_mut().stroke_color = color;
        Ok(())
    }
}

/// `g`
pub struct SetFillGray;

impl<S: EventSink> OperatorHandler<S> for SetFillGray {
    fn name(&self) -> &'static str {
        "g"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let color = components(operator, operands, 1)?;
        set_fill_space(engine, ColorSpace::DeviceGray);
        engine.graphics_state_mut().fill_color = color;
        Ok(())
    }
}

/// `RG`
pub struct SetStrokeRgb;

impl<S: EventSink> OperatorHandler<S> for SetStrokeRgb {
    fn name(&self) -> &'static str {
        "RG"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let color = components(operator, operands, 3)?;
        set_stroke_space(engine, ColorSpace::DeviceRgb);
        engine.graphics_state_mut().stroke_color = color;
        Ok(())
    }
}

/// `rg`
pub struct SetFillRgb;

impl<S: EventSink> OperatorHandler<S> for SetFillRgb {
    fn name(&self) -> &'static str {
        "rg"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let color = components(operator, operands, 3)?;
        set_fill_space(engine, ColorSpace::DeviceRgb);
        engine.graphics_state_mut().fill_color = color;
        Ok(())
    }
}

/// `K`
pub struct SetStrokeCmyk;

impl<S: EventSink> OperatorHandler<S> for SetStrokeCmyk {
    fn name(&self) -> &'static str {
        "K"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let color = components(operator, operands, 4)?;
        set_stroke_space(engine, ColorSpace::DeviceCmyk);
        engine.graphics_state_mut().stroke_color = color;
        Ok(())
    }
}

/// `k`
pub struct SetFillCmyk;

impl<S: EventSink> OperatorHandler<S> for SetFillCmyk {
    fn name(&self) -> &'static str {
        "k"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let color = components(operator, operands, 4)?;
        set_fill_space(engine, ColorSpace::DeviceCmyk);
        engine.graphics_state_mut().fill_color = color;
        Ok(())
    }
}

/// `sh`
pub struct ShadingFill;

impl<S: EventSink> OperatorHandler<S> for ShadingFill {
    fn name(&self) -> &'static str {
        "sh"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let name = name_arg(operator, operands, 0)?;
        let shading = engine.lookup_shading(name)?;
        engine.emit_with_state(|sink, state| sink.draw_shading(name, &shading, state));
        Ok(())
    }
}
