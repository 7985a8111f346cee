//! Marked-content and compatibility-section operators.

use crate::core::error::EngineResult;
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::operator::{OperatorHandler, name_arg, require_operands};
use crate::engine::sink::EventSink;

/// Resolves a `BDC`/`DP` property operand: a name is looked up in the
/// `/Properties` resource category, an inline dictionary passes through.
fn resolve_properties<S: EventSink>(
    engine: &StreamEngine<S>,
    operand: Option<&Object>,
) -> Option<Object> {
    match operand {
        Some(Object::Name(name)) => engine
            .lookup_property_list(name)
            .or_else(|| Some(Object::Name(name.clone()))),
        Some(other) => Some(other.clone()),
        None => None,
    }
}

/// `BMC`
pub struct BeginMarkedContent;

impl<S: EventSink> OperatorHandler<S> for BeginMarkedContent {
    fn name(&self) -> &'static str {
        "BMC"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let tag = name_arg(operator, operands, 0)?;
        engine.emit_sink(|sink| sink.begin_marked_content(tag, None));
        Ok(())
    }
}

/// `BDC`
pub struct BeginMarkedContentWithProperties;

impl<S: EventSink> OperatorHandler<S> for BeginMarkedContentWithProperties {
    fn name(&self) -> &'static str {
        "BDC"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        require_operands(operator, operands, 2)?;
        let tag = name_arg(operator, operands, 0)?;
        let properties = resolve_properties(engine, operands.get(1));
        engine.emit_sink(|sink| sink.begin_marked_content(tag, properties.as_ref()));
        Ok(())
    }
}

/// `EMC`
pub struct EndMarkedContent;

impl<S: EventSink> OperatorHandler<S> for EndMarkedContent {
    fn name(&self) -> &'static str {
        "EMC"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.emit_sink(|sink| sink.end_marked_content());
        Ok(())
    }
}

/// `MP`
pub struct MarkedContentPoint;

impl<S: EventSink> OperatorHandler<S> for MarkedContentPoint {
    fn name(&self) -> &'static str {
        "MP"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let tag = name_arg(operator, operands, 0)?;
        engine.emit_sink(|sink| sink.marked_content_point(tag, None));
        Ok(())
    }
}

/// `DP`
pub struct MarkedContentPointWithProperties;

impl<S: EventSink> OperatorHandler<S> for MarkedContentPointWithProperties {
    fn name(&self) -> &'static str {
        "DP"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        require_operands(operator, operands, 2)?;
        let tag = name_arg(operator, operands, 0)?;
        let properties = resolve_properties(engine, operands.get(1));
        engine.emit_sink(|sink| sink.marked_content_point(tag, properties.as_ref()));
        Ok(())
    }
}

/// `BX`: unrecognized operators up to `EX` are expected; nothing to track
/// since unrecognized operators never fail dispatch anyway.
pub struct BeginCompatibility;

impl<S: EventSink> OperatorHandler<S> for BeginCompatibility {
    fn name(&self) -> &'static str {
        "BX"
    }

    fn invoke(
        &self,
        _engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        Ok(())
    }
}

/// `EX`
pub struct EndCompatibility;

impl<S: EventSink> OperatorHandler<S> for EndCompatibility {
    fn name(&self) -> &'static str {
        "EX"
    }

    fn invoke(
        &self,
        _engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        Ok(())
    }
}
