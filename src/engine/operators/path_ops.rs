//! Path construction, painting and clipping operators.

use crate::core::error::EngineResult;
use crate::core::geometry::Point;
use crate::core::graphics::FillRule;
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::operator::{OperatorHandler, number_arg};
use crate::engine::sink::{EventSink, PathPaintMode};

/// `m`
pub struct MoveTo;

impl<S: EventSink> OperatorHandler<S> for MoveTo {
    fn name(&self) -> &'static str {
        "m"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let x = number_arg(operator, operands, 0)?;
        let y = number_arg(operator, operands, 1)?;
        engine.current_path_mut().move_to(x, y);
        Ok(())
    }
}

/// `l`
pub struct LineTo;

impl<S: EventSink> OperatorHandler<S> for LineTo {
    fn name(&self) -> &'static str {
        "l"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let x = number_arg(operator, operands, 0)?;
        let y = number_arg(operator, operands, 1)?;
        engine.current_path_mut().line_to(x, y);
        Ok(())
    }
}

/// `c`: both control points given.
pub struct CurveTo;

impl<S: EventSink> OperatorHandler<S> for CurveTo {
    fn name(&self) -> &'static str {
        "c"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let c1 = Point::new(
            number_arg(operator, operands, 0)?,
            number_arg(operator, operands, 1)?,
        );
        let c2 = Point::new(
            number_arg(operator, operands, 2)?,
            number_arg(operator, operands, 3)?,
        );
        let end = Point::new(
            number_arg(operator, operands, 4)?,
            number_arg(operator, operands, 5)?,
        );
        engine.current_path_mut().curve_to(c1, c2, end);
        Ok(())
    }
}

/// `v`: first control point replicated from the current point.
pub struct CurveToReplicateInitialPoint;

impl<S: EventSink> OperatorHandler<S> for CurveToReplicateInitialPoint {
    fn name(&self) -> &'static str {
        "v"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let c2 = Point::new(
            number_arg(operator, operands, 0)?,
            number_arg(operator, operands, 1)?,
        );
        let end = Point::new(
            number_arg(operator, operands, 2)?,
            number_arg(operator, operands, 3)?,
        );
        let c1 = engine.current_path().current_point().unwrap_or(c2);
        engine.current_path_mut().curve_to(c1, c2, end);
        Ok(())
    }
}

/// `y`: second control point replicated from the end point.
pub struct CurveToReplicateFinalPoint;

impl<S: EventSink> OperatorHandler<S> for CurveToReplicateFinalPoint {
    fn name(&self) -> &'static str {
        "y"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let c1 = Point::new(
            number_arg(operator, operands, 0)?,
            number_arg(operator, operands, 1)?,
        );
        let end = Point::new(
            number_arg(operator, operands, 2)?,
            number_arg(operator, operands, 3)?,
        );
        engine.current_path_mut().curve_to(c1, end, end);
        Ok(())
    }
}

/// `h`
pub struct ClosePath;

impl<S: EventSink> OperatorHandler<S> for ClosePath {
    fn name(&self) -> &'static str {
        "h"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.current_path_mut().close();
        Ok(())
    }
}

/// `re`
pub struct AppendRectangle;

impl<S: EventSink> OperatorHandler<S> for AppendRectangle {
    fn name(&self) -> &'static str {
        "re"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let x = number_arg(operator, operands, 0)?;
        let y = number_arg(operator, operands, 1)?;
        let width = number_arg(operator, operands, 2)?;
        let height = number_arg(operator, operands, 3)?;
        engine.current_path_mut().append_rect(x, y, width, height);
        Ok(())
    }
}

/// `S`
pub struct StrokePath;

impl<S: EventSink> OperatorHandler<S> for StrokePath {
    fn name(&self) -> &'static str {
        "S"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::Stroke);
        Ok(())
    }
}

/// `s`
pub struct CloseAndStrokePath;

impl<S: EventSink> OperatorHandler<S> for CloseAndStrokePath {
    fn name(&self) -> &'static str {
        "s"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.current_path_mut().close();
        engine.finish_path(PathPaintMode::Stroke);
        Ok(())
    }
}

/// `f` (and the obsolete `F` spelling)
pub struct FillPathNonZero;

impl<S: EventSink> OperatorHandler<S> for FillPathNonZero {
    fn name(&self) -> &'static str {
        "f"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::Fill(FillRule::NonZero));
        Ok(())
    }
}

/// `F`, kept for PDF 1.0 producers.
pub struct LegacyFillPathNonZero;

impl<S: EventSink> OperatorHandler<S> for LegacyFillPathNonZero {
    fn name(&self) -> &'static str {
        "F"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::Fill(FillRule::NonZero));
        Ok(())
    }
}

/// `f*`
pub struct FillPathEvenOdd;

impl<S: EventSink> OperatorHandler<S> for FillPathEvenOdd {
    fn name(&self) -> &'static str {
        "f*"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::Fill(FillRule::EvenOdd));
        Ok(())
    }
}

/// `B`
pub struct FillAndStrokePath;

impl<S: EventSink> OperatorHandler<S> for FillAndStrokePath {
    fn name(&self) -> &'static str {
        "B"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::FillStroke(FillRule::NonZero));
        Ok(())
    }
}

/// `B*`
pub struct FillAndStrokePathEvenOdd;

impl<S: EventSink> OperatorHandler<S> for FillAndStrokePathEvenOdd {
    fn name(&self) -> &'static str {
        "B*"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::FillStroke(FillRule::EvenOdd));
        Ok(())
    }
}

/// `b`
pub struct CloseFillAndStrokePath;

impl<S: EventSink> OperatorHandler<S> for CloseFillAndStrokePath {
    fn name(&self) -> &'static str {
        "b"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.current_path_mut().close();
        engine.finish_path(PathPaintMode::FillStroke(FillRule::NonZero));
        Ok(())
    }
}

/// `b*`
pub struct CloseFillAndStrokePathEvenOdd;

impl<S: EventSink> OperatorHandler<S> for CloseFillAndStrokePathEvenOdd {
    fn name(&self) -> &'static str {
        "b*"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.current_path_mut().close();
        engine.finish_path(PathPaintMode::FillStroke(FillRule::EvenOdd));
        Ok(())
    }
}

/// `n`: drop the path unpainted, still ending any pending clip.
pub struct EndPath;

impl<S: EventSink> OperatorHandler<S> for EndPath {
    fn name(&self) -> &'static str {
        "n"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.finish_path(PathPaintMode::None);
        Ok(())
    }
}

/// `W`
pub struct ClipNonZero;

impl<S: EventSink> OperatorHandler<S> for ClipNonZero {
    fn name(&self) -> &'static str {
        "W"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.set_pending_clip(FillRule::NonZero);
        Ok(())
    }
}

/// `W*`
pub struct ClipEvenOdd;

impl<S: EventSink> OperatorHandler<S> for ClipEvenOdd {
    fn name(&self) -> &'static str {
        "W*"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        engine.set_pending_clip(FillRule::EvenOdd);
        Ok(())
    }
}
