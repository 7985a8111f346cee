//! The default operator set.
//!
//! Every operator of PDF 32000-1 Annex A is covered. Handlers are thin: they
//! validate operands, mutate the graphics state and call back into the
//! engine; the engine owns dispatch, state and recursion. Clients replace or
//! extend individual operators through [`StreamEngine::register`].
//!
//! [`StreamEngine::register`]: crate::engine::StreamEngine::register

pub mod color;
pub mod graphics;
pub mod marked_content;
pub mod path_ops;
pub mod text_ops;
pub mod xobject;

use std::rc::Rc;

use crate::engine::operator::OperatorHandler;
use crate::engine::sink::EventSink;

/// All handlers the engine installs at construction.
pub fn default_handlers<S: EventSink>() -> Vec<Rc<dyn OperatorHandler<S>>> {
    vec![
        // Graphics state
        Rc::new(graphics::SaveState),
        Rc::new(graphics::RestoreState),
        Rc::new(graphics::Concatenate),
        Rc::new(graphics::SetLineWidth),
        Rc::new(graphics::SetLineCapStyle),
        Rc::new(graphics::SetLineJoinStyle),
        Rc::new(graphics::SetMiterLimit),
        Rc::new(graphics::SetLineDashPattern),
        Rc::new(graphics::SetRenderingIntent),
        Rc::new(graphics::SetFlatness),
        Rc::new(graphics::SetGraphicsStateParameters),
        // Path construction
        Rc::new(path_ops::MoveTo),
        Rc::new(path_ops::LineTo),
        Rc::new(path_ops::CurveTo),
        Rc::new(path_ops::CurveToReplicateInitialPoint),
        Rc::new(path_ops::CurveToReplicateFinalPoint),
        Rc::new(path_ops::ClosePath),
        Rc::new(path_ops::AppendRectangle),
        // Path painting
        Rc::new(path_ops::StrokePath),
        Rc::new(path_ops::CloseAndStrokePath),
        Rc::new(path_ops::FillPathNonZero),
        Rc::new(path_ops::LegacyFillPathNonZero),
        Rc::new(path_ops::FillPathEvenOdd),
        Rc::new(path_ops::FillAndStrokePath),
        Rc::new(path_ops::FillAndStrokePathEvenOdd),
        Rc::new(path_ops::CloseFillAndStrokePath),
        Rc::new(path_ops::CloseFillAndStrokePathEvenOdd),
        Rc::new(path_ops::EndPath),
        // Clipping
        Rc::new(path_ops::ClipNonZero),
        Rc::new(path_ops::ClipEvenOdd),
        // Color
        Rc::new(color::SetStrokeColorSpace),
        Rc::new(color::SetFillColorSpace),
        Rc::new(color::SetStrokeColor),
        Rc::new(color::SetStrokeColorN),
        Rc::new(color::SetFillColor),
        Rc::new(color::SetFillColorN),
        Rc::new(color::SetStrokeGray),
        Rc::new(color::SetFillGray),
        Rc::new(color::SetStrokeRgb),
        Rc::new(color::SetFillRgb),
        Rc::new(color::SetStrokeCmyk),
        Rc::new(color::SetFillCmyk),
        Rc::new(color::ShadingFill),
        // Text
        Rc::new(text_ops::BeginText),
        Rc::new(text_ops::EndText),
        Rc::new(text_ops::SetCharSpacing),
        Rc::new(text_ops::SetWordSpacing),
        Rc::new(text_ops::SetHorizontalScaling),
        Rc::new(text_ops::SetTextLeading),
        Rc::new(text_ops::SetFontAndSize),
        Rc::new(text_ops::SetTextRenderingMode),
        Rc::new(text_ops::SetTextRise),
        Rc::new(text_ops::MoveText),
        Rc::new(text_ops::MoveTextSetLeading),
        Rc::new(text_ops::SetTextMatrix),
        Rc::new(text_ops::NextLine),
        Rc::new(text_ops::ShowText),
        Rc::new(text_ops::ShowTextAdjusted),
        Rc::new(text_ops::NextLineShowText),
        Rc::new(text_ops::NextLineShowTextWithSpacing),
        Rc::new(text_ops::SetCharWidth),
        Rc::new(text_ops::SetCharWidthAndBounds),
        // XObjects and inline images
        Rc::new(xobject::DrawObject),
        Rc::new(xobject::InlineImage),
        // Marked content and compatibility
        Rc::new(marked_content::BeginMarkedContent),
        Rc::new(marked_content::BeginMarkedContentWithProperties),
        Rc::new(marked_content::EndMarkedContent),
        Rc::new(marked_content::MarkedContentPoint),
        Rc::new(marked_content::MarkedContentPointWithProperties),
        Rc::new(marked_content::BeginCompatibility),
        Rc::new(marked_content::EndCompatibility),
    ]
}
