//! `Do` and inline images.

use log::error;

use crate::core::error::EngineResult;
use crate::core::parser::Object;
use crate::core::stream::{ImageXObject, XObject};
use crate::engine::engine::StreamEngine;
use crate::engine::operator::{OperatorHandler, name_arg, string_arg};
use crate::engine::sink::EventSink;

/// `Do`: invoke a form or image XObject.
pub struct DrawObject;

impl<S: EventSink> OperatorHandler<S> for DrawObject {
    fn name(&self) -> &'static str {
        "Do"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let name = name_arg(operator, operands, 0)?;
        let x_object = engine.lookup_x_object(name)?;
        match x_object {
            XObject::Form(form) => {
                // Self-referential XObject graphs can nest legitimately a few
                // dozen deep; past the ceiling the stream is pathological.
                if engine.level() > engine.config().max_recursion_depth {
                    error!(
                        "form nesting level {} is too deep, skipping '{}'",
                        engine.level(),
                        name
                    );
                    return Ok(());
                }
                engine.increase_level();
                let result = if form.is_transparency_group() {
                    engine.show_transparency_group(&form)
                } else {
                    engine.show_form(&form)
                };
                engine.decrease_level();
                result
            }
            XObject::Image(image) => engine.draw_image(&image),
        }
    }
}

/// `EI`: the parser folds `BI <dict> ID <data> EI` into a dictionary operand,
/// a data operand and this operator.
pub struct InlineImage;

impl<S: EventSink> OperatorHandler<S> for InlineImage {
    fn name(&self) -> &'static str {
        "EI"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()> {
        let parameters = operands
            .first()
            .and_then(|operand| operand.as_dictionary())
            .cloned()
            .unwrap_or_default();
        let data = string_arg(operator, operands, operands.len().saturating_sub(1))?;

        let integer = |long: &str, short: &str, fallback: f64| {
            parameters
                .get(long)
                .or_else(|| parameters.get(short))
                .and_then(Object::as_number)
                .unwrap_or(fallback)
        };
        let filter = parameters
            .get("Filter")
            .or_else(|| parameters.get("F"))
            .and_then(|object| match object {
                Object::Name(name) => Some(name.clone()),
                // With a filter cascade, the outermost filter decides
                Object::Array(items) => items.first().and_then(|o| o.as_name()).map(String::from),
                _ => None,
            });
        let image_mask = parameters
            .get("ImageMask")
            .or_else(|| parameters.get("IM"))
            .and_then(|object| match object {
                Object::Boolean(flag) => Some(*flag),
                _ => None,
            })
            .unwrap_or(false);

        let image = ImageXObject {
            width: integer("Width", "W", 0.0) as u32,
            height: integer("Height", "H", 0.0) as u32,
            bits_per_component: integer("BitsPerComponent", "BPC", 8.0) as u8,
            data: data.to_vec(),
            filter,
            image_mask,
        };
        engine.draw_image(&image)
    }
}
