//! The operator handler trait and operand extraction helpers.

use crate::core::error::{EngineError, EngineResult};
use crate::core::geometry::Matrix;
use crate::core::parser::Object;
use crate::engine::engine::StreamEngine;
use crate::engine::sink::EventSink;

/// A content-stream operator implementation.
///
/// Handlers are stateless: the engine is passed explicitly on every
/// invocation, so the same handler object can serve any number of engines.
pub trait OperatorHandler<S: EventSink> {
    /// The operator name this handler registers under.
    fn name(&self) -> &'static str;

    /// Executes the operator. `operator` repeats the dispatched name so a
    /// handler registered under an alias can tell which spelling ran.
    fn invoke(
        &self,
        engine: &mut StreamEngine<S>,
        operator: &str,
        operands: &[Object],
    ) -> EngineResult<()>;
}

/// Fails with `MissingOperand` unless at least `expected` operands are
/// present.
pub fn require_operands(
    operator: &str,
    operands: &[Object],
    expected: usize,
) -> EngineResult<()> {
    if operands.len() < expected {
        return Err(EngineError::missing_operand(
            operator,
            expected,
            operands.len(),
        ));
    }
    Ok(())
}

fn operand<'a>(
    operator: &str,
    operands: &'a [Object],
    index: usize,
    expected: usize,
) -> EngineResult<&'a Object> {
    operands
        .get(index)
        .ok_or_else(|| EngineError::missing_operand(operator, expected, operands.len()))
}

/// Extracts a numeric operand.
pub fn number_arg(operator: &str, operands: &[Object], index: usize) -> EngineResult<f64> {
    let expected = index + 1;
    operand(operator, operands, index, expected)?
        .as_number()
        .ok_or_else(|| EngineError::missing_operand(operator, expected, operands.len()))
}

/// Extracts an integer-valued operand.
pub fn int_arg(operator: &str, operands: &[Object], index: usize) -> EngineResult<i64> {
    Ok(number_arg(operator, operands, index)? as i64)
}

/// Extracts a name operand.
pub fn name_arg<'a>(
    operator: &str,
    operands: &'a [Object],
    index: usize,
) -> EngineResult<&'a str> {
    let expected = index + 1;
    operand(operator, operands, index, expected)?
        .as_name()
        .ok_or_else(|| EngineError::missing_operand(operator, expected, operands.len()))
}

/// Extracts a string operand.
pub fn string_arg<'a>(
    operator: &str,
    operands: &'a [Object],
    index: usize,
) -> EngineResult<&'a [u8]> {
    let expected = index + 1;
    operand(operator, operands, index, expected)?
        .as_string()
        .ok_or_else(|| EngineError::missing_operand(operator, expected, operands.len()))
}

/// Extracts an array operand.
pub fn array_arg<'a>(
    operator: &str,
    operands: &'a [Object],
    index: usize,
) -> EngineResult<&'a [Object]> {
    let expected = index + 1;
    operand(operator, operands, index, expected)?
        .as_array()
        .ok_or_else(|| EngineError::missing_operand(operator, expected, operands.len()))
}

/// Extracts six numbers as a matrix (`cm`, `Tm`).
pub fn matrix_arg(operator: &str, operands: &[Object]) -> EngineResult<Matrix> {
    require_operands(operator, operands, 6)?;
    let mut values = [0.0; 6];
    for (index, value) in values.iter_mut().enumerate() {
        *value = number_arg(operator, operands, index)?;
    }
    Ok(Matrix::from_array(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_arg() {
        let operands = vec![Object::Number(1.5), Object::Name("N".to_string())];
        assert_eq!(number_arg("w", &operands, 0).unwrap(), 1.5);
        // Wrong type reports MissingOperand, same as absence
        assert!(matches!(
            number_arg("w", &operands, 1),
            Err(EngineError::MissingOperand { .. })
        ));
        assert!(matches!(
            number_arg("w", &operands, 2),
            Err(EngineError::MissingOperand { .. })
        ));
    }

    #[test]
    fn test_matrix_arg() {
        let operands: Vec<Object> = [1.0, 0.0, 0.0, 1.0, 10.0, 20.0]
            .iter()
            .map(|n| Object::Number(*n))
            .collect();
        let matrix = matrix_arg("cm", &operands).unwrap();
        assert_eq!(matrix.e, 10.0);
        assert_eq!(matrix.f, 20.0);

        let short: Vec<Object> = operands[..4].to_vec();
        assert!(matrix_arg("cm", &short).is_err());
    }
}
