use std::fmt;

/// Error type for content-stream interpretation.
///
/// The variants mirror the recovery taxonomy of the engine: the four
/// "missing/empty" kinds are recoverable under the default (lenient) policy,
/// everything else propagates to the caller.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// An operator handler found fewer (or wrongly typed) operands than it
    /// requires.
    MissingOperand {
        operator: String,
        expected: usize,
        found: usize,
    },

    /// A name referenced a font, XObject, color space, pattern, shading or
    /// graphics-state parameter dictionary that is absent from the effective
    /// resource scope.
    MissingResource {
        kind: &'static str,
        name: String,
    },

    /// An image uses a filter for which no reader has been registered.
    MissingImageReader { filter: String },

    /// `Q` (or an equivalent restore) executed with nothing left to pop.
    EmptyGraphicsStack,

    /// A `TJ` array element of an unexpected kind.
    MalformedTextArray { found: &'static str },

    /// Malformed content-stream syntax, surfaced by the tokenizer.
    Parse { message: String },

    /// Anything else bubbling out of an operator handler.
    Other(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MissingOperand {
                operator,
                expected,
                found,
            } => {
                write!(
                    f,
                    "operator '{}' expects {} operand(s), found {}",
                    operator, expected, found
                )
            }
            EngineError::MissingResource { kind, name } => {
                write!(f, "missing {} resource '{}'", kind, name)
            }
            EngineError::MissingImageReader { filter } => {
                write!(f, "no image reader registered for filter '{}'", filter)
            }
            EngineError::EmptyGraphicsStack => {
                write!(f, "cannot restore: graphics state stack is empty")
            }
            EngineError::MalformedTextArray { found } => {
                write!(f, "unexpected {} element in text-showing array", found)
            }
            EngineError::Parse { message } => {
                write!(f, "content stream parse error: {}", message)
            }
            EngineError::Other(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl EngineError {
    /// Creates a missing-operand error.
    pub fn missing_operand<S: Into<String>>(operator: S, expected: usize, found: usize) -> Self {
        EngineError::MissingOperand {
            operator: operator.into(),
            expected,
            found,
        }
    }

    /// Creates a missing-resource error for the given resource category.
    pub fn missing_resource<S: Into<String>>(kind: &'static str, name: S) -> Self {
        EngineError::MissingResource {
            kind,
            name: name.into(),
        }
    }

    /// Creates a missing-image-reader error.
    pub fn missing_image_reader<S: Into<String>>(filter: S) -> Self {
        EngineError::MissingImageReader {
            filter: filter.into(),
        }
    }

    /// Creates a malformed-text-array error naming the offending object kind.
    pub fn malformed_text_array(found: &'static str) -> Self {
        EngineError::MalformedTextArray { found }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        EngineError::Parse {
            message: message.into(),
        }
    }

    /// Creates a generic error.
    pub fn other<S: Into<String>>(message: S) -> Self {
        EngineError::Other(message.into())
    }
}

impl std::error::Error for EngineError {}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
