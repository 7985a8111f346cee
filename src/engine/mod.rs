//! The content-stream interpreter: engine, graphics-state stack, operator
//! registry and event sink.

pub mod engine;
pub mod graphics_state;
pub mod operator;
pub mod operators;
pub mod path;
pub mod sink;
mod text;

pub use engine::{EngineConfig, StreamEngine};
pub use graphics_state::{ClipPath, GraphicsState, TextState};
pub use operator::OperatorHandler;
pub use path::{Path, PathElement};
pub use sink::{EventSink, GlyphEvent, PaintEvent, PathPaintMode, Recovery, RecordingSink};
