//! # PDF Stream Engine
//!
//! A PDF content-stream interpretation engine: it executes the operator
//! sequence of a page while maintaining the full PDF imaging-model state
//! (graphics-state stack, text matrices, resource scope, recursion into
//! nested streams) and reports everything it does to a client-supplied
//! [`EventSink`]. Renderers, text extractors and page analyzers all sit on
//! the same engine and differ only in their sink.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use pdf_stream_engine::{Page, Rect, RecordingSink, StreamEngine};
//!
//! let page = Rc::new(
//!     Page::new(Rect::new(0.0, 0.0, 612.0, 792.0))
//!         .with_contents(b"q 10 0 0 10 100 200 cm 0 0 m 50 50 l S Q".to_vec()),
//! );
//!
//! let mut engine = StreamEngine::new(RecordingSink::new());
//! engine.process_page(&page)?;
//!
//! for event in &engine.sink().events {
//!     println!("{}", event);
//! }
//! # Ok::<(), pdf_stream_engine::EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! Two layers:
//!
//! 1. **Document surface** ([`core`]): the minimal capability types the
//!    engine consumes (pages, content-stream handles, fonts, resource
//!    dictionaries) plus the content tokenizer. A real document layer
//!    (object parsing, filters, font programs) plugs in by implementing
//!    these types; they are deliberately free of file-format concerns.
//! 2. **Interpreter** ([`engine`]): the stream executor, the operator
//!    registry with the default PDF operator set, the graphics-state stack,
//!    the text-showing sub-engine, and the nested-stream drivers for form
//!    XObjects, transparency groups, soft masks, tiling patterns, Type 3
//!    glyphs and annotation appearances.
//!
//! ## Recovery policy
//!
//! Damaged streams are the norm in the wild. By default the engine logs and
//! keeps going on missing operands, missing resources, missing image readers,
//! graphics-stack underflow and anything that fails under `Do`; all other
//! errors propagate. [`EngineConfig::strict`] turns the leniency off, and a
//! sink can override the call per operator.
//!
//! [`EngineConfig::strict`]: crate::engine::EngineConfig

pub mod core;
pub mod engine;

// Re-export the main types for convenience
pub use core::{
    Annotation, CodeReader, ContentItem, ContentParser, ContentStream, EngineError, EngineResult,
    Font, FormXObject, GlyphCode, GroupAttributes, ImageXObject, Matrix, Object, Page, PaintType,
    Point, Rect, ResourceDict, StandardFont, TilingPattern, Type3Font, XObject,
};
pub use core::{
    BlendMode, ColorComponents, ColorSpace, DashPattern, ExtGState, FillRule, LineCap, LineJoin,
    RenderingIntent, SoftMask, SoftMaskDef, SoftMaskKind, SoftMaskSetting, TextRenderingMode,
};
pub use engine::{
    ClipPath, EngineConfig, EventSink, GlyphEvent, GraphicsState, OperatorHandler, PaintEvent,
    Path, PathElement, PathPaintMode, RecordingSink, Recovery, StreamEngine, TextState,
};
