//! Document-model surface and content-stream tokenization.

pub mod annotation;
pub mod error;
pub mod font;
pub mod geometry;
pub mod graphics;
pub mod lexer;
pub mod page;
pub mod parser;
pub mod pattern;
pub mod resources;
pub mod stream;

pub use annotation::Annotation;
pub use error::{EngineError, EngineResult};
pub use font::{CodeReader, Font, GlyphCode, StandardFont, Type3Font};
pub use geometry::{Matrix, Point, Rect};
pub use graphics::{
    BlendMode, ColorComponents, ColorSpace, DashPattern, ExtGState, FillRule, LineCap, LineJoin,
    RenderingIntent, SoftMask, SoftMaskDef, SoftMaskKind, SoftMaskSetting, TextRenderingMode,
};
pub use lexer::{Lexer, Token};
pub use page::Page;
pub use parser::{ContentItem, ContentParser, Object};
pub use pattern::{PaintType, TilingPattern};
pub use resources::ResourceDict;
pub use stream::{ContentStream, FormXObject, GroupAttributes, ImageXObject, XObject};
