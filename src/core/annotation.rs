//! Annotations, reduced to what appearance-stream replay needs.

use std::rc::Rc;

use super::geometry::Rect;
use super::stream::FormXObject;

/// An annotation with its rectangle and (optional) normal appearance stream.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// The `/Rect` entry, in default user space
    pub rect: Rect,
    /// The appearance stream to replay, already resolved for the current
    /// appearance state
    pub appearance: Option<Rc<FormXObject>>,
    /// Set when the hidden flag (bit 2 of `/F`) is on
    pub hidden: bool,
}

impl Annotation {
    pub fn new(rect: Rect) -> Self {
        Annotation {
            rect,
            appearance: None,
            hidden: false,
        }
    }

    pub fn with_appearance(mut self, appearance: Rc<FormXObject>) -> Self {
        self.appearance = Some(appearance);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}
