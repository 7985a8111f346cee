//! Content-stream handles and XObjects.
//!
//! A [`ContentStream`] is the engine's view of any executable stream: page
//! contents, form XObjects, tiling pattern cells, Type 3 char procs and
//! annotation appearances all reduce to decoded bytes plus an optional
//! resource dictionary, a matrix and a bounding box.

use std::rc::Rc;

use super::geometry::{Matrix, Rect};
use super::resources::ResourceDict;

/// A decoded content stream with its scoping attributes.
#[derive(Debug, Clone)]
pub struct ContentStream {
    data: Rc<[u8]>,
    resources: Option<Rc<ResourceDict>>,
    matrix: Matrix,
    bbox: Option<Rect>,
}

impl ContentStream {
    pub fn new(data: impl Into<Rc<[u8]>>) -> Self {
        ContentStream {
            data: data.into(),
            resources: None,
            matrix: Matrix::IDENTITY,
            bbox: None,
        }
    }

    pub fn with_resources(mut self, resources: Rc<ResourceDict>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn with_matrix(mut self, matrix: Matrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn resources(&self) -> Option<&Rc<ResourceDict>> {
        self.resources.as_ref()
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn bbox(&self) -> Option<Rect> {
        self.bbox
    }
}

/// Transparency-group attributes of a form XObject (`/Group` dictionary with
/// `/S /Transparency`).
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupAttributes {
    pub isolated: bool,
    pub knockout: bool,
}

/// A form XObject: a reusable content stream invoked via `Do`.
#[derive(Debug, Clone)]
pub struct FormXObject {
    pub stream: ContentStream,
    pub group: Option<GroupAttributes>,
}

impl FormXObject {
    pub fn new(stream: ContentStream) -> Self {
        FormXObject {
            stream,
            group: None,
        }
    }

    pub fn transparency_group(stream: ContentStream, group: GroupAttributes) -> Self {
        FormXObject {
            stream,
            group: Some(group),
        }
    }

    pub fn is_transparency_group(&self) -> bool {
        self.group.is_some()
    }
}

/// An image XObject. The engine does not decode samples; it forwards the
/// image to the sink, failing first if the filter needs a reader that was
/// never registered.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    pub bits_per_component: u8,
    /// Encoded sample data, exactly as stored
    pub data: Vec<u8>,
    /// The innermost filter still applied to `data`, if any
    pub filter: Option<String>,
    /// Stencil masks carry no color of their own
    pub image_mask: bool,
}

/// An XObject resource.
#[derive(Debug, Clone)]
pub enum XObject {
    Form(Rc<FormXObject>),
    Image(Rc<ImageXObject>),
}
