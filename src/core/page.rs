//! Pages, reduced to the surface the engine consumes: crop box, page matrix,
//! content bytes and resources.

use std::rc::Rc;

use super::geometry::{Matrix, Rect};
use super::resources::ResourceDict;
use super::stream::ContentStream;

/// The engine's view of a page.
#[derive(Debug, Clone)]
pub struct Page {
    crop_box: Rect,
    matrix: Matrix,
    contents: Option<Rc<[u8]>>,
    resources: Option<Rc<ResourceDict>>,
}

impl Page {
    pub fn new(crop_box: Rect) -> Self {
        Page {
            crop_box,
            matrix: Matrix::IDENTITY,
            contents: None,
            resources: None,
        }
    }

    /// Sets the page matrix (rotation handling etc., supplied by the
    /// document layer).
    pub fn with_matrix(mut self, matrix: Matrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_contents(mut self, contents: impl Into<Rc<[u8]>>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn with_resources(mut self, resources: Rc<ResourceDict>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn crop_box(&self) -> Rect {
        self.crop_box
    }

    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    pub fn resources(&self) -> Option<&Rc<ResourceDict>> {
        self.resources.as_ref()
    }

    pub fn has_contents(&self) -> bool {
        self.contents.as_ref().is_some_and(|data| !data.is_empty())
    }

    /// The page contents as a content stream: the page matrix becomes the
    /// stream matrix and the crop box the bounding box.
    pub fn content_stream(&self) -> ContentStream {
        let data: Rc<[u8]> = match &self.contents {
            Some(data) => data.clone(),
            None => Rc::from(&[][..]),
        };
        let mut stream = ContentStream::new(data)
            .with_matrix(self.matrix)
            .with_bbox(self.crop_box);
        if let Some(resources) = &self.resources {
            stream = stream.with_resources(resources.clone());
        }
        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let page = Page::new(Rect::new(0.0, 0.0, 612.0, 792.0));
        assert!(!page.has_contents());
        assert_eq!(page.matrix(), Matrix::IDENTITY);
        assert_eq!(page.content_stream().data(), b"");
    }

    #[test]
    fn test_page_content_stream() {
        let page = Page::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_contents(b"q Q".to_vec());
        assert!(page.has_contents());
        let stream = page.content_stream();
        assert_eq!(stream.data(), b"q Q");
        assert_eq!(stream.bbox().unwrap().width(), 100.0);
    }
}
