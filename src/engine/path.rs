//! Incremental path construction.
//!
//! Path operators build the current path in user space; painting operators
//! hand the finished path to the sink and reset it. Clipping transforms the
//! path into device space first.

use crate::core::geometry::{Matrix, Point, Rect};

/// A path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Move to a new point (starts a new subpath)
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Cubic Bézier curve (control 1, control 2, end)
    CurveTo(Point, Point, Point),
    /// Close the current subpath
    Close,
}

/// A path under construction or handed to the sink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    elements: Vec<PathElement>,
    current_point: Option<Point>,
    subpath_start: Option<Point>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    /// A closed rectangle path.
    pub fn from_rect(rect: Rect) -> Self {
        let mut path = Path::new();
        path.append_rect(rect.x0, rect.y0, rect.width(), rect.height());
        path
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.current_point = None;
        self.subpath_start = None;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        self.elements.push(PathElement::MoveTo(p));
        self.current_point = Some(p);
        self.subpath_start = Some(p);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        // A lone line segment gets an implicit starting move
        if self.current_point.is_none() {
            self.move_to(x, y);
            return;
        }
        let p = Point::new(x, y);
        self.elements.push(PathElement::LineTo(p));
        self.current_point = Some(p);
    }

    pub fn curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        if self.current_point.is_none() {
            self.move_to(c1.x, c1.y);
        }
        self.elements.push(PathElement::CurveTo(c1, c2, end));
        self.current_point = Some(end);
    }

    /// Appends a closed rectangle subpath (the `re` operator).
    pub fn append_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close();
    }

    pub fn close(&mut self) {
        if !self.elements.is_empty() {
            self.elements.push(PathElement::Close);
            self.current_point = self.subpath_start;
        }
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// The path with every coordinate mapped through `m`.
    pub fn transform(&self, m: &Matrix) -> Path {
        let elements = self
            .elements
            .iter()
            .map(|element| match element {
                PathElement::MoveTo(p) => PathElement::MoveTo(m.transform_point(*p)),
                PathElement::LineTo(p) => PathElement::LineTo(m.transform_point(*p)),
                PathElement::CurveTo(c1, c2, end) => PathElement::CurveTo(
                    m.transform_point(*c1),
                    m.transform_point(*c2),
                    m.transform_point(*end),
                ),
                PathElement::Close => PathElement::Close,
            })
            .collect();
        Path {
            elements,
            current_point: self.current_point.map(|p| m.transform_point(p)),
            subpath_start: self.subpath_start.map(|p| m.transform_point(p)),
        }
    }

    /// Control-polygon bounding box; curves are bounded by their control
    /// points, which is good enough for clip estimation.
    pub fn bounding_box(&self) -> Option<Rect> {
        if self.elements.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        let mut include = |p: &Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };
        for element in &self.elements {
            match element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => include(p),
                PathElement::CurveTo(c1, c2, end) => {
                    include(c1);
                    include(c2);
                    include(end);
                }
                PathElement::Close => {}
            }
        }
        Some(Rect::new(min_x, min_y, max_x, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.bounding_box(), None);
    }

    #[test]
    fn test_construction() {
        let mut path = Path::new();
        path.move_to(10.0, 20.0);
        path.line_to(30.0, 40.0);
        assert_eq!(path.current_point(), Some(Point::new(30.0, 40.0)));
        path.close();
        assert_eq!(path.current_point(), Some(Point::new(10.0, 20.0)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_rect() {
        let path = Path::from_rect(Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(path.len(), 5); // move + 3 lines + close
        assert_eq!(
            path.bounding_box(),
            Some(Rect::new(10.0, 20.0, 110.0, 70.0))
        );
    }

    #[test]
    fn test_implicit_move() {
        let mut path = Path::new();
        path.line_to(30.0, 40.0);
        assert_eq!(path.elements()[0], PathElement::MoveTo(Point::new(30.0, 40.0)));
    }

    #[test]
    fn test_transform() {
        let mut path = Path::new();
        path.move_to(1.0, 2.0);
        path.line_to(3.0, 4.0);
        let scaled = path.transform(&Matrix::scaling(10.0, 10.0));
        assert_eq!(
            scaled.elements()[1],
            PathElement::LineTo(Point::new(30.0, 40.0))
        );
        assert_eq!(scaled.current_point(), Some(Point::new(30.0, 40.0)));
    }
}
