//! Resource dictionaries.
//!
//! The engine treats a resource dictionary as a set of name-to-object maps,
//! one per category, already resolved by the client's document layer. Lookup
//! failures surface as `MissingResource` errors at the operator that asked.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::font::Font;
use super::graphics::{ColorSpace, ExtGState};
use super::parser::Object;
use super::pattern::TilingPattern;
use super::stream::XObject;

/// A resolved resource dictionary.
#[derive(Debug, Clone, Default)]
pub struct ResourceDict {
    fonts: FxHashMap<String, Rc<dyn Font>>,
    x_objects: FxHashMap<String, XObject>,
    ext_g_states: FxHashMap<String, Rc<ExtGState>>,
    color_spaces: FxHashMap<String, ColorSpace>,
    patterns: FxHashMap<String, Rc<TilingPattern>>,
    /// Shading dictionaries are opaque to the engine and flow to the sink
    shadings: FxHashMap<String, Object>,
    /// Property lists for marked-content operators
    properties: FxHashMap<String, Object>,
}

impl ResourceDict {
    pub fn new() -> Self {
        ResourceDict::default()
    }

    pub fn insert_font(&mut self, name: impl Into<String>, font: Rc<dyn Font>) {
        self.fonts.insert(name.into(), font);
    }

    pub fn insert_x_object(&mut self, name: impl Into<String>, x_object: XObject) {
        self.x_objects.insert(name.into(), x_object);
    }

    pub fn insert_ext_g_state(&mut self, name: impl Into<String>, state: Rc<ExtGState>) {
        self.ext_g_states.insert(name.into(), state);
    }

    pub fn insert_color_space(&mut self, name: impl Into<String>, space: ColorSpace) {
        self.color_spaces.insert(name.into(), space);
    }

    pub fn insert_pattern(&mut self, name: impl Into<String>, pattern: Rc<TilingPattern>) {
        self.patterns.insert(name.into(), pattern);
    }

    pub fn insert_shading(&mut self, name: impl Into<String>, shading: Object) {
        self.shadings.insert(name.into(), shading);
    }

    pub fn insert_property_list(&mut self, name: impl Into<String>, properties: Object) {
        self.properties.insert(name.into(), properties);
    }

    pub fn font(&self, name: &str) -> Option<Rc<dyn Font>> {
        self.fonts.get(name).cloned()
    }

    pub fn x_object(&self, name: &str) -> Option<XObject> {
        self.x_objects.get(name).cloned()
    }

    pub fn ext_g_state(&self, name: &str) -> Option<Rc<ExtGState>> {
        self.ext_g_states.get(name).cloned()
    }

    pub fn color_space(&self, name: &str) -> Option<ColorSpace> {
        self.color_spaces.get(name).cloned()
    }

    pub fn pattern(&self, name: &str) -> Option<Rc<TilingPattern>> {
        self.patterns.get(name).cloned()
    }

    pub fn shading(&self, name: &str) -> Option<&Object> {
        self.shadings.get(name)
    }

    pub fn property_list(&self, name: &str) -> Option<&Object> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::font::StandardFont;

    #[test]
    fn test_category_lookup() {
        let mut resources = ResourceDict::new();
        resources.insert_font("F1", Rc::new(StandardFont::helvetica()));
        resources.insert_color_space("CS0", ColorSpace::DeviceRgb);

        assert!(resources.font("F1").is_some());
        assert!(resources.font("F2").is_none());
        assert_eq!(resources.color_space("CS0"), Some(ColorSpace::DeviceRgb));
        // Categories are separate namespaces
        assert!(resources.x_object("F1").is_none());
    }
}
