//! The content-stream engine.
//!
//! [`StreamEngine`] drives the tokenizer over a content stream, dispatches
//! operators through the registry, and owns every piece of cross-operator
//! state: the graphics-state stack, the text matrices, the lexically scoped
//! resource dictionary, the initial matrix and the recursion guard. Nested
//! streams (forms, transparency groups, patterns, Type 3 glyphs, annotation
//! appearances) re-enter the same executor under an envelope that detaches
//! and restores all of that state, so nothing a child stream does can leak
//! into its parent.

use std::rc::Rc;

use log::{error, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::annotation::Annotation;
use crate::core::error::{EngineError, EngineResult};
use crate::core::font::Font;
use crate::core::geometry::{Matrix, Point, Rect};
use crate::core::graphics::{
    BlendMode, ColorComponents, ColorSpace, DashPattern, ExtGState, SoftMask, SoftMaskSetting,
};
use crate::core::page::Page;
use crate::core::parser::{ContentItem, ContentParser, Object};
use crate::core::pattern::TilingPattern;
use crate::core::resources::ResourceDict;
use crate::core::stream::{ContentStream, FormXObject, ImageXObject, XObject};
use crate::engine::graphics_state::GraphicsState;
use crate::engine::operator::OperatorHandler;
use crate::engine::operators;
use crate::engine::path::Path;
use crate::engine::sink::{EventSink, PathPaintMode, Recovery};

const STACK_EXPECT: &str = "graphics state stack is never empty during processing";

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// `Do` refuses to enter another stream beyond this nesting depth.
    pub max_recursion_depth: i32,

    /// Disables the lenient recovery policy: every operator failure
    /// propagates, including unmatched `Q` and `Do` errors.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_recursion_depth: 25,
            strict: false,
        }
    }
}

/// Everything a nested-stream entry detaches from the engine and puts back on
/// exit, success or not.
struct StreamFrame {
    resources: Option<Rc<ResourceDict>>,
    stack: Vec<GraphicsState>,
    initial_matrix: Matrix,
    path: Path,
    pending_clip: Option<crate::core::graphics::FillRule>,
}

/// The content-stream interpreter.
///
/// An engine is reusable across pages but owns mutable state while running,
/// so it is single-threaded; operator handlers may recursively re-enter it on
/// the same thread through the nested-stream drivers.
pub struct StreamEngine<S: EventSink> {
    sink: S,
    config: EngineConfig,
    operators: FxHashMap<String, Rc<dyn OperatorHandler<S>>>,
    image_readers: FxHashSet<String>,

    state_stack: Vec<GraphicsState>,
    text_matrix: Option<Matrix>,
    text_line_matrix: Option<Matrix>,
    resources: Option<Rc<ResourceDict>>,
    initial_matrix: Matrix,
    current_page: Option<Rc<Page>>,
    processing_page: bool,
    level: i32,

    current_path: Path,
    pending_clip: Option<crate::core::graphics::FillRule>,

    default_font: Option<Rc<dyn Font>>,
}

impl<S: EventSink> StreamEngine<S> {
    /// Creates an engine with the default operator set and configuration.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, EngineConfig::default())
    }

    pub fn with_config(sink: S, config: EngineConfig) -> Self {
        let mut engine = StreamEngine {
            sink,
            config,
            operators: FxHashMap::default(),
            image_readers: FxHashSet::default(),
            state_stack: vec![GraphicsState::new()],
            text_matrix: None,
            text_line_matrix: None,
            resources: None,
            initial_matrix: Matrix::IDENTITY,
            current_page: None,
            processing_page: false,
            level: 0,
            current_path: Path::new(),
            pending_clip: None,
            default_font: None,
        };
        for handler in operators::default_handlers() {
            engine.register(handler);
        }
        engine
    }

    /// Registers an operator handler under the name it advertises. Late
    /// registration silently replaces an earlier handler.
    pub fn register(&mut self, handler: Rc<dyn OperatorHandler<S>>) {
        self.operators.insert(handler.name().to_string(), handler);
    }

    /// Declares that the client can decode images stored with `filter`
    /// (e.g. `DCTDecode`). Images with an undeclared filter fail with
    /// `MissingImageReader`.
    pub fn register_image_reader(&mut self, filter: impl Into<String>) {
        self.image_readers.insert(filter.into());
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // === Entry points ===

    /// Processes a page: rebuilds the graphics stack from the crop box and
    /// executes the page contents.
    pub fn process_page(&mut self, page: &Rc<Page>) -> EngineResult<()> {
        self.init_page(page);
        if !page.has_contents() {
            return Ok(());
        }
        self.processing_page = true;
        let result = self.process_stream(&page.content_stream());
        self.processing_page = false;
        result
    }

    /// Processes a stream that belongs to `page` without going through the
    /// page contents, e.g. a pattern cell analyzed on its own. The page
    /// supplies the crop box and resources; it is forgotten again afterwards.
    pub fn process_child_stream(
        &mut self,
        stream: &ContentStream,
        page: &Rc<Page>,
    ) -> EngineResult<()> {
        if self.processing_page {
            return Err(EngineError::other(
                "process_child_stream may not be called while a page is being processed",
            ));
        }
        self.init_page(page);
        let result = self.process_stream(stream);
        self.current_page = None;
        result
    }

    fn init_page(&mut self, page: &Rc<Page>) {
        self.current_page = Some(page.clone());
        self.state_stack = vec![GraphicsState::with_clip_rect(page.crop_box())];
        self.text_matrix = None;
        self.text_line_matrix = None;
        self.resources = None;
        self.initial_matrix = page.matrix();
        self.current_path = Path::new();
        self.pending_clip = None;
    }

    // === Nested-stream drivers ===

    /// Executes a form XObject within the current content.
    pub fn show_form(&mut self, form: &FormXObject) -> EngineResult<()> {
        if self.current_page.is_none() {
            return Err(EngineError::other("show_form requires a current page"));
        }
        self.process_stream(&form.stream)
    }

    /// Executes a transparency group: a form whose entry additionally resets
    /// blend mode, both alpha constants and the soft mask.
    pub fn show_transparency_group(&mut self, group: &FormXObject) -> EngineResult<()> {
        if self.current_page.is_none() {
            return Err(EngineError::other(
                "show_transparency_group requires a current page",
            ));
        }
        self.process_stream_inner(&group.stream, true)
    }

    /// Executes the transparency group of a soft mask. The CTM is replaced,
    /// not concatenated: the mask renders in the coordinate system captured
    /// when the mask was installed.
    pub fn process_soft_mask(&mut self, mask: &SoftMask) -> EngineResult<()> {
        self.save_graphics_state();
        self.graphics_state_mut().ctm = mask.initial_matrix;
        let group = mask.group.clone();
        let result = self.show_transparency_group(&group);
        let restored = self.restore_graphics_state();
        result.and(restored)
    }

    /// Executes a tiling pattern cell. `pattern_matrix` is the matrix the
    /// cell is anchored with (normally the pattern's own matrix, possibly
    /// combined with an outer transform by the caller). For uncolored
    /// patterns the caller supplies the color and color space to paint with.
    pub fn process_tiling_pattern(
        &mut self,
        pattern: &TilingPattern,
        color: Option<(ColorComponents, ColorSpace)>,
        pattern_matrix: &Matrix,
    ) -> EngineResult<()> {
        let frame = self.begin_stream_frame(pattern.stream.resources().cloned());
        // The cell's coordinates are anchored to the stream the pattern was
        // *declared* in, not the one it is painted from.
        self.initial_matrix = pattern_matrix.multiply(&frame.initial_matrix);

        // The cell starts from a brand-new state clipped to its bounds.
        let cell_bounds = pattern.bbox.transformed_bounds(pattern_matrix);
        self.state_stack
            .push(GraphicsState::with_clip_rect(cell_bounds));

        if let Some((components, space)) = color {
            let state = self.graphics_state_mut();
            state.fill_color_space = space.clone();
            state.fill_color = components.clone();
            state.stroke_color_space = space;
            state.stroke_color = components;
        }

        self.graphics_state_mut().concatenate(pattern_matrix);
        self.clip_to_rect(Some(pattern.bbox));

        // The cell may contain BT/ET of its own.
        let saved_tm = self.text_matrix.take();
        let saved_tlm = self.text_line_matrix.take();
        let result = self.process_stream_operators(pattern.stream.data());
        self.text_matrix = saved_tm;
        self.text_line_matrix = saved_tlm;

        self.end_stream_frame(frame);
        result
    }

    /// Executes a Type 3 char proc: the CTM becomes the glyph's text
    /// rendering matrix with the font matrix concatenated. No bbox clipping:
    /// Type 3 font bboxes are wrong often enough that honoring them eats
    /// glyphs.
    pub fn process_type3_stream(
        &mut self,
        char_proc: &ContentStream,
        font_matrix: &Matrix,
        trm: &Matrix,
    ) -> EngineResult<()> {
        if self.current_page.is_none() {
            return Err(EngineError::other(
                "process_type3_stream requires a current page",
            ));
        }
        let frame = self.begin_stream_frame(char_proc.resources().cloned());
        self.graphics_state_mut().ctm = *trm;
        self.graphics_state_mut().concatenate(font_matrix);

        // The char proc may contain BT/ET; they must not touch the text
        // object that triggered the glyph.
        let saved_tm = self.text_matrix.replace(Matrix::IDENTITY);
        let saved_tlm = self.text_line_matrix.replace(Matrix::IDENTITY);
        let result = self.process_stream_operators(char_proc.data());
        self.text_matrix = saved_tm;
        self.text_line_matrix = saved_tlm;

        self.end_stream_frame(frame);
        result
    }

    /// Executes an annotation's appearance stream, mapped onto the
    /// annotation rectangle.
    pub fn show_annotation(&mut self, annotation: &Annotation) -> EngineResult<()> {
        if annotation.hidden {
            return Ok(());
        }
        let Some(appearance) = annotation.appearance.clone() else {
            return Ok(());
        };

        let rect = annotation.rect;
        let frame = self.begin_stream_frame(appearance.stream.resources().cloned());
        let mut result = Ok(());

        if rect.width() > 0.0 && rect.height() > 0.0 {
            if let Some(bbox) = appearance.stream.bbox() {
                let appearance_matrix = *appearance.stream.matrix();
                let transformed = bbox.transformed_bounds(&appearance_matrix);
                if transformed.width() > 0.0 && transformed.height() > 0.0 {
                    // Map the transformed appearance box onto the annotation
                    // rectangle: shift the box to the origin, scale it to the
                    // rectangle's size, move it to the rectangle's corner.
                    let a = Matrix::translation(-transformed.x0, -transformed.y0)
                        .multiply(&Matrix::scaling(
                            rect.width() / transformed.width(),
                            rect.height() / transformed.height(),
                        ))
                        .multiply(&Matrix::translation(rect.x0, rect.y0));
                    // The appearance matrix applies before A. PDF 32000-1
                    // 12.5.5 words it the other way around, but this order is
                    // the one that matches shipping viewers on rotated pages
                    // with matrix-bearing form fields.
                    let aa = appearance_matrix.multiply(&a);

                    self.graphics_state_mut().ctm = aa;
                    self.initial_matrix = aa;
                    self.clip_to_rect(Some(bbox));
                    result = self.process_stream_operators(appearance.stream.data());
                }
            }
        }

        self.end_stream_frame(frame);
        result
    }

    /// The common envelope: scope the resources, detach the graphics stack,
    /// anchor the stream's matrix and bbox, execute, put everything back.
    fn process_stream(&mut self, stream: &ContentStream) -> EngineResult<()> {
        self.process_stream_inner(stream, false)
    }

    fn process_stream_inner(
        &mut self,
        stream: &ContentStream,
        transparency_group: bool,
    ) -> EngineResult<()> {
        let frame = self.begin_stream_frame(stream.resources().cloned());

        self.graphics_state_mut().concatenate(stream.matrix());
        // The stream's initial matrix includes the parent CTM, so pattern
        // cells inside it anchor relative to this stream.
        self.initial_matrix = self.graphics_state().ctm;
        self.clip_to_rect(stream.bbox());

        if transparency_group {
            let state = self.graphics_state_mut();
            state.blend_mode = BlendMode::Normal;
            state.stroke_alpha = 1.0;
            state.fill_alpha = 1.0;
            state.soft_mask = None;
        }

        let result = self.process_stream_operators(stream.data());
        self.end_stream_frame(frame);
        result
    }

    fn begin_stream_frame(&mut self, resources: Option<Rc<ResourceDict>>) -> StreamFrame {
        StreamFrame {
            resources: self.push_resources(resources),
            stack: self.save_stack(),
            initial_matrix: self.initial_matrix,
            path: std::mem::take(&mut self.current_path),
            pending_clip: self.pending_clip.take(),
        }
    }

    fn end_stream_frame(&mut self, frame: StreamFrame) {
        self.pending_clip = frame.pending_clip;
        self.current_path = frame.path;
        self.initial_matrix = frame.initial_matrix;
        self.restore_stack(frame.stack);
        self.pop_resources(frame.resources);
    }

    // === Stream executor ===

    /// Pulls tokens, accumulates operands, dispatches on each operator.
    pub(crate) fn process_stream_operators(&mut self, data: &[u8]) -> EngineResult<()> {
        let mut parser = ContentParser::new(data);
        let mut operands: Vec<Object> = Vec::new();
        while let Some(item) = parser.next_item()? {
            match item {
                ContentItem::Operand(object) => operands.push(object),
                ContentItem::Operator(name) => {
                    self.process_operator(&name, &operands)?;
                    operands.clear();
                }
            }
        }
        if !operands.is_empty() {
            warn!(
                "content stream ended with {} dangling operand(s)",
                operands.len()
            );
        }
        Ok(())
    }

    /// Dispatches one operator. Handlers may call this recursively (the `'`
    /// and `"` operators do, and Type 3 char procs re-enter the executor).
    pub fn process_operator(&mut self, name: &str, operands: &[Object]) -> EngineResult<()> {
        let Some(handler) = self.operators.get(name).cloned() else {
            self.sink.unsupported_operator(name, operands);
            return Ok(());
        };
        match handler.invoke(self, name, operands) {
            Ok(()) => Ok(()),
            Err(error) => self.handle_operator_error(name, error),
        }
    }

    /// The recovery policy for handler failures: missing operands, missing
    /// resources, missing image readers and stack underflow are logged and
    /// absorbed, as is anything that went wrong under `Do`. Everything else
    /// propagates. Strict mode propagates everything; the sink gets the
    /// first word either way.
    fn handle_operator_error(&mut self, operator: &str, error: EngineError) -> EngineResult<()> {
        if let Some(recovery) = self.sink.operator_error(operator, &error) {
            return match recovery {
                Recovery::Continue => Ok(()),
                Recovery::Abort => Err(error),
            };
        }
        if self.config.strict {
            return Err(error);
        }
        match &error {
            EngineError::MissingOperand { .. }
            | EngineError::MissingResource { .. }
            | EngineError::MissingImageReader { .. } => {
                error!("operator '{}' failed: {}", operator, error);
                Ok(())
            }
            EngineError::EmptyGraphicsStack => {
                warn!("operator '{}': {}", operator, error);
                Ok(())
            }
            _ if operator == "Do" => {
                warn!("'Do' operator failed: {}", error);
                Ok(())
            }
            _ => Err(error),
        }
    }

    // === Graphics-state stack ===

    /// `q`: clones the current state and pushes it.
    pub fn save_graphics_state(&mut self) {
        let top = self.graphics_state().clone();
        self.state_stack.push(top);
    }

    /// `Q`: pops the stack; fails when nothing is left to pop.
    pub fn restore_graphics_state(&mut self) -> EngineResult<()> {
        if self.state_stack.len() <= 1 {
            return Err(EngineError::EmptyGraphicsStack);
        }
        self.state_stack.pop();
        Ok(())
    }

    pub fn graphics_state(&self) -> &GraphicsState {
        self.state_stack.last().expect(STACK_EXPECT)
    }

    pub fn graphics_state_mut(&mut self) -> &mut GraphicsState {
        self.state_stack.last_mut().expect(STACK_EXPECT)
    }

    /// Depth of the stack above the base entry: zero when every `q` has met
    /// its `Q`.
    pub fn graphics_stack_size(&self) -> usize {
        self.state_stack.len() - 1
    }

    /// Swaps in a fresh stack seeded with a clone of the current top, so a
    /// child stream starts from the parent's state but cannot pop past it.
    fn save_stack(&mut self) -> Vec<GraphicsState> {
        let seed = self.graphics_state().clone();
        std::mem::replace(&mut self.state_stack, vec![seed])
    }

    fn restore_stack(&mut self, saved: Vec<GraphicsState>) {
        self.state_stack = saved;
    }

    // === Resource scope ===

    /// Installs the resource dictionary for a stream being entered and
    /// returns the previous one. Selection order: the stream's own resources,
    /// the inherited scope, the page's resources, then an empty dictionary.
    fn push_resources(&mut self, stream_resources: Option<Rc<ResourceDict>>) -> Option<Rc<ResourceDict>> {
        let next = stream_resources
            .or_else(|| self.resources.clone())
            .or_else(|| {
                self.current_page
                    .as_ref()
                    .and_then(|page| page.resources().cloned())
            })
            .unwrap_or_else(|| Rc::new(ResourceDict::new()));
        self.resources.replace(next)
    }

    fn pop_resources(&mut self, previous: Option<Rc<ResourceDict>>) {
        self.resources = previous;
    }

    /// The resource dictionary in scope.
    pub fn resources(&self) -> Option<&Rc<ResourceDict>> {
        self.resources.as_ref()
    }

    pub fn lookup_font(&self, name: &str) -> EngineResult<Rc<dyn Font>> {
        self.resources
            .as_ref()
            .and_then(|resources| resources.font(name))
            .ok_or_else(|| EngineError::missing_resource("font", name))
    }

    pub fn lookup_x_object(&self, name: &str) -> EngineResult<XObject> {
        self.resources
            .as_ref()
            .and_then(|resources| resources.x_object(name))
            .ok_or_else(|| EngineError::missing_resource("xobject", name))
    }

    pub fn lookup_ext_g_state(&self, name: &str) -> EngineResult<Rc<ExtGState>> {
        self.resources
            .as_ref()
            .and_then(|resources| resources.ext_g_state(name))
            .ok_or_else(|| EngineError::missing_resource("graphics state parameter", name))
    }

    pub fn lookup_color_space(&self, name: &str) -> EngineResult<ColorSpace> {
        if let Some(space) = ColorSpace::from_device_name(name) {
            return Ok(space);
        }
        self.resources
            .as_ref()
            .and_then(|resources| resources.color_space(name))
            .ok_or_else(|| EngineError::missing_resource("color space", name))
    }

    pub fn lookup_pattern(&self, name: &str) -> EngineResult<Rc<TilingPattern>> {
        self.resources
            .as_ref()
            .and_then(|resources| resources.pattern(name))
            .ok_or_else(|| EngineError::missing_resource("pattern", name))
    }

    pub fn lookup_shading(&self, name: &str) -> EngineResult<Object> {
        self.resources
            .as_ref()
            .and_then(|resources| resources.shading(name))
            .cloned()
            .ok_or_else(|| EngineError::missing_resource("shading", name))
    }

    pub fn lookup_property_list(&self, name: &str) -> Option<Object> {
        self.resources
            .as_ref()
            .and_then(|resources| resources.property_list(name))
            .cloned()
    }

    // === Text matrices ===

    pub fn text_matrix(&self) -> Option<Matrix> {
        self.text_matrix
    }

    pub fn text_line_matrix(&self) -> Option<Matrix> {
        self.text_line_matrix
    }

    pub fn set_text_matrix(&mut self, matrix: Option<Matrix>) {
        self.text_matrix = matrix;
    }

    pub fn set_text_line_matrix(&mut self, matrix: Option<Matrix>) {
        self.text_line_matrix = matrix;
    }

    pub(crate) fn text_matrix_mut(&mut self) -> Option<&mut Matrix> {
        self.text_matrix.as_mut()
    }

    pub(crate) fn text_line_matrix_mut(&mut self) -> Option<&mut Matrix> {
        self.text_line_matrix.as_mut()
    }

    // === Misc engine state ===

    /// The CTM in effect when the current stream started.
    pub fn initial_matrix(&self) -> Matrix {
        self.initial_matrix
    }

    pub fn current_page(&self) -> Option<&Rc<Page>> {
        self.current_page.as_ref()
    }

    // === Recursion guard ===

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn increase_level(&mut self) {
        self.level += 1;
    }

    pub fn decrease_level(&mut self) {
        self.level -= 1;
        if self.level < 0 {
            error!("nesting level dropped below zero: {}", self.level);
        }
    }

    // === Coordinate helpers ===

    /// Applies the CTM to a user-space point.
    pub fn transformed_point(&self, x: f64, y: f64) -> Point {
        self.graphics_state().ctm.transform_point(Point::new(x, y))
    }

    /// Converts a user-space width (e.g. a stroke width) to an isotropic
    /// device-space width using the CTM's scale and shear components.
    pub fn transformed_width(&self, width: f64) -> f64 {
        let ctm = &self.graphics_state().ctm;
        let x = ctm.a + ctm.c;
        let y = ctm.b + ctm.d;
        width * ((x * x + y * y) * 0.5).sqrt()
    }

    /// Installs a dash pattern, clamping a negative phase to zero.
    pub fn set_line_dash_pattern(&mut self, array: Vec<f64>, phase: f64) {
        let phase = if phase < 0.0 {
            warn!("dash phase {} is negative, clamping to 0", phase);
            0.0
        } else {
            phase
        };
        self.graphics_state_mut().dash_pattern = DashPattern { array, phase };
    }

    // === Path and clip plumbing used by the default operator set ===

    pub fn current_path_mut(&mut self) -> &mut Path {
        &mut self.current_path
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// `W` / `W*`: the clip takes effect at the next path-painting operator.
    pub(crate) fn set_pending_clip(&mut self, rule: crate::core::graphics::FillRule) {
        self.pending_clip = Some(rule);
    }

    /// Ends the current path: reports the paint, applies a pending clip, and
    /// resets the path.
    pub(crate) fn finish_path(&mut self, mode: PathPaintMode) {
        let path = std::mem::take(&mut self.current_path);
        if mode != PathPaintMode::None {
            self.sink
                .paint_path(mode, &path, self.state_stack.last().expect(STACK_EXPECT));
        }
        if let Some(rule) = self.pending_clip.take() {
            let ctm = self.graphics_state().ctm;
            let device_path = path.transform(&ctm);
            self.graphics_state_mut().intersect_clip(device_path, rule);
        }
    }

    /// Intersects the clip with a rectangle given in the space the CTM maps
    /// from (a stream bbox).
    pub(crate) fn clip_to_rect(&mut self, bbox: Option<Rect>) {
        if let Some(rect) = bbox {
            let ctm = self.graphics_state().ctm;
            let device_path = Path::from_rect(rect).transform(&ctm);
            self.graphics_state_mut()
                .intersect_clip(device_path, crate::core::graphics::FillRule::NonZero);
        }
    }

    // === Image and ext-g-state plumbing ===

    /// Forwards an image to the sink, first checking that its filter (if
    /// any) has a registered reader.
    pub(crate) fn draw_image(&mut self, image: &ImageXObject) -> EngineResult<()> {
        if let Some(filter) = &image.filter {
            if !self.image_readers.contains(filter) {
                return Err(EngineError::missing_image_reader(filter.clone()));
            }
        }
        self.sink
            .draw_image(image, self.state_stack.last().expect(STACK_EXPECT));
        Ok(())
    }

    /// Applies an ext-g-state parameter dictionary to the current state.
    pub(crate) fn apply_ext_g_state(&mut self, parameters: &ExtGState) {
        if let Some(width) = parameters.line_width {
            self.graphics_state_mut().line_width = width;
        }
        if let Some(cap) = parameters.line_cap {
            self.graphics_state_mut().line_cap = cap;
        }
        if let Some(join) = parameters.line_join {
            self.graphics_state_mut().line_join = join;
        }
        if let Some(limit) = parameters.miter_limit {
            self.graphics_state_mut().miter_limit = limit;
        }
        if let Some(dash) = &parameters.dash_pattern {
            self.set_line_dash_pattern(dash.array.clone(), dash.phase);
        }
        if let Some(intent) = parameters.rendering_intent {
            self.graphics_state_mut().rendering_intent = intent;
        }
        if let Some(flatness) = parameters.flatness {
            self.graphics_state_mut().flatness = flatness;
        }
        if let Some(alpha) = parameters.stroke_alpha {
            self.graphics_state_mut().stroke_alpha = alpha;
        }
        if let Some(alpha) = parameters.fill_alpha {
            self.graphics_state_mut().fill_alpha = alpha;
        }
        if let Some(mode) = parameters.blend_mode {
            self.graphics_state_mut().blend_mode = mode;
        }
        match &parameters.soft_mask {
            SoftMaskSetting::Keep => {}
            SoftMaskSetting::Clear => {
                self.graphics_state_mut().soft_mask = None;
            }
            SoftMaskSetting::Set(definition) => {
                // The mask renders in the CTM current at `gs` time.
                let initial_matrix = self.graphics_state().ctm;
                self.graphics_state_mut().soft_mask = Some(SoftMask {
                    group: definition.group.clone(),
                    kind: definition.kind,
                    initial_matrix,
                });
            }
        }
        if let Some(overprint) = parameters.overprint_stroke {
            self.graphics_state_mut().overprint_stroke = overprint;
        }
        if let Some(overprint) = parameters.overprint_fill {
            self.graphics_state_mut().overprint_fill = overprint;
        }
        if let Some(mode) = parameters.overprint_mode {
            self.graphics_state_mut().overprint_mode = mode;
        }
        if let Some((font, size)) = &parameters.font {
            let text = &mut self.graphics_state_mut().text;
            text.font = Some(font.clone());
            text.font_size = *size;
        }
        if let Some(knockout) = parameters.text_knockout {
            self.graphics_state_mut().text.knockout = knockout;
        }
    }

    /// The fallback font used when a text-showing operator runs without one.
    pub(crate) fn default_font(&mut self) -> Rc<dyn Font> {
        if let Some(font) = &self.default_font {
            return font.clone();
        }
        let font: Rc<dyn Font> = Rc::new(crate::core::font::StandardFont::helvetica());
        self.default_font = Some(font.clone());
        font
    }

    pub(crate) fn emit_sink<F: FnOnce(&mut S)>(&mut self, emit: F) {
        emit(&mut self.sink);
    }

    /// Emits a sink event that needs the current graphics state alongside.
    pub(crate) fn emit_with_state<F: FnOnce(&mut S, &GraphicsState)>(&mut self, emit: F) {
        emit(
            &mut self.sink,
            self.state_stack.last().expect(STACK_EXPECT),
        );
    }
}
