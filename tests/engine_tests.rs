//! Engine-level scenarios: state stack balance, nested-stream isolation,
//! resource scoping, recursion, recovery policy.


use std::rc::Rc;

use pdf_stream_engine::{
    Annotation, BlendMode, ContentStream, EngineConfig, EngineError, ExtGState, FormXObject,
    GroupAttributes, ImageXObject, LineJoin, Matrix, Page, PathPaintMode, Rect, RecordingSink,
    ResourceDict, SoftMask, SoftMaskDef, SoftMaskKind, SoftMaskSetting, StreamEngine, XObject,
};
use test_utils::*;

// ============================================================================
// S1: simple path with save/restore
// ============================================================================

#[test]
fn test_simple_path_and_save_restore() {
    let page = page_with("q 10 0 0 10 100 200 cm 0 0 m 50 50 l S Q");
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    // Balanced q/Q leaves only the base entry
    assert_eq!(engine.graphics_stack_size(), 0);

    let paints = &engine.sink().paints;
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].mode, PathPaintMode::Stroke);
    assert_eq!(
        paints[0].state.ctm,
        Matrix::new(10.0, 0.0, 0.0, 10.0, 100.0, 200.0)
    );
    assert_eq!(paints[0].path.len(), 2); // move + line
}

// ============================================================================
// S4: empty graphics stack recovery
// ============================================================================

#[test]
fn test_unmatched_restore_is_recovered() {
    let page = page_with("Q Q Q");
    let mut engine = StreamEngine::new(ErrorTrackingSink::default());
    engine.process_page(&page).unwrap();

    assert_eq!(engine.graphics_stack_size(), 0);
    let errors = &engine.sink().errors;
    assert_eq!(errors.len(), 3);
    for (operator, error) in errors {
        assert_eq!(operator, "Q");
        assert!(matches!(error, EngineError::EmptyGraphicsStack));
    }
}

#[test]
fn test_unmatched_restore_fails_in_strict_mode() {
    let page = page_with("Q");
    let config = EngineConfig {
        strict: true,
        ..EngineConfig::default()
    };
    let mut engine = StreamEngine::with_config(RecordingSink::new(), config);
    assert!(matches!(
        engine.process_page(&page),
        Err(EngineError::EmptyGraphicsStack)
    ));
}

// ============================================================================
// S5: nested form with a local q/Q imbalance
// ============================================================================

#[test]
fn test_form_save_imbalance_does_not_leak() {
    // The form saves state, sets a round line join, and never restores.
    let form = FormXObject::new(ContentStream::new(b"q 1 j".to_vec()));
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));

    // Stroke after the Do so the outer state is observable at paint time.
    let page = page_with_resources("/Fm1 Do 0 0 m 5 5 l S", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    assert_eq!(engine.graphics_stack_size(), 0);
    let paints = &engine.sink().paints;
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].state.line_join, LineJoin::Miter);
}

#[test]
fn test_form_inherits_missing_state_changes_only_within() {
    // A form that changes state without q at all; the change still must not
    // survive the form because the child runs on a detached stack.
    let form = FormXObject::new(ContentStream::new(b"2 j 7 w".to_vec()));
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));

    let page = page_with_resources("/Fm1 Do 0 0 m 5 5 l S", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let paint = &engine.sink().paints[0];
    assert_eq!(paint.state.line_join, LineJoin::Miter);
    assert_eq!(paint.state.line_width, 1.0);
}

// ============================================================================
// S6: zero-area annotation
// ============================================================================

#[test]
fn test_zero_area_annotation_is_skipped() {
    let appearance = FormXObject::new(
        ContentStream::new(b"0 0 m 1 1 l S".to_vec()).with_bbox(Rect::new(0.0, 0.0, 2.0, 2.0)),
    );
    let annotation = Annotation::new(Rect::new(50.0, 50.0, 50.0, 80.0)) // zero width
        .with_appearance(Rc::new(appearance));

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.show_annotation(&annotation).unwrap();

    assert!(engine.sink().events.is_empty());
    assert!(engine.resources().is_none());
    assert_eq!(engine.graphics_stack_size(), 0);
}

#[test]
fn test_annotation_maps_bbox_onto_rectangle() {
    let appearance = FormXObject::new(
        ContentStream::new(b"0 0 m 1 1 l S".to_vec()).with_bbox(Rect::new(0.0, 0.0, 2.0, 2.0)),
    );
    let annotation =
        Annotation::new(Rect::new(10.0, 10.0, 30.0, 30.0)).with_appearance(Rc::new(appearance));

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.show_annotation(&annotation).unwrap();

    // bbox 2x2 scaled onto a 20x20 rect anchored at (10, 10)
    let paint = &engine.sink().paints[0];
    assert_eq!(paint.state.ctm, Matrix::new(10.0, 0.0, 0.0, 10.0, 10.0, 10.0));
}

#[test]
fn test_annotation_appearance_matrix_applies_before_mapping() {
    // The appearance matrix shifts the bbox; content must still land exactly
    // on the annotation rectangle.
    let appearance = FormXObject::new(
        ContentStream::new(b"0 0 m 1 1 l S".to_vec())
            .with_bbox(Rect::new(0.0, 0.0, 2.0, 2.0))
            .with_matrix(Matrix::translation(5.0, 0.0)),
    );
    let annotation =
        Annotation::new(Rect::new(10.0, 10.0, 30.0, 30.0)).with_appearance(Rc::new(appearance));

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.show_annotation(&annotation).unwrap();

    let paint = &engine.sink().paints[0];
    // Form-space bbox corners must land exactly on the rectangle corners.
    let ctm = paint.state.ctm;
    assert_eq!(
        ctm.transform_point(pdf_stream_engine::Point::new(0.0, 0.0)),
        pdf_stream_engine::Point::new(10.0, 10.0)
    );
    assert_eq!(
        ctm.transform_point(pdf_stream_engine::Point::new(2.0, 2.0)),
        pdf_stream_engine::Point::new(30.0, 30.0)
    );
}

#[test]
fn test_hidden_annotation_is_skipped() {
    let appearance = FormXObject::new(
        ContentStream::new(b"0 0 m 1 1 l S".to_vec()).with_bbox(Rect::new(0.0, 0.0, 2.0, 2.0)),
    );
    let annotation = Annotation::new(Rect::new(0.0, 0.0, 10.0, 10.0))
        .with_appearance(Rc::new(appearance))
        .with_hidden(true);

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.show_annotation(&annotation).unwrap();
    assert!(engine.sink().events.is_empty());
}

// ============================================================================
// Transparency groups
// ============================================================================

#[test]
fn test_transparency_group_resets_blend_and_alpha() {
    let group = FormXObject::transparency_group(
        ContentStream::new(b"0 0 m 1 1 l S".to_vec()),
        GroupAttributes::default(),
    );
    let mask_group = FormXObject::new(ContentStream::new(b"".to_vec()));

    let mut parameters = ExtGState::default();
    parameters.stroke_alpha = Some(0.25);
    parameters.fill_alpha = Some(0.5);
    parameters.blend_mode = Some(BlendMode::Multiply);
    parameters.soft_mask = SoftMaskSetting::Set(SoftMaskDef {
        group: Rc::new(mask_group),
        kind: SoftMaskKind::Luminosity,
    });

    let mut resources = ResourceDict::new();
    resources.insert_ext_g_state("GS0", Rc::new(parameters));
    resources.insert_x_object("TG1", XObject::Form(Rc::new(group)));

    // Set transparency state, run the group, stroke again outside it.
    let page = page_with_resources("/GS0 gs /TG1 Do 0 0 m 2 2 l S", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let paints = &engine.sink().paints;
    assert_eq!(paints.len(), 2);

    // Inside the group: everything reset
    assert_eq!(paints[0].state.stroke_alpha, 1.0);
    assert_eq!(paints[0].state.fill_alpha, 1.0);
    assert_eq!(paints[0].state.blend_mode, BlendMode::Normal);
    assert!(paints[0].state.soft_mask.is_none());

    // Outside the group: the gs values are still in force
    assert_eq!(paints[1].state.stroke_alpha, 0.25);
    assert_eq!(paints[1].state.fill_alpha, 0.5);
    assert_eq!(paints[1].state.blend_mode, BlendMode::Multiply);
    assert!(paints[1].state.soft_mask.is_some());
}

#[test]
fn test_soft_mask_replaces_ctm() {
    // Give the engine a page so transparency-group processing is allowed.
    let page = page_with("");
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let group = FormXObject::transparency_group(
        ContentStream::new(b"0 0 m 1 1 l S".to_vec()),
        GroupAttributes::default(),
    );
    let mask = SoftMask {
        group: Rc::new(group),
        kind: SoftMaskKind::Luminosity,
        initial_matrix: Matrix::new(2.0, 0.0, 0.0, 2.0, 30.0, 40.0),
    };

    engine.process_soft_mask(&mask).unwrap();

    let paint = &engine.sink().paints[0];
    assert_eq!(paint.state.ctm, Matrix::new(2.0, 0.0, 0.0, 2.0, 30.0, 40.0));
    // The wrapping save/restore leaves the stack balanced.
    assert_eq!(engine.graphics_stack_size(), 0);
}

// ============================================================================
// Resource scoping
// ============================================================================

#[test]
fn test_form_resources_scope_and_restore() {
    // The form carries its own resources with a private font; the page keeps
    // /F1. After the form, /F1 must resolve again.
    let mut form_resources = ResourceDict::new();
    form_resources.insert_font("F9", Rc::new(FixedWidthFont::new(400)));
    let form = FormXObject::new(
        ContentStream::new(b"BT /F9 10 Tf (x) Tj ET".to_vec())
            .with_resources(Rc::new(form_resources)),
    );

    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(600)));
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));

    let page = page_with_resources("/Fm1 Do BT /F1 12 Tf (y) Tj ET", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 2);
    // F9 (400 units) inside the form, F1 (600 units) after it
    assert_close(glyphs[0].displacement.x, 0.4);
    assert_close(glyphs[1].displacement.x, 0.6);
    // The engine's scope is fully unwound after the page.
    assert!(engine.resources().is_none());
}

#[test]
fn test_form_without_resources_inherits_callers() {
    // The form has no resource dictionary of its own, so the page's fonts
    // remain visible inside it.
    let form = FormXObject::new(ContentStream::new(b"BT /F1 10 Tf (z) Tj ET".to_vec()));
    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));

    let page = page_with_resources("/Fm1 Do", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    assert_eq!(engine.sink().glyphs.len(), 1);
}

#[test]
fn test_missing_resource_is_recovered() {
    let page = page_with("/NoSuchForm Do");
    let mut engine = StreamEngine::new(ErrorTrackingSink::default());
    engine.process_page(&page).unwrap();

    let errors = &engine.sink().errors;
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].1,
        EngineError::MissingResource { kind: "xobject", .. }
    ));
}

#[test]
fn test_missing_operand_is_recovered() {
    // cm with four operands instead of six
    let page = page_with("1 0 0 1 cm 0 0 m 1 1 l S");
    let mut engine = StreamEngine::new(ErrorTrackingSink::default());
    engine.process_page(&page).unwrap();

    let errors = &engine.sink().errors;
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].1, EngineError::MissingOperand { .. }));
    // Processing continued: the stroke still happened.
    assert_eq!(engine.sink().inner.paints.len(), 1);
}

#[test]
fn test_failed_form_still_restores_scope() {
    // The form dies on a tokenizer error; the Do policy absorbs it, and every
    // piece of scoped state must still be back in place afterwards.
    let form = FormXObject::new(ContentStream::new(b"q 9 w (broken".to_vec()));
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));

    let page = page_with_resources("/Fm1 Do 0 0 m 1 1 l S", resources);
    let mut engine = StreamEngine::new(ErrorTrackingSink::default());
    engine.process_page(&page).unwrap();

    let errors = &engine.sink().errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "Do");
    assert!(matches!(errors[0].1, EngineError::Parse { .. }));

    // The stroke after the failed Do runs with untouched outer state.
    let paints = &engine.sink().inner.paints;
    assert_eq!(paints.len(), 1);
    assert_eq!(paints[0].state.line_width, 1.0);
    assert_eq!(engine.graphics_stack_size(), 0);
    assert!(engine.resources().is_none());
}

#[test]
fn test_transformed_width_uses_scale_and_shear() {
    let mut engine = StreamEngine::new(RecordingSink::new());
    assert_eq!(engine.transformed_width(5.0), 5.0);

    engine.graphics_state_mut().ctm = Matrix::scaling(2.0, 2.0);
    assert_eq!(engine.transformed_width(5.0), 10.0);

    // An anisotropic matrix averages the two axes quadratically.
    engine.graphics_state_mut().ctm = Matrix::scaling(1.0, 7.0);
    assert_eq!(engine.transformed_width(1.0), 5.0);
}

// ============================================================================
// Recursion guard
// ============================================================================

#[test]
fn test_self_referential_form_is_bounded() {
    // The form has no resources of its own, so inside it the page resources
    // are still in scope and /Fm1 resolves to the form itself.
    let form = FormXObject::new(ContentStream::new(b"/Fm1 Do".to_vec()));
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));

    let page = page_with_resources("/Fm1 Do", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    // Every increase met its decrease on the way back out.
    assert_eq!(engine.level(), 0);
}

#[test]
fn test_level_counter_balances() {
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.increase_level();
    engine.increase_level();
    assert_eq!(engine.level(), 2);
    engine.decrease_level();
    engine.decrease_level();
    assert_eq!(engine.level(), 0);
}

// ============================================================================
// Images
// ============================================================================

fn jpeg_image() -> ImageXObject {
    ImageXObject {
        width: 4,
        height: 4,
        bits_per_component: 8,
        data: vec![0xFF; 16],
        filter: Some("DCTDecode".to_string()),
        image_mask: false,
    }
}

#[test]
fn test_image_without_reader_is_missing_image_reader() {
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Im1", XObject::Image(Rc::new(jpeg_image())));

    let page = page_with_resources("/Im1 Do", resources);
    let mut engine = StreamEngine::new(ErrorTrackingSink::default());
    engine.process_page(&page).unwrap();

    let errors = &engine.sink().errors;
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].1,
        EngineError::MissingImageReader { .. }
    ));
}

#[test]
fn test_registered_reader_allows_image() {
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Im1", XObject::Image(Rc::new(jpeg_image())));

    let page = page_with_resources("/Im1 Do", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.register_image_reader("DCTDecode");
    engine.process_page(&page).unwrap();

    assert!(engine.sink().events.iter().any(|e| e == "draw_image(4x4)"));
}

#[test]
fn test_inline_image() {
    let page = page_with("BI /W 2 /H 3 /BPC 8 ID \x01\x02\x03 EI");
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    assert!(engine.sink().events.iter().any(|e| e == "draw_image(2x3)"));
}

// ============================================================================
// Executor behavior
// ============================================================================

#[test]
fn test_operands_cleared_between_operators() {
    // If operands leaked across dispatch, the second unknown operator would
    // see three operands instead of two.
    let page = page_with("5 XYZ 6 7 ABC");
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    assert_eq!(
        engine.sink().events,
        vec![
            "unsupported(XYZ, 1 operands)".to_string(),
            "unsupported(ABC, 2 operands)".to_string(),
        ]
    );
}

#[test]
fn test_tokenizer_error_propagates() {
    let page = page_with("(unterminated");
    let mut engine = StreamEngine::new(RecordingSink::new());
    assert!(matches!(
        engine.process_page(&page),
        Err(EngineError::Parse { .. })
    ));
}

#[test]
fn test_empty_page_is_fine() {
    let page = Rc::new(Page::new(LETTER));
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    assert!(engine.sink().events.is_empty());
}

#[test]
fn test_engine_is_reusable_across_pages() {
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page_with("q Q")).unwrap();
    engine.process_page(&page_with("0 0 m 1 1 l S")).unwrap();
    assert_eq!(engine.sink().paints.len(), 1);
    assert_eq!(engine.graphics_stack_size(), 0);
}

// ============================================================================
// Child streams
// ============================================================================

#[test]
fn test_child_stream_runs_with_page_context_then_forgets_it() {
    let form = FormXObject::new(ContentStream::new(b"0 0 m 1 1 l S".to_vec()));
    let mut resources = ResourceDict::new();
    resources.insert_x_object("Fm1", XObject::Form(Rc::new(form)));
    let page = Rc::new(Page::new(LETTER).with_resources(Rc::new(resources)));

    // The child stream invokes a form, which needs the page context.
    let child = ContentStream::new(b"/Fm1 Do".to_vec());
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_child_stream(&child, &page).unwrap();

    assert_eq!(engine.sink().paints.len(), 1);
    assert!(engine.current_page().is_none());
}

#[test]
fn test_clip_is_applied_at_painting_time() {
    // W before the painting operator; the clip lands in device space.
    let page = page_with("q 2 0 0 2 0 0 cm 0 0 10 10 re W n 0 0 m 1 1 l S Q");
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let paint = &engine.sink().paints[0];
    // Base crop-box clip, the page-stream bbox clip, and the one added by W.
    assert_eq!(paint.state.clip.len(), 3);
    assert_eq!(
        paint.state.clip[2].path.bounding_box(),
        Some(Rect::new(0.0, 0.0, 20.0, 20.0))
    );
}
