//! Text sub-engine scenarios: glyph advances, spacing, scaling, vertical
//! mode, `TJ` adjustments, and text-matrix scoping across nested streams.


use std::rc::Rc;

use pdf_stream_engine::{
    ColorComponents, ColorSpace, ContentStream, EngineError, EngineResult, Matrix, Object,
    OperatorHandler, PaintType, Rect, RecordingSink, ResourceDict, StandardFont, StreamEngine,
    TilingPattern,
};
use test_utils::*;

// ============================================================================
// S2: horizontal advance with scaling and spacing
// ============================================================================

#[test]
fn test_horizontal_advance_with_scaling_and_spacing() {
    let engine =
        run_with_helvetica("BT /F1 12 Tf 200 Tz 1 Tc 5 Tw 100 200 Td (A B) Tj ET");
    let glyphs = &engine.sink().glyphs;

    assert_eq!(glyphs.len(), 3);
    assert_eq!(glyphs[0].code.value, b'A' as u32);
    assert_eq!(glyphs[1].code.value, b' ' as u32);
    assert_eq!(glyphs[2].code.value, b'B' as u32);

    // First glyph renders at the Td position.
    assert_close(glyphs[0].trm.e, 100.0);
    assert_close(glyphs[0].trm.f, 200.0);

    // A -> space: (width('A') * 12 + charSpacing) * 2. Word spacing does not
    // apply because 'A' is not the single-byte space code.
    let advance_after_a = (0.667 * 12.0 + 1.0) * 2.0;
    assert_close(glyphs[1].trm.e - glyphs[0].trm.e, advance_after_a);

    // space -> B: word spacing fires exactly here.
    let advance_after_space = (0.278 * 12.0 + 1.0 + 5.0) * 2.0;
    assert_close(glyphs[2].trm.e - glyphs[1].trm.e, advance_after_space);
}

#[test]
fn test_parameter_matrix_includes_scaling_and_rise() {
    let engine = run_with_helvetica("BT /F1 12 Tf 200 Tz 3 Ts 0 0 Td (A) Tj ET");
    let glyph = &engine.sink().glyphs[0];

    // Trm = P * Tm * CTM with P = [fs*h 0 0 fs 0 rise]
    assert_close(glyph.trm.a, 24.0);
    assert_close(glyph.trm.d, 12.0);
    assert_close(glyph.trm.f, 3.0);
}

// ============================================================================
// S3: TJ positional adjustment
// ============================================================================

#[test]
fn test_tj_adjustment_horizontal() {
    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    let page = page_with_resources("BT /F1 10 Tf 100 100 Td [(AB) -250 (C)] TJ ET", resources);

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 3);

    assert_close(glyphs[0].trm.e, 100.0);
    assert_close(glyphs[1].trm.e, 105.0); // advance of A: 0.5 * 10
    // advance of B (5) plus the adjustment -(-250)/1000 * 10 = 2.5
    assert_close(glyphs[2].trm.e, 112.5);
}

#[test]
fn test_tj_adjustment_scales_with_horizontal_scaling() {
    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    let page = page_with_resources("BT /F1 10 Tf 200 Tz 0 0 Td [(A) -100 (B)] TJ ET", resources);

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;

    // (0.5 * 10) * 2 for the glyph, plus (100/1000 * 10) * 2 for the number
    assert_close(glyphs[1].trm.e - glyphs[0].trm.e, 10.0 + 2.0);
}

#[test]
fn test_tj_nested_array_is_skipped_and_bad_element_is_malformed() {
    // The nested array is only logged; the boolean is a hard error.
    let engine = run_with_helvetica("BT /F1 10 Tf [[(A)] (B)] TJ ET");
    assert_eq!(engine.sink().glyphs.len(), 1); // only (B)

    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(StandardFont::helvetica()));
    let page = page_with_resources("BT /F1 10 Tf [(A) true] TJ ET", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    assert!(matches!(
        engine.process_page(&page),
        Err(EngineError::MalformedTextArray { found: "boolean" })
    ));
}

// ============================================================================
// Word-spacing trigger (single-byte 0x20 only)
// ============================================================================

#[test]
fn test_word_spacing_ignores_two_byte_space_code() {
    let mut resources = ResourceDict::new();
    resources.insert_font("V1", Rc::new(VerticalFont));
    // The string is the two-byte code 0x0020.
    let page = page_with_resources("BT /V1 10 Tf 9 Tw 0 0 Td <0020 0041> Tj ET", resources);

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].code.value, 0x20);
    assert_eq!(glyphs[0].code.byte_count, 2);

    // Vertical advance: w.y * fontSize with no word spacing added.
    assert_close(glyphs[1].trm.f - glyphs[0].trm.f, -5.0);
}

// ============================================================================
// Vertical writing mode
// ============================================================================

#[test]
fn test_vertical_mode_position_vector_and_advance() {
    let mut resources = ResourceDict::new();
    resources.insert_font("V1", Rc::new(VerticalFont));
    let page = page_with_resources("BT /V1 10 Tf 200 Tz 0 0 Td <00410042> Tj ET", resources);

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 2);

    // P = [20 0 0 10 0 0]; the position vector (0.1, 0.2) is applied in
    // glyph space, so it comes out scaled by P.
    assert_close(glyphs[0].trm.e, 2.0);
    assert_close(glyphs[0].trm.f, 2.0);

    // The vertical advance ignores horizontal scaling entirely.
    assert_close(glyphs[1].trm.f - glyphs[0].trm.f, -5.0);
}

// ============================================================================
// Text positioning operators
// ============================================================================

#[test]
fn test_leading_and_next_line() {
    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    let page = page_with_resources(
        "BT /F1 10 Tf 14 TL 100 700 Td (A) Tj T* (B) Tj ET",
        resources,
    );

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;

    assert_close(glyphs[0].trm.e, 100.0);
    assert_close(glyphs[0].trm.f, 700.0);
    // T* returns to the line start and moves down by the leading.
    assert_close(glyphs[1].trm.e, 100.0);
    assert_close(glyphs[1].trm.f, 686.0);
}

#[test]
fn test_td_sets_leading_and_quote_shows_next_line() {
    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    // TD sets leading to 12; ' then advances a line and shows.
    let page = page_with_resources(
        "BT /F1 10 Tf 50 100 TD (A) Tj (B) ' ET",
        resources,
    );

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 2);
    assert_close(glyphs[0].trm.f, 100.0);
    // TD 50 100 set the leading to -100, so the ' line moves up by 100.
    assert_close(glyphs[1].trm.e, 50.0);
    assert_close(glyphs[1].trm.f, 200.0);
}

#[test]
fn test_double_quote_sets_spacing() {
    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    let page = page_with_resources(
        "BT /F1 10 Tf 12 TL 0 100 Td 4 2 (A B) \" ET",
        resources,
    );

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();
    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 3);

    // The line advanced before showing.
    assert_close(glyphs[0].trm.f, 88.0);
    // char spacing 2 on 'A', plus word spacing 4 on the space.
    assert_close(glyphs[1].trm.e - glyphs[0].trm.e, 0.5 * 10.0 + 2.0);
    assert_close(glyphs[2].trm.e - glyphs[1].trm.e, 0.5 * 10.0 + 2.0 + 4.0);
}

#[test]
fn test_show_text_without_font_falls_back() {
    // No Tf at all: the engine warns and uses its built-in Helvetica, so the
    // glyph event still fires.
    let page = page_with("BT 0 0 Td (A) Tj ET");
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 1);
    assert_eq!(glyphs[0].font, "Helvetica");
}

#[test]
fn test_text_showing_outside_text_object_is_ignored() {
    let engine = run_with_helvetica("/F1 10 Tf (A) Tj");
    assert!(engine.sink().glyphs.is_empty());
}

// ============================================================================
// Type 3 glyphs
// ============================================================================

#[test]
fn test_type3_char_proc_replays_as_nested_stream() {
    let proc_stream = Rc::new(ContentStream::new(
        b"10 0 d0 0 0 m 750 0 l S".to_vec(),
    ));
    let font = SingleProcType3Font {
        proc_stream,
        matrix: Matrix::new(0.001, 0.0, 0.0, 0.001, 0.0, 0.0),
        width: 0.75,
    };
    let mut resources = ResourceDict::new();
    resources.insert_font("T3", Rc::new(font));

    let page = page_with_resources("BT /T3 10 Tf 100 100 Td (a) Tj ET", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    // The glyph event fired, the char proc's metrics and stroke both ran.
    assert_eq!(engine.sink().glyphs.len(), 1);
    assert!(engine
        .sink()
        .events
        .iter()
        .any(|e| e.starts_with("type3_glyph_metrics(10")));
    let paints = &engine.sink().paints;
    assert_eq!(paints.len(), 1);

    // CTM inside the char proc: font matrix concatenated onto the glyph's
    // text rendering matrix [10 0 0 10 100 100].
    assert_close(paints[0].state.ctm.a, 0.01);
    assert_close(paints[0].state.ctm.e, 100.0);
}

#[test]
fn test_type3_char_proc_does_not_disturb_outer_text_matrices() {
    // The char proc runs a BT/ET of its own and sets an absurd text matrix;
    // the outer line's second glyph must still advance normally.
    let proc_stream = Rc::new(ContentStream::new(
        b"10 0 d0 BT 1 0 0 1 999 999 Tm ET".to_vec(),
    ));
    let font = SingleProcType3Font {
        proc_stream,
        matrix: Matrix::new(0.001, 0.0, 0.0, 0.001, 0.0, 0.0),
        width: 0.75,
    };
    let mut resources = ResourceDict::new();
    resources.insert_font("T3", Rc::new(font));

    let page = page_with_resources("BT /T3 10 Tf 100 100 Td (ab) Tj ET", resources);
    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.process_page(&page).unwrap();

    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 2);
    assert_close(glyphs[0].trm.e, 100.0);
    // advance = width * fontSize = 7.5
    assert_close(glyphs[1].trm.e, 107.5);
    assert_close(glyphs[1].trm.f, 100.0);
}

// ============================================================================
// Tiling patterns and text-matrix scoping
// ============================================================================

/// A test-only operator that paints a tiling pattern mid-stream, the way a
/// renderer's fill handler would.
struct PaintPattern {
    pattern: Rc<TilingPattern>,
}

impl OperatorHandler<RecordingSink> for PaintPattern {
    fn name(&self) -> &'static str {
        "PT"
    }

    fn invoke(
        &self,
        engine: &mut StreamEngine<RecordingSink>,
        _operator: &str,
        _operands: &[Object],
    ) -> EngineResult<()> {
        let matrix = *self.pattern.stream.matrix();
        engine.process_tiling_pattern(&self.pattern, None, &matrix)
    }
}

#[test]
fn test_tiling_pattern_preserves_outer_text_state() {
    // The pattern cell runs its own text object.
    let cell = ContentStream::new(b"BT 1 0 0 1 777 777 Tm ET 0 0 m 1 1 l S".to_vec())
        .with_matrix(Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
    let pattern = Rc::new(TilingPattern::new(
        cell,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        PaintType::Colored,
    ));

    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(FixedWidthFont::new(500)));
    let page = page_with_resources("BT /F1 10 Tf 10 20 Td PT (A) Tj ET", resources);

    let mut engine = StreamEngine::new(RecordingSink::new());
    engine.register(Rc::new(PaintPattern {
        pattern: pattern.clone(),
    }));
    engine.process_page(&page).unwrap();

    // The cell's stroke ran under the pattern matrix.
    let paints = &engine.sink().paints;
    assert_eq!(paints.len(), 1);
    assert_close(paints[0].state.ctm.a, 2.0);

    // The glyph after the pattern still uses the outer Td position.
    let glyphs = &engine.sink().glyphs;
    assert_eq!(glyphs.len(), 1);
    assert_close(glyphs[0].trm.e, 10.0);
    assert_close(glyphs[0].trm.f, 20.0);
}

#[test]
fn test_uncolored_pattern_gets_seeded_color() {
    let cell = ContentStream::new(b"0 0 m 1 1 l S".to_vec());
    let pattern = Rc::new(TilingPattern::new(
        cell,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        PaintType::Uncolored,
    ));

    let mut engine = StreamEngine::new(RecordingSink::new());
    let components = ColorComponents::from_slice(&[1.0, 0.0, 0.0]);
    engine
        .process_tiling_pattern(
            &pattern,
            Some((components, ColorSpace::DeviceRgb)),
            &Matrix::IDENTITY,
        )
        .unwrap();

    let paint = &engine.sink().paints[0];
    assert_eq!(paint.state.stroke_color.as_slice(), &[1.0, 0.0, 0.0]);
    assert_eq!(paint.state.fill_color.as_slice(), &[1.0, 0.0, 0.0]);
    assert_eq!(paint.state.stroke_color_space, ColorSpace::DeviceRgb);
}
