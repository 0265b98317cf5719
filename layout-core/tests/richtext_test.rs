use layout_core::{
    AlignX, AlignY, CommandKind, Engine, EngineOptions, FontFace, FontMetrics, Sizing, TextStyle,
    Warning,
};

/// Fixed-advance test font: 0.6 em per character, so 6pt per char at
/// 10pt. Line boxes are 1.2x the size.
struct FixedMetrics;

impl FontMetrics for FixedMetrics {
    fn width_of(&self, _face: FontFace, size: f64, text: &str) -> f64 {
        text.chars().count() as f64 * size * 0.6
    }

    fn line_height(&self, _face: FontFace, size: f64) -> f64 {
        size * 1.2
    }

    fn has_face(&self, _face: FontFace) -> bool {
        true
    }
}

fn engine() -> Engine {
    let options = EngineOptions {
        page_width: 100.0,
        page_height: 100.0,
        ..Default::default()
    };
    Engine::new(options, Box::new(FixedMetrics)).unwrap()
}

fn text_commands(out: &layout_core::RenderOutput) -> Vec<&layout_core::RenderCommand> {
    out.commands
        .iter()
        .filter(|c| matches!(c.kind, CommandKind::Text { .. }))
        .collect()
}

// ---- Wrapping and alignment ----

#[test]
fn narrow_fixed_text_wraps_and_centers() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "ab cd ef",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(28.0),
            font_size: 10.0,
            align: AlignX::Center,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    let t = eng.element("t").unwrap();
    assert_eq!(t.lines.len(), 3);
    for line in &t.lines {
        assert_eq!(line.width, 12.0);
    }
    // 3 lines of 10pt at a 12pt advance: 10 + 2*12.
    assert_eq!(t.dimensions.height, 34.0);

    let cmds = text_commands(&out);
    assert_eq!(cmds.len(), 3);
    for (i, cmd) in cmds.iter().enumerate() {
        // Centered: (28 - 12) / 2 = 8.
        assert_eq!(cmd.bounds.x, 8.0);
        assert_eq!(cmd.bounds.y, i as f64 * 12.0);
        assert_eq!(cmd.bounds.height, 10.0);
    }
    assert!(out.warnings.is_empty());
}

#[test]
fn exact_fit_stays_on_one_line() {
    // "ab cd" is exactly 30pt wide; a 30pt box must not wrap it.
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "ab cd",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(30.0),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();
    eng.render().unwrap();
    assert_eq!(eng.element("t").unwrap().lines.len(), 1);
}

#[test]
fn right_alignment_pushes_lines_to_the_edge() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "ab",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(40.0),
            font_size: 10.0,
            align: AlignX::Right,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();
    let cmds = text_commands(&out);
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].bounds.x, 40.0 - 12.0);
}

// ---- Styled runs ----

#[test]
fn mixed_styles_emit_one_command_with_three_runs() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "**A** b *c*",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(100.0),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    let cmds = text_commands(&out);
    assert_eq!(cmds.len(), 1);
    let runs = match &cmds[0].kind {
        CommandKind::Text { runs, .. } => runs,
        _ => unreachable!(),
    };
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].text, "A");
    assert!(runs[0].bold && !runs[0].italic);
    assert_eq!(runs[1].text, " b ");
    assert!(!runs[1].bold && !runs[1].italic);
    assert_eq!(runs[2].text, "c");
    assert!(runs[2].italic && !runs[2].bold);
    // Widths sum per face: 1 + 3 + 1 chars at 6pt each.
    assert_eq!(runs[0].width + runs[1].width + runs[2].width, 30.0);
}

// ---- Vertical alignment ----

#[test]
fn vertical_center_offsets_the_block() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "ab",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(40.0),
            height: Sizing::fixed(50.0),
            font_size: 10.0,
            vertical_align: AlignY::Center,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();
    let cmds = text_commands(&out);
    // Block is one 10pt line inside 50pt: offset (50 - 10) / 2.
    assert_eq!(cmds[0].bounds.y, 20.0);
}

// ---- Hard breaks and line height ----

#[test]
fn blank_line_advances_but_emits_nothing() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "a\n\nb",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(60.0),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    assert_eq!(eng.element("t").unwrap().lines.len(), 3);
    let cmds = text_commands(&out);
    // The blank middle line produces no command but still advances.
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].bounds.y, 0.0);
    assert_eq!(cmds[1].bounds.y, 24.0);
}

#[test]
fn explicit_line_height_overrides_spacing_factor() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "a\nb",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(60.0),
            font_size: 10.0,
            line_height: Some(20.0),
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    // Two 10pt lines at a 20pt advance: 10 + 20.
    assert_eq!(eng.element("t").unwrap().dimensions.height, 30.0);
    let cmds = text_commands(&out);
    assert_eq!(cmds[1].bounds.y, 20.0);
    match &cmds[0].kind {
        CommandKind::Text { line_height, .. } => assert_eq!(*line_height, 20.0),
        _ => unreachable!(),
    }
}

#[test]
fn custom_spacing_factor_changes_the_advance() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "a\nb",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(60.0),
            font_size: 10.0,
            line_spacing_factor: Some(2.0),
            ..Default::default()
        },
    )
    .unwrap();
    eng.render().unwrap();
    // Advance 20pt: 10 + 20.
    assert_eq!(eng.element("t").unwrap().dimensions.height, 30.0);
}

// ---- Overflow ----

#[test]
fn oversize_word_is_clipped_with_a_warning() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        "abcdefghij",
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(30.0),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    let cmds = text_commands(&out);
    assert_eq!(cmds.len(), 1);
    // The 60pt word is clipped to the 30pt content box.
    assert_eq!(cmds[0].bounds.width, 30.0);
    assert!(out.warnings.iter().any(|w| matches!(
        w,
        Warning::Overconstrained {
            axis: layout_core::Axis::X,
            ..
        }
    )));
}

// ---- Token conservation across wrapping ----

#[test]
fn no_token_is_lost_across_line_breaks() {
    let content = "one two three four five six seven";
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.text(
        content,
        &TextStyle {
            id: Some("t".to_string()),
            width: Sizing::fixed(45.0),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();
    eng.render().unwrap();

    let t = eng.element("t").unwrap();
    let rejoined: String = t
        .lines
        .iter()
        .flat_map(|l| l.words.iter())
        .map(|w| w.text.as_str())
        .collect();
    assert_eq!(rejoined, content);
}
