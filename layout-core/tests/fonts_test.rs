use std::cell::Cell;

use layout_core::{
    fonts::resolve_face, BuiltinFontMetrics, Engine, EngineOptions, FontFace, FontMetrics, Sizing,
    TextStyle, Warning,
};

// ---- Builtin metrics ----

#[test]
fn builtin_measures_known_strings() {
    let m = BuiltinFontMetrics::new();
    // "iii" = 3 * 222/1000 em -> 2.664pt per char at 12pt.
    let w = m.width_of(FontFace::Regular, 12.0, "iii");
    assert!((w - 3.0 * 2.664).abs() < 1e-9);
    // Out-of-range characters use the default width (278).
    let w = m.width_of(FontFace::Regular, 10.0, "é");
    assert!((w - 2.78).abs() < 1e-9);
}

#[test]
fn builtin_line_height_is_a_fifth_over_size() {
    let m = BuiltinFontMetrics::new();
    assert!((m.line_height(FontFace::Regular, 10.0) - 12.0).abs() < 1e-9);
}

#[test]
fn builtin_has_no_emoji_face() {
    let m = BuiltinFontMetrics::new();
    assert!(!m.has_face(FontFace::Emoji));
    assert!(m.has_face(FontFace::BoldItalic));
}

// ---- Fallback chain ----

/// A provider with an adjustable face inventory.
struct PartialMetrics {
    bold: bool,
    italic: bool,
    bold_italic: bool,
}

impl FontMetrics for PartialMetrics {
    fn width_of(&self, _face: FontFace, size: f64, text: &str) -> f64 {
        text.chars().count() as f64 * size * 0.5
    }

    fn line_height(&self, _face: FontFace, size: f64) -> f64 {
        size * 1.2
    }

    fn has_face(&self, face: FontFace) -> bool {
        match face {
            FontFace::Regular => true,
            FontFace::Bold => self.bold,
            FontFace::Italic => self.italic,
            FontFace::BoldItalic => self.bold_italic,
            FontFace::Emoji => false,
        }
    }
}

#[test]
fn bold_italic_falls_back_to_bold_then_regular() {
    let with_bold = PartialMetrics {
        bold: true,
        italic: false,
        bold_italic: false,
    };
    assert_eq!(resolve_face(&with_bold, FontFace::BoldItalic), FontFace::Bold);

    let regular_only = PartialMetrics {
        bold: false,
        italic: false,
        bold_italic: false,
    };
    assert_eq!(
        resolve_face(&regular_only, FontFace::BoldItalic),
        FontFace::Regular
    );
    assert_eq!(
        resolve_face(&regular_only, FontFace::Italic),
        FontFace::Regular
    );
    assert_eq!(
        resolve_face(&regular_only, FontFace::Emoji),
        FontFace::Regular
    );
}

// ---- Measurement fallback ----

/// A port that returns NaN for everything.
struct BrokenMetrics;

impl FontMetrics for BrokenMetrics {
    fn width_of(&self, _face: FontFace, _size: f64, _text: &str) -> f64 {
        f64::NAN
    }

    fn line_height(&self, _face: FontFace, size: f64) -> f64 {
        size * 1.2
    }

    fn has_face(&self, _face: FontFace) -> bool {
        true
    }
}

#[test]
fn nan_widths_get_the_heuristic_and_a_warning() {
    let options = EngineOptions {
        page_width: 100.0,
        page_height: 100.0,
        ..Default::default()
    };
    let mut eng = Engine::new(options, Box::new(BrokenMetrics)).unwrap();
    eng.open_page().unwrap();
    eng.text(
        "abc",
        &TextStyle {
            id: Some("t".to_string()),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    // Heuristic width: 3 chars * 10 / 2.
    assert_eq!(eng.element("t").unwrap().dimensions.width, 15.0);
    assert_eq!(
        out.warnings
            .iter()
            .filter(|w| matches!(w, Warning::MeasurementFallback { .. }))
            .count(),
        1
    );
}

// ---- Width cache ----

/// Counts port invocations so cache hits are observable.
struct CountingMetrics {
    calls: Cell<usize>,
}

impl FontMetrics for CountingMetrics {
    fn width_of(&self, _face: FontFace, size: f64, text: &str) -> f64 {
        self.calls.set(self.calls.get() + 1);
        text.chars().count() as f64 * size * 0.6
    }

    fn line_height(&self, _face: FontFace, size: f64) -> f64 {
        size * 1.2
    }

    fn has_face(&self, _face: FontFace) -> bool {
        true
    }
}

#[test]
fn repeated_renders_hit_the_width_cache() {
    let counter = std::rc::Rc::new(CountingMetrics {
        calls: Cell::new(0),
    });

    struct Shared(std::rc::Rc<CountingMetrics>);
    impl FontMetrics for Shared {
        fn width_of(&self, face: FontFace, size: f64, text: &str) -> f64 {
            self.0.width_of(face, size, text)
        }
        fn line_height(&self, face: FontFace, size: f64) -> f64 {
            self.0.line_height(face, size)
        }
        fn has_face(&self, face: FontFace) -> bool {
            self.0.has_face(face)
        }
    }

    let options = EngineOptions {
        page_width: 100.0,
        page_height: 100.0,
        ..Default::default()
    };
    let mut eng = Engine::new(options, Box::new(Shared(counter.clone()))).unwrap();
    eng.open_page().unwrap();
    eng.text(
        "one two one two",
        &TextStyle {
            width: Sizing::fixed(40.0),
            font_size: 10.0,
            ..Default::default()
        },
    )
    .unwrap();

    eng.render().unwrap();
    let after_first = counter.calls.get();
    // Repeated tokens ("one", "two", " ") measure once each.
    assert_eq!(after_first, 3);

    eng.render().unwrap();
    assert_eq!(counter.calls.get(), after_first, "second render must be fully cached");
}
