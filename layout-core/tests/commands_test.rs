use layout_core::{
    Color, CommandKind, ContainerStyle, Direction, ElementKind, Engine, EngineOptions, FontFace,
    FontMetrics, ImageFit, ImageStyle, Sizing, TextStyle, Warning,
};

/// Fixed-advance test font: 0.6 em per character.
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

fn filled(id: &str, color: Color) -> ContainerStyle {
    ContainerStyle {
        id: Some(id.to_string()),
        width: Sizing::grow(),
        height: Sizing::grow(),
        fill_color: Some(color),
        ..Default::default()
    }
}

// ---- Z ordering ----

#[test]
fn depth_sorts_back_to_front() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            direction: Direction::Row,
            ..filled("root", Color::white())
        },
    )
    .unwrap();
    eng.open_container(ElementKind::Rectangle, &filled("a", Color::gray(0.8)))
        .unwrap();
    eng.text("deep", &TextStyle::default()).unwrap();
    eng.close_container().unwrap();
    eng.open_container(ElementKind::Rectangle, &filled("b", Color::gray(0.6)))
        .unwrap();
    eng.close_container().unwrap();
    eng.close_container().unwrap();
    let out = eng.render().unwrap();

    let z: Vec<u32> = out.commands.iter().map(|c| c.z_index).collect();
    let mut sorted = z.clone();
    sorted.sort();
    assert_eq!(z, sorted, "commands must be z-ascending within the page");
    // Root at depth 0, both fills at depth 1, the text at depth 2 last.
    assert_eq!(z, vec![0, 1, 1, 2]);
    assert!(matches!(
        out.commands.last().unwrap().kind,
        CommandKind::Text { .. }
    ));
}

#[test]
fn unfilled_containers_emit_transparent_rects() {
    let mut eng = engine();
    eng.open_page().unwrap();
    // No fill on the root: it still emits, with a fully transparent fill.
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            id: Some("root".to_string()),
            width: Sizing::grow(),
            height: Sizing::grow(),
            ..Default::default()
        },
    )
    .unwrap();
    eng.open_container(ElementKind::Rectangle, &filled("inner", Color::gray(0.5)))
        .unwrap();
    eng.text("x", &TextStyle::default()).unwrap();
    eng.close_container().unwrap();
    eng.close_container().unwrap();
    let out = eng.render().unwrap();

    assert_eq!(out.commands.len(), 3);
    assert_eq!(out.commands[0].z_index, 0);
    match &out.commands[0].kind {
        CommandKind::Rect { color, .. } => assert_eq!(color.a, 0.0),
        other => panic!("expected a rect, got {:?}", other),
    }
    assert_eq!(out.commands[1].z_index, 1);
    assert_eq!(out.commands[2].z_index, 2);
}

// ---- Shapes ----

#[test]
fn circle_takes_the_fill_or_black() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.open_container(
        ElementKind::Circle,
        &ContainerStyle {
            id: Some("dot".to_string()),
            width: Sizing::fixed(10.0),
            height: Sizing::fixed(10.0),
            ..Default::default()
        },
    )
    .unwrap();
    eng.close_container().unwrap();
    let out = eng.render().unwrap();

    assert_eq!(out.commands.len(), 1);
    match &out.commands[0].kind {
        CommandKind::Circle { color } => assert_eq!(*color, Color::black()),
        other => panic!("expected a circle, got {:?}", other),
    }
    assert_eq!(out.commands[0].bounds.width, 10.0);
}

#[test]
fn corner_radius_reaches_the_rect_command() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            corner_radius: Some(layout_core::CornerRadius::uniform(4.0)),
            ..filled("r", Color::gray(0.2))
        },
    )
    .unwrap();
    eng.close_container().unwrap();
    let out = eng.render().unwrap();

    match &out.commands[0].kind {
        CommandKind::Rect { corner_radius, .. } => {
            assert_eq!(corner_radius.unwrap().top_left, 4.0);
        }
        other => panic!("expected a rect, got {:?}", other),
    }
}

// ---- Images ----

#[test]
fn image_payload_passes_through() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.image(
        "assets/logo.png",
        &ImageStyle {
            id: Some("logo".to_string()),
            width: Sizing::fixed(40.0),
            height: Sizing::fixed(30.0),
            fit: ImageFit::Cover,
            opacity: 0.5,
            rounded: true,
            ..Default::default()
        },
    )
    .unwrap();
    let out = eng.render().unwrap();

    assert_eq!(out.commands.len(), 1);
    match &out.commands[0].kind {
        CommandKind::Image {
            source,
            fit,
            opacity,
            rounded,
            ..
        } => {
            assert_eq!(source, "assets/logo.png");
            assert_eq!(*fit, ImageFit::Cover);
            assert_eq!(*opacity, 0.5);
            assert!(rounded);
        }
        other => panic!("expected an image, got {:?}", other),
    }
    assert_eq!(out.commands[0].bounds.width, 40.0);
    assert_eq!(out.commands[0].bounds.height, 30.0);
}

// ---- Overconstraint clipping ----

#[test]
fn oversized_fixed_child_is_clipped_and_warned() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            id: Some("parent".to_string()),
            width: Sizing::fixed(30.0),
            height: Sizing::fixed(30.0),
            direction: Direction::Row,
            ..Default::default()
        },
    )
    .unwrap();
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            width: Sizing::fixed(50.0),
            height: Sizing::fixed(10.0),
            fill_color: Some(Color::gray(0.4)),
            id: Some("wide".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    eng.close_container().unwrap();
    eng.close_container().unwrap();
    let out = eng.render().unwrap();

    // The unfilled parent emits a transparent rect at z 0; the filled
    // child follows it.
    let rects: Vec<_> = out
        .commands
        .iter()
        .filter(|c| matches!(c.kind, CommandKind::Rect { .. }))
        .collect();
    assert_eq!(rects.len(), 2);
    let wide = rects[1];
    assert_eq!(wide.z_index, 1);
    assert_eq!(wide.bounds.width, 30.0);
    let overconstrained: Vec<_> = out
        .warnings
        .iter()
        .filter(|w| {
            matches!(
                w,
                Warning::Overconstrained {
                    element,
                    axis: layout_core::Axis::X,
                    ..
                } if element == "wide"
            )
        })
        .collect();
    assert_eq!(overconstrained.len(), 1);
}

// ---- Bounding boxes ----

#[test]
fn bounds_match_solved_geometry() {
    let mut eng = engine();
    eng.open_page().unwrap();
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            direction: Direction::Column,
            padding: layout_core::Padding::uniform(10.0),
            ..filled("root", Color::white())
        },
    )
    .unwrap();
    eng.open_container(
        ElementKind::Rectangle,
        &ContainerStyle {
            width: Sizing::fixed(20.0),
            height: Sizing::fixed(15.0),
            ..filled("child", Color::gray(0.3))
        },
    )
    .unwrap();
    eng.close_container().unwrap();
    eng.close_container().unwrap();
    let out = eng.render().unwrap();

    let child_cmd = &out.commands[1];
    assert_eq!(child_cmd.bounds.x, 10.0);
    assert_eq!(child_cmd.bounds.y, 10.0);
    assert_eq!(child_cmd.bounds.width, 20.0);
    assert_eq!(child_cmd.bounds.height, 15.0);
}
