/// Flyer example: a one-page poster mixing shapes, an image, percent
/// sizing, and centered rich text.
///
/// Run with:
///   cargo run --example generate_flyer -p layout-demos
use layout_core::{
    AlignX, AlignY, BuiltinFontMetrics, ChildAlignment, Color, ContainerStyle, CornerRadius,
    Direction, ElementKind, Engine, EngineOptions, ImageFit, ImageStyle, Padding, Sizing,
    StaticImageMetrics, TextStyle,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let options = EngineOptions {
        page_width: 420.0,
        page_height: 595.0, // A5
        ..Default::default()
    };
    let mut engine =
        Engine::new(options, Box::new(BuiltinFontMetrics::new())).expect("valid options");

    let mut assets = StaticImageMetrics::new();
    assets.insert("hero.jpg", 800.0, 600.0);
    engine.set_image_metrics(Box::new(assets));

    engine.open_page().unwrap();
    engine
        .open_container(
            ElementKind::Rectangle,
            &ContainerStyle {
                width: Sizing::grow(),
                height: Sizing::grow(),
                direction: Direction::Column,
                padding: Padding::uniform(24.0),
                child_gap: 18.0,
                fill_color: Some(Color::from_hex("#f4f1ea").unwrap()),
                ..Default::default()
            },
        )
        .unwrap();

    // Banner: a rounded hero image covering the top third.
    engine
        .image(
            "hero.jpg",
            &ImageStyle {
                width: Sizing::grow(),
                height: Sizing::percent(0.33),
                fit: ImageFit::Cover,
                corner_radius: Some(CornerRadius::uniform(8.0)),
                ..Default::default()
            },
        )
        .unwrap();

    engine
        .text(
            "**Open Studio Night**",
            &TextStyle {
                font_size: 28.0,
                width: Sizing::grow(),
                align: AlignX::Center,
                color: Color::from_hex("#1e3a5f").unwrap(),
                ..Default::default()
            },
        )
        .unwrap();
    engine
        .text(
            "Twelve makers, one warehouse, *no velvet ropes*. \
             Drop by for demos, prints, and far too much coffee.",
            &TextStyle {
                font_size: 12.0,
                width: Sizing::grow(),
                align: AlignX::Center,
                ..Default::default()
            },
        )
        .unwrap();

    // Two-column footer: a dot marker and the date split 1:3.
    engine
        .open_container(
            ElementKind::Rectangle,
            &ContainerStyle {
                width: Sizing::grow(),
                height: Sizing::fixed(48.0),
                direction: Direction::Row,
                child_gap: 12.0,
                child_alignment: ChildAlignment {
                    x: AlignX::Center,
                    y: AlignY::Center,
                },
                ..Default::default()
            },
        )
        .unwrap();
    engine
        .open_container(
            ElementKind::Circle,
            &ContainerStyle {
                width: Sizing::fixed(16.0),
                height: Sizing::fixed(16.0),
                fill_color: Some(Color::from_hex("#c96f4a").unwrap()),
                ..Default::default()
            },
        )
        .unwrap();
    engine.close_container().unwrap();
    engine
        .text(
            "**Fri June 12**, doors at 19:00",
            &TextStyle {
                font_size: 13.0,
                width: Sizing::percent(0.75),
                vertical_align: AlignY::Center,
                ..Default::default()
            },
        )
        .unwrap();
    engine.close_container().unwrap();

    engine.close_container().unwrap();

    let output = engine.render().expect("balanced builder calls");
    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }
    println!(
        "flyer: {} commands on {} page(s)",
        output.commands.len(),
        output.commands.iter().map(|c| c.page).max().map_or(0, |p| p + 1)
    );
    for cmd in &output.commands {
        println!("  z {:>2} {:?}", cmd.z_index, cmd.bounds);
    }
}
