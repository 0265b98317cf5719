/// Report example: a two-page text document driven through the layout
/// engine, printing the resulting render commands.
///
/// Run with:
///   cargo run --example generate_report -p layout-demos
use layout_core::{
    AlignX, BuiltinFontMetrics, Color, CommandKind, ContainerStyle, Direction, ElementKind,
    Engine, EngineOptions, Padding, Sizing, TextStyle,
};

const PAGE_W: f64 = 612.0;
const PAGE_H: f64 = 792.0;
const MARGIN: f64 = 72.0;

// ── text helpers ──────────────────────────────────────────────────────────────

fn heading(size: f64) -> TextStyle {
    TextStyle {
        font_size: size,
        width: Sizing::grow(),
        ..Default::default()
    }
}

fn body() -> TextStyle {
    TextStyle {
        font_size: 11.0,
        width: Sizing::grow(),
        color: Color::gray(0.15),
        ..Default::default()
    }
}

fn page_frame() -> ContainerStyle {
    ContainerStyle {
        width: Sizing::grow(),
        height: Sizing::grow(),
        direction: Direction::Column,
        padding: Padding::uniform(MARGIN),
        child_gap: 14.0,
        ..Default::default()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let options = EngineOptions {
        page_width: PAGE_W,
        page_height: PAGE_H,
        ..Default::default()
    };
    let mut engine =
        Engine::new(options, Box::new(BuiltinFontMetrics::new())).expect("valid options");

    engine.open_page().unwrap();
    engine
        .open_container(ElementKind::Rectangle, &page_frame())
        .unwrap();
    engine
        .text("**Quarterly Engineering Report**", &heading(24.0))
        .unwrap();
    engine
        .text(
            "This report summarizes the quarter: throughput held steady, \
             incident counts fell, and the migration finished *ahead of \
             schedule*. The sections below break each workstream down.",
            &body(),
        )
        .unwrap();
    engine.text("**1. Reliability**", &heading(14.0)).unwrap();
    engine
        .text(
            "Error budgets were respected across all services. The pager \
             load dropped by a third after the retry storm fix landed.\n\
             On-call handoffs now include a written summary.",
            &body(),
        )
        .unwrap();
    engine.close_container().unwrap();

    engine.open_page().unwrap();
    engine
        .open_container(ElementKind::Rectangle, &page_frame())
        .unwrap();
    engine.text("**2. Performance**", &heading(14.0)).unwrap();
    engine
        .text(
            "Cold-start latency is down 40ms. The remaining regressions \
             trace to serialization, which the next quarter targets.",
            &body(),
        )
        .unwrap();
    engine
        .text(
            "page 2 of 2",
            &TextStyle {
                font_size: 9.0,
                width: Sizing::grow(),
                align: AlignX::Center,
                color: Color::gray(0.5),
                ..Default::default()
            },
        )
        .unwrap();
    engine.close_container().unwrap();

    let output = engine.render().expect("balanced builder calls");

    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }
    println!("{} commands:", output.commands.len());
    for cmd in &output.commands {
        let label = match &cmd.kind {
            CommandKind::Rect { .. } => "rect".to_string(),
            CommandKind::Circle { .. } => "circle".to_string(),
            CommandKind::Image { source, .. } => format!("image {}", source),
            CommandKind::Text { runs, .. } => {
                let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
                format!("text {:?}", joined)
            }
        };
        println!(
            "  page {} z {} at ({:.1}, {:.1}) {:.1}x{:.1}  {}",
            cmd.page,
            cmd.z_index,
            cmd.bounds.x,
            cmd.bounds.y,
            cmd.bounds.width,
            cmd.bounds.height,
            label
        );
    }
}
