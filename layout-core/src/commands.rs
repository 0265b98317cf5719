use crate::element::{Element, ElementArena, ElementKind};
use crate::error::Warning;
use crate::geometry::{Axis, BoundingBox, Color, CornerRadius, EPSILON};
use crate::images::ImageFit;
use crate::placement::{block_y_offset, line_x_offset, merge_runs, text_height, TextRun};

/// One absolutely positioned drawing operation, tagged with its page.
/// Within a page, a stable sort by `z_index` yields back-to-front paint
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub page: usize,
    pub bounds: BoundingBox,
    pub z_index: u32,
    pub kind: CommandKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Rect {
        color: Color,
        corner_radius: Option<CornerRadius>,
    },
    Circle {
        color: Color,
    },
    /// One wrapped line of rich text. `line_height` is the baseline
    /// advance the consumer should use when it stacks related lines.
    Text {
        runs: Vec<TextRun>,
        color: Color,
        font_size: f64,
        line_height: f64,
    },
    Image {
        source: String,
        fit: ImageFit,
        opacity: f64,
        corner_radius: Option<CornerRadius>,
        rounded: bool,
    },
}

/// Emit one page's subtrees as a flat command list, stable-sorted by
/// z-index (tree depth). Overconstrained boxes are clipped to their
/// parent's content box and noted in `warnings`.
pub fn emit_page(
    arena: &ElementArena,
    page: usize,
    roots: &[usize],
    default_line_factor: f64,
    warnings: &mut Vec<Warning>,
) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    for &root in roots {
        emit_element(
            arena,
            root,
            page,
            0,
            None,
            default_line_factor,
            &mut commands,
            warnings,
        );
    }
    commands.sort_by_key(|c| c.z_index);
    commands
}

fn emit_element(
    arena: &ElementArena,
    idx: usize,
    page: usize,
    depth: u32,
    clip: Option<BoundingBox>,
    default_line_factor: f64,
    commands: &mut Vec<RenderCommand>,
    warnings: &mut Vec<Warning>,
) {
    let e = &arena[idx];
    let raw = BoundingBox::new(
        e.position.x,
        e.position.y,
        e.dimensions.width,
        e.dimensions.height,
    );
    let bounds = match clip {
        Some(parent_box) => clip_with_warning(raw, parent_box, &e.id, warnings),
        None => raw,
    };

    match e.kind {
        ElementKind::Rectangle => {
            // Every element emits a command. An unfilled container gets a
            // fully transparent fill so the consumer sees the box without
            // painting it; circles are drawn shapes and default to black.
            commands.push(RenderCommand {
                page,
                bounds,
                z_index: depth,
                kind: CommandKind::Rect {
                    color: e
                        .background
                        .unwrap_or_else(|| Color::rgba(0.0, 0.0, 0.0, 0.0)),
                    corner_radius: e.corner_radius,
                },
            });
        }
        ElementKind::Circle => {
            commands.push(RenderCommand {
                page,
                bounds,
                z_index: depth,
                kind: CommandKind::Circle {
                    color: e.background.unwrap_or_else(Color::black),
                },
            });
        }
        ElementKind::Image => {
            if let Some(payload) = &e.image {
                commands.push(RenderCommand {
                    page,
                    bounds,
                    z_index: depth,
                    kind: CommandKind::Image {
                        source: payload.source.clone(),
                        fit: payload.fit,
                        opacity: payload.opacity,
                        corner_radius: payload.corner_radius,
                        rounded: payload.rounded,
                    },
                });
            }
        }
        ElementKind::Text => {
            emit_text_lines(e, page, depth, default_line_factor, commands, warnings);
        }
    }

    let content_box = BoundingBox::new(
        e.position.x + e.layout.padding.left,
        e.position.y + e.layout.padding.top,
        e.dimensions.width - e.layout.padding.horizontal(),
        e.dimensions.height - e.layout.padding.vertical(),
    );
    for &child in &e.children {
        emit_element(
            arena,
            child,
            page,
            depth + 1,
            Some(content_box),
            default_line_factor,
            commands,
            warnings,
        );
    }
}

/// One command per wrapped line. Lines advance by the element's baseline
/// advance; each is aligned inside the content box horizontally, and the
/// block as a whole vertically.
fn emit_text_lines(
    e: &Element,
    page: usize,
    depth: u32,
    default_line_factor: f64,
    commands: &mut Vec<RenderCommand>,
    warnings: &mut Vec<Warning>,
) {
    let payload = match &e.text {
        Some(p) => p,
        None => return,
    };
    let pad = e.layout.padding;
    let advance = payload.line_advance(default_line_factor);
    let avail_w = e.dimensions.width - pad.horizontal();
    let avail_h = e.dimensions.height - pad.vertical();
    let content_box = BoundingBox::new(
        e.position.x + pad.left,
        e.position.y + pad.top,
        avail_w,
        avail_h,
    );
    let block_h = text_height(&e.lines, advance, payload.font_size);
    let mut y = content_box.y + block_y_offset(e.layout.child_alignment.y, avail_h, block_h);

    for line in &e.lines {
        let x = content_box.x + line_x_offset(payload.align, avail_w, line.width);
        let runs = merge_runs(&line.words);
        if !runs.is_empty() {
            let raw = BoundingBox::new(x, y, line.width, line.height);
            let bounds = clip_with_warning(raw, content_box, &e.id, warnings);
            commands.push(RenderCommand {
                page,
                bounds,
                z_index: depth,
                kind: CommandKind::Text {
                    runs,
                    color: payload.color,
                    font_size: payload.font_size,
                    line_height: advance,
                },
            });
        }
        y += line.height + (advance - payload.font_size);
    }
}

/// Clip `bounds` to `parent_box`, recording an overconstraint warning
/// per overflowing axis.
fn clip_with_warning(
    bounds: BoundingBox,
    parent_box: BoundingBox,
    element_id: &str,
    warnings: &mut Vec<Warning>,
) -> BoundingBox {
    if parent_box.contains(&bounds) {
        return bounds;
    }
    let over_x = (parent_box.x - bounds.x)
        .max(bounds.right() - parent_box.right())
        .max(0.0);
    let over_y = (parent_box.y - bounds.y)
        .max(bounds.bottom() - parent_box.bottom())
        .max(0.0);
    for (axis, overflow) in [(Axis::X, over_x), (Axis::Y, over_y)] {
        if overflow > EPSILON {
            tracing::warn!(
                element = element_id,
                axis = %axis,
                overflow,
                "element overflows its parent content box; clipping"
            );
            warnings.push(Warning::Overconstrained {
                element: element_id.to_string(),
                axis,
                overflow,
            });
        }
    }
    parent_box.intersect(&bounds)
}
