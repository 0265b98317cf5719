//! The multi-pass constraint solver.
//!
//! A page is solved by seven passes in a fixed order: root
//! initialization, intrinsic minima (post-order), width distribution
//! (pre-order), text reflow, minima recomputation, height distribution,
//! and positioning (top-down). Widths are decided before text wraps so
//! the wrap feeds accurate heights into the height passes; rerunning the
//! minima pass afterwards is what lets FIT ancestors grow to hold the
//! wrapped text.

use crate::element::{ElementArena, ElementKind};
use crate::error::Warning;
use crate::fonts::FontMetrics;
use crate::geometry::{Axis, Dimensions, Point, Sizing, EPSILON};
use crate::images::ImageMetrics;
use crate::markdown;
use crate::measure::{measure_words, WidthCache};
use crate::placement::text_height;
use crate::wrap::wrap_words;

/// Ports and knobs threaded through a solve.
pub struct SolveParams<'a> {
    pub fonts: &'a dyn FontMetrics,
    pub images: Option<&'a dyn ImageMetrics>,
    pub cache: &'a mut WidthCache,
    pub warnings: &'a mut Vec<Warning>,
    pub line_spacing_factor: f64,
    pub use_image_for_emojis: bool,
}

/// Solve one page's subtrees in place. After this returns, every element
/// reachable from `roots` has a final `position` and dimensions that
/// dominate its minima (overconstrained subtrees excepted; those clip at
/// emission), and every text element has its wrapped lines.
pub fn solve_page(
    arena: &mut ElementArena,
    roots: &[usize],
    page: Dimensions,
    params: &mut SolveParams,
) {
    for &root in roots {
        reset(arena, root);
        init_root(arena, root, page);
        compute_minima(arena, root, params);
        adopt_minima(arena, root);
        distribute(arena, root, Axis::X);
        reflow_text(arena, root, params);
        recompute_minima(arena, root);
        adopt_minima(arena, root);
        distribute(arena, root, Axis::Y);
        position(arena, root, Point::default());
    }
}

/// Clear solver-written state so repeated renders start from the same
/// inputs.
fn reset(arena: &mut ElementArena, idx: usize) {
    let children = arena[idx].children.clone();
    let e = &mut arena[idx];
    e.min_dimensions = Dimensions::default();
    e.dimensions = Dimensions::default();
    e.position = Point::default();
    e.words.clear();
    e.lines.clear();
    for c in children {
        reset(arena, c);
    }
}

/// Pass 1: a root's dimensions come from its own declaration, the page
/// size for Grow, or zero for Fit (inflated once minima are known).
fn init_root(arena: &mut ElementArena, idx: usize, page: Dimensions) {
    for axis in [Axis::X, Axis::Y] {
        let sizing = arena[idx].layout.sizing(axis);
        let page_size = match axis {
            Axis::X => page.width,
            Axis::Y => page.height,
        };
        let value = match sizing {
            Sizing::Fixed(n) => n,
            Sizing::Percent { percent, .. } => sizing.clamp(page_size * percent),
            Sizing::Grow { .. } => sizing.clamp(page_size),
            Sizing::Fit { .. } => 0.0,
        };
        arena[idx].set_size_along(axis, value);
    }
}

/// Fit-sized roots inflate to their computed minima. Other declarations
/// keep the size pass 1 gave them; their content reflows or clips.
fn adopt_minima(arena: &mut ElementArena, root: usize) {
    for axis in [Axis::X, Axis::Y] {
        if matches!(arena[root].layout.sizing(axis), Sizing::Fit { .. }) {
            let min = arena[root].min_along(axis);
            let size = arena[root].size_along(axis);
            arena[root].set_size_along(axis, size.max(min));
        }
    }
}

/// Pass 2: intrinsic minima, bottom-up.
fn compute_minima(arena: &mut ElementArena, idx: usize, params: &mut SolveParams) {
    let children = arena[idx].children.clone();
    for &c in &children {
        compute_minima(arena, c, params);
    }
    match arena[idx].kind {
        ElementKind::Text => text_minima(arena, idx, params),
        ElementKind::Image if children.is_empty() => image_minima(arena, idx, params),
        _ if children.is_empty() => {
            for axis in [Axis::X, Axis::Y] {
                let floor = leaf_floor(arena[idx].layout.sizing(axis));
                arena[idx].set_min_along(axis, floor);
            }
        }
        _ => aggregate_minima(arena, idx),
    }
}

/// The smallest size a childless element claims for itself: its Fit
/// floor or Fixed size. Grow and Percent adapt to the parent and claim
/// only their configured floor.
fn leaf_floor(sizing: Sizing) -> f64 {
    match sizing {
        Sizing::Fixed(n) => n,
        _ => sizing.min(),
    }
}

/// Measure and pre-wrap a text element. With a known width (roots, or a
/// Fixed declaration) the text wraps against it; otherwise the minimum
/// is the natural unwrapped extent, hard breaks included.
fn text_minima(arena: &mut ElementArena, idx: usize, params: &mut SolveParams) {
    let payload = arena[idx]
        .text
        .clone()
        .expect("text element carries a text payload");
    let mut words = markdown::tokenize(&payload.content);
    let id = arena[idx].id.clone();
    measure_words(
        &mut words,
        params.fonts,
        payload.font_size,
        params.use_image_for_emojis,
        params.cache,
        params.warnings,
        &id,
    );

    let pad = arena[idx].layout.padding;
    let advance = payload.line_advance(params.line_spacing_factor);
    let known_width = if arena[idx].dimensions.width > 0.0 {
        Some(arena[idx].dimensions.width)
    } else if let Sizing::Fixed(n) = arena[idx].layout.width {
        Some(n)
    } else {
        None
    };

    let (min_w, lines) = match known_width {
        Some(w) => (w, wrap_words(&words, w - pad.horizontal())),
        None => {
            let lines = wrap_words(&words, f64::INFINITY);
            let widest = lines.iter().map(|l| l.width).fold(0.0_f64, f64::max);
            (widest + pad.horizontal(), lines)
        }
    };
    let min_h = text_height(&lines, advance, payload.font_size) + pad.vertical();

    let e = &mut arena[idx];
    e.words = words;
    e.lines = lines;
    e.min_dimensions = Dimensions::new(min_w, min_h);
}

/// Intrinsic image sizing applies only when both axes are Fit; the
/// source is described through the port and clamped into the declared
/// bounds.
fn image_minima(arena: &mut ElementArena, idx: usize, params: &mut SolveParams) {
    let both_fit = matches!(arena[idx].layout.width, Sizing::Fit { .. })
        && matches!(arena[idx].layout.height, Sizing::Fit { .. });
    let source = arena[idx]
        .image
        .as_ref()
        .map(|p| p.source.clone())
        .unwrap_or_default();

    let mut min = Dimensions::new(
        leaf_floor(arena[idx].layout.width),
        leaf_floor(arena[idx].layout.height),
    );
    if both_fit {
        match params.images.map(|port| port.describe(&source)) {
            Some(Ok(intrinsic)) => {
                let pad = arena[idx].layout.padding;
                min.width = arena[idx]
                    .layout
                    .width
                    .clamp(intrinsic.width + pad.horizontal());
                min.height = arena[idx]
                    .layout
                    .height
                    .clamp(intrinsic.height + pad.vertical());
            }
            Some(Err(_)) => {
                tracing::warn!(source = source.as_str(), "image source could not be described");
                params.warnings.push(Warning::ImageUnavailable { source });
            }
            None => {}
        }
    }
    arena[idx].min_dimensions = min;
}

/// Container minima: sum along the main axis (plus gaps), max across it,
/// plus padding, then the element's own declaration is folded in.
fn aggregate_minima(arena: &mut ElementArena, idx: usize) {
    for axis in [Axis::X, Axis::Y] {
        let value = aggregated_min_along(arena, idx, axis, false);
        arena[idx].set_min_along(axis, value);
    }
}

/// Child minima rolled up along one axis. With `use_dimensions`, a child
/// whose size is already assigned (wrapped text during reflow) counts at
/// that size if larger.
fn aggregated_min_along(
    arena: &ElementArena,
    idx: usize,
    axis: Axis,
    use_dimensions: bool,
) -> f64 {
    let e = &arena[idx];
    let main = e.layout.direction.main_axis();
    let n = e.children.len();
    let child_extent = |c: &usize| -> f64 {
        let child = &arena[*c];
        if use_dimensions {
            child.min_along(axis).max(child.size_along(axis))
        } else {
            child.min_along(axis)
        }
    };
    let content = if axis == main {
        let sum: f64 = e.children.iter().map(child_extent).sum();
        sum + e.layout.child_gap * (n.saturating_sub(1)) as f64
    } else {
        e.children.iter().map(child_extent).fold(0.0_f64, f64::max)
    };
    apply_self_sizing(e.layout.sizing(axis), content + e.layout.padding.along(axis))
}

/// Fold an element's own declaration into its content-derived minimum.
/// The declared clamps bound the content; an explicit Fixed size wins
/// outright; content that does not fit a fixed box is clipped at
/// emission, not grown around.
fn apply_self_sizing(sizing: Sizing, content_min: f64) -> f64 {
    match sizing {
        Sizing::Fixed(n) => n,
        _ => sizing.clamp(content_min),
    }
}

/// Passes 3 and 6: distribute one axis across each element's children,
/// pre-order.
fn distribute(arena: &mut ElementArena, idx: usize, axis: Axis) {
    let children = arena[idx].children.clone();
    if !children.is_empty() {
        let layout = arena[idx].layout.clone();
        let inner = arena[idx].size_along(axis) - layout.padding.along(axis);
        if axis == layout.direction.main_axis() {
            distribute_main(arena, &children, axis, inner, layout.child_gap);
        } else {
            distribute_cross(arena, &children, axis, inner);
        }
    }
    for c in children {
        distribute(arena, c, axis);
    }
}

/// Main-axis distribution: fixed, percent, and fit children take their
/// declared or minimum sizes; the remainder is split equally among Grow
/// children. Space freed by a clamp is re-offered in input order, so
/// earlier siblings absorb any sub-point remainder deterministically.
fn distribute_main(
    arena: &mut ElementArena,
    children: &[usize],
    axis: Axis,
    inner: f64,
    gap: f64,
) {
    let n = children.len();
    let avail = inner - gap * (n.saturating_sub(1)) as f64;

    let mut assigned = vec![0.0_f64; n];
    let mut grow = Vec::new();
    let mut used = 0.0_f64;

    for (i, &c) in children.iter().enumerate() {
        let child = &arena[c];
        let sizing = child.layout.sizing(axis);
        let raw = match sizing {
            Sizing::Fixed(v) => v,
            Sizing::Percent { percent, .. } => sizing.clamp(avail * percent),
            Sizing::Fit { .. } => child.min_along(axis),
            Sizing::Grow { .. } => {
                grow.push(i);
                continue;
            }
        };
        assigned[i] = resolve_child_size(arena, c, axis, raw, avail);
        used += assigned[i];
    }

    if !grow.is_empty() {
        let remaining = avail - used;
        let share = (remaining / grow.len() as f64).max(0.0);
        for &i in &grow {
            let c = children[i];
            let raw = arena[c].layout.sizing(axis).clamp(share);
            assigned[i] = resolve_child_size(arena, c, axis, raw, avail);
        }
        let spent: f64 = grow.iter().map(|&i| assigned[i]).sum();
        let mut leftover = remaining - spent;
        if leftover > EPSILON {
            for &i in &grow {
                let sizing = arena[children[i]].layout.sizing(axis);
                let cap = match axis {
                    Axis::X => sizing.max().min(avail.max(sizing.min())),
                    Axis::Y => sizing.max(),
                };
                let headroom = (cap - assigned[i]).max(0.0);
                let take = headroom.min(leftover);
                assigned[i] += take;
                leftover -= take;
                if leftover <= EPSILON {
                    break;
                }
            }
        }
    }

    for (i, &c) in children.iter().enumerate() {
        arena[c].set_size_along(axis, assigned[i]);
    }
}

/// Cross-axis distribution: each child sizes independently against the
/// parent's content box.
fn distribute_cross(arena: &mut ElementArena, children: &[usize], axis: Axis, inner: f64) {
    for &c in children {
        let child = &arena[c];
        let sizing = child.layout.sizing(axis);
        let raw = match sizing {
            Sizing::Fixed(v) => v,
            Sizing::Percent { percent, .. } => sizing.clamp(inner * percent),
            Sizing::Fit { .. } => child.min_along(axis),
            Sizing::Grow { .. } => sizing.clamp(inner),
        };
        let value = resolve_child_size(arena, c, axis, raw, inner);
        arena[c].set_size_along(axis, value);
    }
}

/// Final size for a non-fixed child given its raw per-sizing assignment.
///
/// Rigid children (anything but text) are raised to their minimum: a
/// container cannot shrink below what its subtree needs, and the emitter
/// clips the overflow. Along X the result is additionally capped at the
/// parent's available space so that text deeper in the subtree reflows
/// instead of inheriting its natural single-line extent; Y has no cap
/// because nothing can reflow vertically. Text itself is soft along X
/// (wrapping absorbs the deficit) and rigid along Y. Fixed declarations
/// bypass all of this: the author's size wins and overflow clips.
fn resolve_child_size(arena: &ElementArena, child: usize, axis: Axis, raw: f64, avail: f64) -> f64 {
    let e = &arena[child];
    let sizing = e.layout.sizing(axis);
    if let Sizing::Fixed(v) = sizing {
        return v;
    }
    let mut value = raw;
    let text_soft = e.kind == ElementKind::Text && axis == Axis::X;
    if !text_soft {
        value = value.max(e.min_along(axis));
    }
    if axis == Axis::X {
        value = value.min(avail.max(sizing.min()));
    }
    value
}

/// Pass 4: wrap every text element against its decided width and push
/// the resulting height through any chain of FIT-height ancestors.
fn reflow_text(arena: &mut ElementArena, idx: usize, params: &mut SolveParams) {
    let children = arena[idx].children.clone();
    if arena[idx].kind == ElementKind::Text {
        let payload = arena[idx]
            .text
            .clone()
            .expect("text element carries a text payload");
        let pad = arena[idx].layout.padding;
        let advance = payload.line_advance(params.line_spacing_factor);
        let avail = arena[idx].dimensions.width - pad.horizontal();

        let words = arena[idx].words.clone();
        let lines = wrap_words(&words, avail);
        let height = text_height(&lines, advance, payload.font_size) + pad.vertical();

        let e = &mut arena[idx];
        e.lines = lines;
        e.min_dimensions.height = height;
        // The decided width becomes the minimum: wrapping has already
        // absorbed any deficit, so ancestors must not see the natural
        // single-line extent again. Heights flow back through the
        // minima; the height pass (or Fit-root adoption) re-derives
        // dimensions from them, so a declared height is never clobbered.
        e.min_dimensions.width = e.dimensions.width;
        bubble_fit_heights(arena, idx);
    }
    for c in children {
        reflow_text(arena, c, params);
    }
}

/// Walk the ancestor chain of FIT-height elements, raising each minimum
/// to hold its children's current heights. A non-FIT ancestor stops the
/// walk: its size cannot change.
fn bubble_fit_heights(arena: &mut ElementArena, idx: usize) {
    let mut cursor = arena[idx].parent;
    while let Some(p) = cursor {
        if !matches!(arena[p].layout.height, Sizing::Fit { .. }) {
            break;
        }
        let aggregated = aggregated_min_along(arena, p, Axis::Y, true);
        let current = arena[p].min_dimensions.height;
        arena[p].min_dimensions.height = current.max(aggregated);
        cursor = arena[p].parent;
    }
}

/// Pass 5: re-aggregate container minima now that text elements carry
/// their wrapped heights. Leaves are left untouched: a text element
/// whose width did not change must contribute exactly what it already
/// does.
fn recompute_minima(arena: &mut ElementArena, idx: usize) {
    let children = arena[idx].children.clone();
    if children.is_empty() {
        return;
    }
    for &c in &children {
        recompute_minima(arena, c);
    }
    aggregate_minima(arena, idx);
}

/// Pass 7: positions, top-down. The main-axis group shifts by the
/// alignment's share of the free space; cross-axis alignment applies per
/// child.
fn position(arena: &mut ElementArena, idx: usize, origin: Point) {
    arena[idx].position = origin;
    let children = arena[idx].children.clone();
    if children.is_empty() {
        return;
    }

    let layout = arena[idx].layout.clone();
    let main = layout.direction.main_axis();
    let cross = main.cross();
    let content_origin = Point {
        x: origin.x + layout.padding.left,
        y: origin.y + layout.padding.top,
    };
    let inner_main = arena[idx].size_along(main) - layout.padding.along(main);
    let inner_cross = arena[idx].size_along(cross) - layout.padding.along(cross);

    let total: f64 = children
        .iter()
        .map(|&c| arena[c].size_along(main))
        .sum::<f64>()
        + layout.child_gap * (children.len() - 1) as f64;
    let free = (inner_main - total).max(0.0);
    let mut cursor = match main {
        Axis::X => content_origin.x,
        Axis::Y => content_origin.y,
    } + alignment_lead(&layout, main, free);

    for &c in &children {
        let child_main = arena[c].size_along(main);
        let child_cross = arena[c].size_along(cross);
        let cross_free = (inner_cross - child_cross).max(0.0);
        let cross_offset = alignment_lead(&layout, cross, cross_free);
        let child_origin = match main {
            Axis::X => Point {
                x: cursor,
                y: content_origin.y + cross_offset,
            },
            Axis::Y => Point {
                x: content_origin.x + cross_offset,
                y: cursor,
            },
        };
        position(arena, c, child_origin);
        cursor += child_main + layout.child_gap;
    }
}

/// How far the alignment shifts content into `free` space along `axis`.
fn alignment_lead(layout: &crate::element::LayoutConfig, axis: Axis, free: f64) -> f64 {
    use crate::element::{AlignX, AlignY};
    match axis {
        Axis::X => match layout.child_alignment.x {
            AlignX::Left => 0.0,
            AlignX::Center => free / 2.0,
            AlignX::Right => free,
        },
        Axis::Y => match layout.child_alignment.y {
            AlignY::Top => 0.0,
            AlignY::Center => free / 2.0,
            AlignY::Bottom => free,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_sizing_folds_declaration_into_content() {
        // Clamps cap and floor the content minimum.
        assert_eq!(apply_self_sizing(Sizing::fit_clamped(10.0, 50.0), 80.0), 50.0);
        assert_eq!(apply_self_sizing(Sizing::fit_clamped(10.0, 50.0), 5.0), 10.0);
        assert_eq!(apply_self_sizing(Sizing::grow(), 25.0), 25.0);
        // Fixed wins outright; oversized content clips at emission.
        assert_eq!(apply_self_sizing(Sizing::fixed(40.0), 20.0), 40.0);
        assert_eq!(apply_self_sizing(Sizing::fixed(40.0), 60.0), 40.0);
    }

    #[test]
    fn leaf_floor_is_fixed_or_min() {
        assert_eq!(leaf_floor(Sizing::fixed(20.0)), 20.0);
        assert_eq!(leaf_floor(Sizing::fit_clamped(5.0, 100.0)), 5.0);
        assert_eq!(leaf_floor(Sizing::grow()), 0.0);
    }
}
