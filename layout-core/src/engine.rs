use crate::commands::{emit_page, RenderCommand};
use crate::element::{
    AlignX, AlignY, ChildAlignment, Direction, Element, ElementArena, ElementKind, ImagePayload,
    LayoutConfig, TextPayload,
};
use crate::error::{LayoutError, Warning};
use crate::fonts::FontMetrics;
use crate::geometry::{Color, CornerRadius, Dimensions, Padding, Sizing};
use crate::images::{ImageFit, ImageMetrics};
use crate::measure::WidthCache;
use crate::solver::{solve_page, SolveParams};

/// Engine-level configuration. Per-element settings live on the style
/// records passed to the builder calls.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Default page width in points.
    pub page_width: f64,
    /// Default page height in points.
    pub page_height: f64,
    /// Baseline advance factor applied when a text element sets neither
    /// an explicit line height nor its own factor.
    pub line_spacing_factor: f64,
    /// Mark emoji tokens for raster-image substitution by the consumer.
    pub use_image_for_emojis: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            // US Letter.
            page_width: 612.0,
            page_height: 792.0,
            line_spacing_factor: 1.2,
            use_image_for_emojis: true,
        }
    }
}

/// Style record for container elements (Rectangle or Circle kinds).
#[derive(Debug, Clone)]
pub struct ContainerStyle {
    /// Stable id; auto-generated (`el-N`) when absent.
    pub id: Option<String>,
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Padding,
    pub child_gap: f64,
    pub direction: Direction,
    pub child_alignment: ChildAlignment,
    pub fill_color: Option<Color>,
    pub corner_radius: Option<CornerRadius>,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        ContainerStyle {
            id: None,
            width: Sizing::fit(),
            height: Sizing::fit(),
            padding: Padding::default(),
            child_gap: 0.0,
            direction: Direction::default(),
            child_alignment: ChildAlignment::default(),
            fill_color: None,
            corner_radius: None,
        }
    }
}

/// Style record for text elements.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub id: Option<String>,
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Padding,
    pub font_size: f64,
    pub color: Color,
    pub align: AlignX,
    /// Vertical placement of the wrapped block when the element is
    /// taller than its text.
    pub vertical_align: AlignY,
    /// Absolute baseline advance; wins over any spacing factor.
    pub line_height: Option<f64>,
    /// Overrides the engine-level spacing factor.
    pub line_spacing_factor: Option<f64>,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            id: None,
            width: Sizing::fit(),
            height: Sizing::fit(),
            padding: Padding::default(),
            font_size: 12.0,
            color: Color::black(),
            align: AlignX::Left,
            vertical_align: AlignY::Top,
            line_height: None,
            line_spacing_factor: None,
        }
    }
}

/// Style record for image elements.
#[derive(Debug, Clone)]
pub struct ImageStyle {
    pub id: Option<String>,
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Padding,
    pub fit: ImageFit,
    pub opacity: f64,
    pub corner_radius: Option<CornerRadius>,
    pub rounded: bool,
}

impl Default for ImageStyle {
    fn default() -> Self {
        ImageStyle {
            id: None,
            width: Sizing::fit(),
            height: Sizing::fit(),
            padding: Padding::default(),
            fit: ImageFit::default(),
            opacity: 1.0,
            corner_radius: None,
            rounded: false,
        }
    }
}

/// Everything a render produces: the flat command vector (ordered by
/// page, stable-sorted by z within each page) and the recoverable
/// conditions met along the way.
#[derive(Debug)]
pub struct RenderOutput {
    pub commands: Vec<RenderCommand>,
    pub warnings: Vec<Warning>,
}

struct Page {
    size: Dimensions,
    roots: Vec<usize>,
}

/// The layout engine. Build a tree with the open/close calls, then
/// `render` to get positioned commands. The engine owns its element
/// arena; nothing is shared between instances, and a render runs to
/// completion synchronously.
pub struct Engine {
    options: EngineOptions,
    fonts: Box<dyn FontMetrics>,
    images: Option<Box<dyn ImageMetrics>>,
    arena: ElementArena,
    pages: Vec<Page>,
    open_stack: Vec<usize>,
    next_auto_id: usize,
    cache: WidthCache,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("pages", &self.pages.len())
            .field("open_stack", &self.open_stack)
            .field("next_auto_id", &self.next_auto_id)
            .finish()
    }
}

impl Engine {
    pub fn new(options: EngineOptions, fonts: Box<dyn FontMetrics>) -> Result<Self, LayoutError> {
        check_nonneg(options.page_width)?;
        check_nonneg(options.page_height)?;
        check_nonneg(options.line_spacing_factor)?;
        Ok(Engine {
            options,
            fonts,
            images: None,
            arena: ElementArena::new(),
            pages: Vec::new(),
            open_stack: Vec::new(),
            next_auto_id: 0,
            cache: WidthCache::new(),
        })
    }

    /// Install an intrinsic-size port for images. Without one, Fit-sized
    /// images fall back to their clamps.
    pub fn set_image_metrics(&mut self, images: Box<dyn ImageMetrics>) -> &mut Self {
        self.images = Some(images);
        self
    }

    /// Open a page with the engine's default size.
    pub fn open_page(&mut self) -> Result<&mut Self, LayoutError> {
        let size = Dimensions::new(self.options.page_width, self.options.page_height);
        self.open_page_with(size)
    }

    /// Open a page with an explicit size.
    pub fn open_page_sized(&mut self, width: f64, height: f64) -> Result<&mut Self, LayoutError> {
        check_nonneg(width)?;
        check_nonneg(height)?;
        self.open_page_with(Dimensions::new(width, height))
    }

    fn open_page_with(&mut self, size: Dimensions) -> Result<&mut Self, LayoutError> {
        if !self.open_stack.is_empty() {
            return Err(LayoutError::UnclosedContainers(self.open_stack.len()));
        }
        self.pages.push(Page {
            size,
            roots: Vec::new(),
        });
        Ok(self)
    }

    /// Open a container of the given kind; children added until the
    /// matching `close_container` nest inside it.
    pub fn open_container(
        &mut self,
        kind: ElementKind,
        style: &ContainerStyle,
    ) -> Result<&mut Self, LayoutError> {
        if !matches!(kind, ElementKind::Rectangle | ElementKind::Circle) {
            return Err(LayoutError::InvalidContainerKind);
        }
        self.require_page()?;
        check_sizing(style.width)?;
        check_sizing(style.height)?;
        check_padding(&style.padding)?;
        check_nonneg(style.child_gap)?;

        let id = self.resolve_id(&style.id);
        let page = self.pages.len() - 1;
        let mut element = Element::new(id, page, kind);
        element.layout = LayoutConfig {
            width: style.width,
            height: style.height,
            padding: style.padding,
            child_gap: style.child_gap,
            child_alignment: style.child_alignment,
            direction: style.direction,
        };
        element.background = style.fill_color;
        element.corner_radius = style.corner_radius;

        let idx = self.attach(element);
        self.open_stack.push(idx);
        Ok(self)
    }

    /// Close the innermost open container.
    pub fn close_container(&mut self) -> Result<&mut Self, LayoutError> {
        match self.open_stack.pop() {
            Some(_) => Ok(self),
            None => Err(LayoutError::UnbalancedClose),
        }
    }

    /// Add a text leaf. `content` may carry `**bold**` and `*italic*`
    /// markers and `\n` hard breaks.
    pub fn text(&mut self, content: &str, style: &TextStyle) -> Result<&mut Self, LayoutError> {
        self.require_page()?;
        check_sizing(style.width)?;
        check_sizing(style.height)?;
        check_padding(&style.padding)?;
        check_nonneg(style.font_size)?;
        if let Some(h) = style.line_height {
            check_nonneg(h)?;
        }
        if let Some(f) = style.line_spacing_factor {
            check_nonneg(f)?;
        }

        let id = self.resolve_id(&style.id);
        let page = self.pages.len() - 1;
        let mut element = Element::new(id, page, ElementKind::Text);
        element.layout = LayoutConfig {
            width: style.width,
            height: style.height,
            padding: style.padding,
            child_gap: 0.0,
            child_alignment: ChildAlignment {
                x: AlignX::Left,
                y: style.vertical_align,
            },
            direction: Direction::Column,
        };
        element.text = Some(TextPayload {
            content: content.to_string(),
            font_size: style.font_size,
            line_spacing_factor: style.line_spacing_factor,
            line_height: style.line_height,
            align: style.align,
            color: style.color,
        });

        self.attach(element);
        Ok(self)
    }

    /// Add an image leaf. `source` is opaque to the engine and forwarded
    /// on the emitted command.
    pub fn image(&mut self, source: &str, style: &ImageStyle) -> Result<&mut Self, LayoutError> {
        self.require_page()?;
        check_sizing(style.width)?;
        check_sizing(style.height)?;
        check_padding(&style.padding)?;
        if !(0.0..=1.0).contains(&style.opacity) {
            return Err(LayoutError::OpacityOutOfRange(style.opacity));
        }

        let id = self.resolve_id(&style.id);
        let page = self.pages.len() - 1;
        let mut element = Element::new(id, page, ElementKind::Image);
        element.layout = LayoutConfig {
            width: style.width,
            height: style.height,
            padding: style.padding,
            ..LayoutConfig::default()
        };
        element.image = Some(ImagePayload {
            source: source.to_string(),
            fit: style.fit,
            opacity: style.opacity,
            corner_radius: style.corner_radius,
            rounded: style.rounded,
        });

        self.attach(element);
        Ok(self)
    }

    /// Solve every page and emit the flat command vector. Identical
    /// inputs always produce an identical vector; the width cache only
    /// amortizes repeated measurement.
    pub fn render(&mut self) -> Result<RenderOutput, LayoutError> {
        if !self.open_stack.is_empty() {
            return Err(LayoutError::UnclosedContainers(self.open_stack.len()));
        }

        let pages: Vec<(Dimensions, Vec<usize>)> = self
            .pages
            .iter()
            .map(|p| (p.size, p.roots.clone()))
            .collect();

        let mut warnings = Vec::new();
        let mut commands = Vec::new();
        for (page_idx, (size, roots)) in pages.iter().enumerate() {
            let mut params = SolveParams {
                fonts: self.fonts.as_ref(),
                images: self.images.as_deref(),
                cache: &mut self.cache,
                warnings: &mut warnings,
                line_spacing_factor: self.options.line_spacing_factor,
                use_image_for_emojis: self.options.use_image_for_emojis,
            };
            solve_page(&mut self.arena, roots, *size, &mut params);
            commands.extend(emit_page(
                &self.arena,
                page_idx,
                roots,
                self.options.line_spacing_factor,
                &mut warnings,
            ));
        }
        tracing::debug!(
            pages = pages.len(),
            commands = commands.len(),
            warnings = warnings.len(),
            "render complete"
        );
        Ok(RenderOutput { commands, warnings })
    }

    /// Look up a solved element by id, e.g. to inspect computed
    /// geometry after a render.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.arena.iter().find(|e| e.id == id)
    }

    /// All elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.arena.iter()
    }

    fn require_page(&self) -> Result<(), LayoutError> {
        if self.pages.is_empty() {
            return Err(LayoutError::NoOpenPage);
        }
        Ok(())
    }

    fn resolve_id(&mut self, id: &Option<String>) -> String {
        match id {
            Some(id) => id.clone(),
            None => {
                let id = format!("el-{}", self.next_auto_id);
                self.next_auto_id += 1;
                id
            }
        }
    }

    /// Wire a new element into the open container, or into the current
    /// page's root list when the stack is empty.
    fn attach(&mut self, mut element: Element) -> usize {
        match self.open_stack.last().copied() {
            Some(parent) => {
                element.parent = Some(parent);
                let idx = self.arena.push(element);
                self.arena[parent].children.push(idx);
                idx
            }
            None => {
                let idx = self.arena.push(element);
                self.pages
                    .last_mut()
                    .expect("attach is gated on an open page")
                    .roots
                    .push(idx);
                idx
            }
        }
    }
}

fn check_nonneg(value: f64) -> Result<(), LayoutError> {
    if value < 0.0 {
        return Err(LayoutError::NegativeSize(value));
    }
    Ok(())
}

fn check_padding(padding: &Padding) -> Result<(), LayoutError> {
    for side in [padding.left, padding.right, padding.top, padding.bottom] {
        check_nonneg(side)?;
    }
    Ok(())
}

fn check_sizing(sizing: Sizing) -> Result<(), LayoutError> {
    match sizing {
        Sizing::Fixed(n) => check_nonneg(n),
        Sizing::Fit { min, max } | Sizing::Grow { min, max } => {
            check_nonneg(min)?;
            check_nonneg(max)
        }
        Sizing::Percent { percent, min, max } => {
            check_nonneg(percent)?;
            check_nonneg(min)?;
            check_nonneg(max)
        }
    }
}
