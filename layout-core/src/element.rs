use std::ops::{Index, IndexMut};

use crate::geometry::{Axis, Color, CornerRadius, Dimensions, Padding, Point, Sizing};
use crate::images::ImageFit;
use crate::markdown::StyledWord;
use crate::wrap::WrappedLine;

/// What an element renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Rectangle,
    Circle,
    Text,
    Image,
}

/// Main-axis direction for a container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

impl Direction {
    /// The axis children are stacked along.
    pub fn main_axis(self) -> Axis {
        match self {
            Direction::Row => Axis::X,
            Direction::Column => Axis::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignX {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignY {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Where children sit inside their parent's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildAlignment {
    pub x: AlignX,
    pub y: AlignY,
}

/// Solver-facing layout declaration for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Padding,
    pub child_gap: f64,
    pub child_alignment: ChildAlignment,
    pub direction: Direction,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            width: Sizing::fit(),
            height: Sizing::fit(),
            padding: Padding::default(),
            child_gap: 0.0,
            child_alignment: ChildAlignment::default(),
            direction: Direction::default(),
        }
    }
}

impl LayoutConfig {
    /// The sizing declaration along `axis`.
    pub fn sizing(&self, axis: Axis) -> Sizing {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Text content and its styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPayload {
    pub content: String,
    pub font_size: f64,
    /// Overrides the engine-level factor when set.
    pub line_spacing_factor: Option<f64>,
    /// Absolute per-line advance; wins over any spacing factor.
    pub line_height: Option<f64>,
    pub align: AlignX,
    pub color: Color,
}

impl TextPayload {
    /// The advance between consecutive baselines.
    pub fn line_advance(&self, default_factor: f64) -> f64 {
        match self.line_height {
            Some(h) => h,
            None => self.font_size * self.line_spacing_factor.unwrap_or(default_factor),
        }
    }
}

/// Image content. The engine never decodes `source`; it is forwarded
/// opaquely on the emitted command.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub source: String,
    pub fit: ImageFit,
    pub opacity: f64,
    pub corner_radius: Option<CornerRadius>,
    pub rounded: bool,
}

/// One node of the layout tree. Configuration fields are written by the
/// builder; `min_dimensions`, `dimensions`, `position`, `words`, and
/// `lines` are written by the solver during `render`.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    /// Index of the owning page. Pages are disjoint subtrees.
    pub page: usize,
    pub kind: ElementKind,
    pub layout: LayoutConfig,
    pub text: Option<TextPayload>,
    pub image: Option<ImagePayload>,
    pub background: Option<Color>,
    pub corner_radius: Option<CornerRadius>,
    pub children: Vec<usize>,
    pub parent: Option<usize>,

    pub min_dimensions: Dimensions,
    pub dimensions: Dimensions,
    pub position: Point,
    pub words: Vec<StyledWord>,
    pub lines: Vec<WrappedLine>,
}

impl Element {
    pub fn new(id: String, page: usize, kind: ElementKind) -> Self {
        Element {
            id,
            page,
            kind,
            layout: LayoutConfig::default(),
            text: None,
            image: None,
            background: None,
            corner_radius: None,
            children: Vec::new(),
            parent: None,
            min_dimensions: Dimensions::default(),
            dimensions: Dimensions::default(),
            position: Point::default(),
            words: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn min_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_dimensions.width,
            Axis::Y => self.min_dimensions.height,
        }
    }

    pub fn size_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dimensions.width,
            Axis::Y => self.dimensions.height,
        }
    }

    pub fn set_size_along(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.dimensions.width = value,
            Axis::Y => self.dimensions.height = value,
        }
    }

    pub fn set_min_along(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.min_dimensions.width = value,
            Axis::Y => self.min_dimensions.height = value,
        }
    }
}

/// Single-owner storage for the element tree. Children and parents
/// reference each other by index; indices are stable for the lifetime of
/// the engine.
#[derive(Debug, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
}

impl ElementArena {
    pub fn new() -> Self {
        ElementArena::default()
    }

    /// Store an element and return its index.
    pub fn push(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

impl Index<usize> for ElementArena {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.elements[index]
    }
}

impl IndexMut<usize> for ElementArena {
    fn index_mut(&mut self, index: usize) -> &mut Element {
        &mut self.elements[index]
    }
}
