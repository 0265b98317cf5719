pub mod commands;
pub mod element;
pub mod emoji;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod images;
pub mod markdown;
pub mod measure;
pub mod placement;
pub mod solver;
pub mod truetype;
pub mod wrap;

pub use commands::{CommandKind, RenderCommand};
pub use element::{AlignX, AlignY, ChildAlignment, Direction, Element, ElementKind};
pub use engine::{ContainerStyle, Engine, EngineOptions, ImageStyle, RenderOutput, TextStyle};
pub use error::{LayoutError, Warning};
pub use fonts::{BuiltinFontMetrics, FontFace, FontMetrics};
pub use geometry::{Axis, BoundingBox, Color, CornerRadius, Dimensions, Padding, Point, Sizing};
pub use images::{ImageFit, ImageMetrics, StaticImageMetrics};
pub use markdown::StyledWord;
pub use placement::TextRun;
pub use truetype::{TrueTypeFont, TrueTypeMetrics};
pub use wrap::WrappedLine;
