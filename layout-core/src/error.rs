use crate::geometry::Axis;

/// Errors caused by incorrect use of the builder API. These abort the
/// offending call immediately and leave no partial output.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// `close_container` was called with no container open.
    UnbalancedClose,
    /// Content was added or a container opened before any page.
    NoOpenPage,
    /// `render` or `open_page` was called while containers were still
    /// open; the count is how many closes are missing.
    UnclosedContainers(usize),
    /// A size, clamp, padding, gap, or font size was negative.
    NegativeSize(f64),
    /// An opacity value fell outside [0, 1].
    OpacityOutOfRange(f64),
    /// A container was opened with a content-only kind (Text or Image).
    InvalidContainerKind,
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::UnbalancedClose => {
                write!(f, "close_container called with no container open")
            }
            LayoutError::NoOpenPage => write!(f, "no page is open"),
            LayoutError::UnclosedContainers(n) => {
                write!(f, "{} container(s) still open", n)
            }
            LayoutError::NegativeSize(v) => write!(f, "negative size: {}", v),
            LayoutError::OpacityOutOfRange(v) => {
                write!(f, "opacity {} outside [0, 1]", v)
            }
            LayoutError::InvalidContainerKind => {
                write!(f, "text and image elements cannot be opened as containers")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Recoverable conditions recorded during a render. None of these abort
/// the layout; the result is best-effort and the warning list is returned
/// alongside the command vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The font port returned NaN or a negative width; a heuristic
    /// width was substituted.
    MeasurementFallback { element: String, text: String },
    /// An element's minimum exceeded the space its parent could give it;
    /// the emitted command was clipped to the parent's content box.
    Overconstrained {
        element: String,
        axis: Axis,
        overflow: f64,
    },
    /// An image source could not be described; the command is emitted
    /// without intrinsic dimensions.
    ImageUnavailable { source: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MeasurementFallback { element, text } => {
                write!(f, "measurement fallback for {:?} in element {}", text, element)
            }
            Warning::Overconstrained {
                element,
                axis,
                overflow,
            } => write!(
                f,
                "element {} overflows its parent by {:.3}pt along {}",
                element, overflow, axis
            ),
            Warning::ImageUnavailable { source } => {
                write!(f, "image source {:?} could not be described", source)
            }
        }
    }
}
