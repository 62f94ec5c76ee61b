use super::bar::Timestamp;
use super::signals::MarkerPosition;
use gpui::Hsla;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
}

/// A point annotation drawn against the primary series.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub time: Timestamp,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub color: Hsla,
    pub text: String,
}
