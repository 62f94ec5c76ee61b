//! Marker Projector: trade signals to chart markers.

use crate::data_types::{Marker, MarkerPosition, MarkerShape, Signal, SignalAction};
use crate::theme::ChartTheme;
use gpui::Hsla;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    pub buy_color: Hsla,
    pub sell_color: Hsla,
}

impl MarkerStyle {
    pub fn from_theme(theme: &ChartTheme) -> Self {
        Self {
            buy_color: theme.buy_marker,
            sell_color: theme.sell_marker,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::from_theme(&ChartTheme::default())
    }
}

/// Projects signals into markers in ascending time order.
///
/// The renderer needs monotonic marker times; unsorted input is sorted here
/// (stable, so same-time signals keep their relative order).
pub fn project(signals: &[Signal], style: &MarkerStyle) -> Vec<Marker> {
    let mut markers: Vec<Marker> = signals.iter().map(|s| marker_for(s, style)).collect();
    if !markers.windows(2).all(|w| w[0].time <= w[1].time) {
        debug!(count = markers.len(), "sorting unsorted signal sequence");
        markers.sort_by_key(|m| m.time);
    }
    markers
}

fn marker_for(signal: &Signal, style: &MarkerStyle) -> Marker {
    let (shape, color, default_position) = match signal.action {
        SignalAction::Buy => (MarkerShape::ArrowUp, style.buy_color, MarkerPosition::BelowBar),
        SignalAction::Sell => (MarkerShape::ArrowDown, style.sell_color, MarkerPosition::AboveBar),
    };
    Marker {
        time: signal.time,
        position: signal.position.unwrap_or(default_position),
        shape,
        color,
        text: signal.description.clone(),
    }
}
