//! Feeds for the session's series, including per-point colour rules.
//!
//! Colours are derived from adjacent bars, so they are recomputed on every
//! rebuild and never stored on the bars themselves.

use crate::data_types::{Bar, IndicatorKind, IndicatorSeries, ValueField};
use crate::surface::{OhlcPoint, ValuePoint};
use crate::theme::ChartTheme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn is_up(self) -> bool {
        self == Direction::Up
    }
}

pub fn candles(bars: &[Bar]) -> Vec<OhlcPoint> {
    bars.iter()
        .map(|b| OhlcPoint {
            time: b.time,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
        })
        .collect()
}

/// Up when a bar closes at or above the previous close; the first bar
/// compares against its own open.
pub fn volume_directions(bars: &[Bar]) -> Vec<Direction> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let reference = match i {
                0 => bar.open,
                _ => bars[i - 1].close,
            };
            if bar.close >= reference {
                Direction::Up
            } else {
                Direction::Down
            }
        })
        .collect()
}

/// Bars without a volume field read as gaps.
pub fn volume_points(bars: &[Bar], theme: &ChartTheme) -> Vec<ValuePoint> {
    bars.iter()
        .zip(volume_directions(bars))
        .map(|(bar, dir)| {
            let color = if dir.is_up() { theme.volume_up } else { theme.volume_down };
            ValuePoint::colored(bar.time, bar.volume.unwrap_or(f64::NAN), color)
        })
        .collect()
}

/// Positive is up; zero and negative are down.
pub fn macd_direction(value: f64) -> Direction {
    if value > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Points of one indicator field, taken from the indicator's own sequence.
pub fn indicator_points(
    kind: IndicatorKind,
    series: &IndicatorSeries,
    field: ValueField,
    theme: &ChartTheme,
) -> Vec<ValuePoint> {
    series
        .points
        .iter()
        .map(|p| {
            let value = p.field(field);
            match kind {
                IndicatorKind::Macd => {
                    let color = if macd_direction(value).is_up() {
                        theme.macd_up
                    } else {
                        theme.macd_down
                    };
                    ValuePoint::colored(p.time(), value, color)
                }
                _ => ValuePoint::new(p.time(), value),
            }
        })
        .collect()
}
