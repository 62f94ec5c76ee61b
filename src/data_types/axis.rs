use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of an independent vertical price scale.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleId(Cow<'static, str>);

impl ScaleId {
    /// Main price scale shared by candles and price overlays.
    pub const PRICE: ScaleId = ScaleId(Cow::Borrowed("right"));
    pub const VOLUME: ScaleId = ScaleId(Cow::Borrowed("volume"));
    pub const RSI: ScaleId = ScaleId(Cow::Borrowed("rsi"));
    pub const MACD: ScaleId = ScaleId(Cow::Borrowed("macd"));

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_price(&self) -> bool {
        *self == Self::PRICE
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vertical extent of a scale as fractions of the surface height
/// left free above (`top`) and below (`bottom`) it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleMargins {
    pub top: f32,
    pub bottom: f32,
}

impl ScaleMargins {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Pixel rows `(top, bottom)` covered by the scale.
    pub fn band(&self, height: f32) -> (f32, f32) {
        (height * self.top, height * (1.0 - self.bottom))
    }

    /// True when the two vertical extents share more than a boundary.
    pub fn overlaps(&self, other: &ScaleMargins) -> bool {
        const EPS: f32 = 1e-4;
        let (a_top, a_bot) = self.band(1.0);
        let (b_top, b_bot) = other.band(1.0);
        a_top < b_bot - EPS && b_top < a_bot - EPS
    }
}

impl Default for ScaleMargins {
    fn default() -> Self {
        Self { top: 0.1, bottom: 0.1 }
    }
}

/// Visible range of one axis in data units.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Pure zoom without constraints to preserve the pivot point.
    pub fn zoom_at(&mut self, pivot_data: f64, pivot_pct: f64, factor: f64) {
        let new_span = self.span() * factor;
        self.min = pivot_data - new_span * pivot_pct;
        self.max = self.min + new_span;
    }

    pub fn pan(&mut self, delta_data: f64) {
        self.min += delta_data;
        self.max += delta_data;
    }

    /// Applies limits while keeping the current span where possible.
    pub fn clamp(&mut self) {
        let (Some(min_l), Some(max_l)) = (self.min_limit, self.max_limit) else {
            if let Some(l) = self.min_limit {
                if self.min < l {
                    let s = self.span();
                    self.min = l;
                    self.max = l + s;
                }
            }
            if let Some(l) = self.max_limit {
                if self.max > l {
                    let s = self.span();
                    self.max = l;
                    self.min = l - s;
                }
            }
            return;
        };

        let limit_span = max_l - min_l;
        let current_span = self.span();

        if current_span <= limit_span {
            if self.min < min_l {
                self.min = min_l;
                self.max = min_l + current_span;
            } else if self.max > max_l {
                self.max = max_l;
                self.min = max_l - current_span;
            }
        } else if self.min > min_l {
            self.min = min_l;
            self.max = min_l + current_span;
        } else if self.max < max_l {
            self.max = max_l;
            self.min = max_l - current_span;
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}
