use super::bar::{lenient_f64, Timestamp};
use crate::errors::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Indicator families the chart knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Ma,
    Rsi,
    Macd,
    Bollinger,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 4] = [Self::Ma, Self::Rsi, Self::Macd, Self::Bollinger];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ma => "ma",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::Bollinger => "bollinger",
        }
    }

    /// Oscillators are not price-comparable and never share the price scale.
    pub fn is_oscillator(self) -> bool {
        matches!(self, Self::Rsi | Self::Macd)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ChartError::UnsupportedIndicatorKind(s.to_string()))
    }
}

/// Which value of an indicator point a series draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueField {
    Value,
    Upper,
    Lower,
}

/// One indicator sample. A record carrying `upper` or `lower` is a band,
/// anything else is a single value; absent numbers read as `NaN`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawIndicatorPoint")]
pub enum IndicatorPoint {
    Band { time: Timestamp, upper: f64, lower: f64 },
    Value { time: Timestamp, value: f64 },
}

#[derive(Deserialize)]
struct RawIndicatorPoint {
    time: Timestamp,
    #[serde(default, deserialize_with = "lenient_f64::optional")]
    value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::optional")]
    upper: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::optional")]
    lower: Option<f64>,
}

impl From<RawIndicatorPoint> for IndicatorPoint {
    fn from(raw: RawIndicatorPoint) -> Self {
        if raw.upper.is_some() || raw.lower.is_some() {
            Self::Band {
                time: raw.time,
                upper: raw.upper.unwrap_or(f64::NAN),
                lower: raw.lower.unwrap_or(f64::NAN),
            }
        } else {
            Self::Value {
                time: raw.time,
                value: raw.value.unwrap_or(f64::NAN),
            }
        }
    }
}

impl IndicatorPoint {
    pub fn value(time: impl Into<Timestamp>, value: f64) -> Self {
        Self::Value {
            time: time.into(),
            value,
        }
    }

    pub fn band(time: impl Into<Timestamp>, upper: f64, lower: f64) -> Self {
        Self::Band {
            time: time.into(),
            upper,
            lower,
        }
    }

    pub fn time(&self) -> Timestamp {
        match self {
            Self::Band { time, .. } | Self::Value { time, .. } => *time,
        }
    }

    /// A field the point does not carry reads as `NaN` (a gap).
    pub fn field(&self, field: ValueField) -> f64 {
        match (self, field) {
            (Self::Value { value, .. }, ValueField::Value) => *value,
            (Self::Band { upper, .. }, ValueField::Upper) => *upper,
            (Self::Band { lower, .. }, ValueField::Lower) => *lower,
            _ => f64::NAN,
        }
    }
}

/// One pre-computed indicator, sized independently of the bars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(rename = "data", default)]
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn new(points: Vec<IndicatorPoint>) -> Self {
        Self {
            period: None,
            points,
        }
    }

    pub fn with_period(mut self, period: u32) -> Self {
        self.period = Some(period);
        self
    }
}

/// Requested indicators keyed by their raw kind name.
///
/// Keys are kept as strings so that kinds this crate cannot draw still reach
/// the catalog and are rejected there, one series at a time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSet(BTreeMap<String, Option<IndicatorSeries>>);

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: impl Into<String>, series: IndicatorSeries) -> Self {
        self.insert(kind, Some(series));
        self
    }

    pub fn insert(&mut self, kind: impl Into<String>, series: Option<IndicatorSeries>) {
        self.0.insert(kind.into(), series);
    }

    pub fn remove(&mut self, kind: &str) -> Option<IndicatorSeries> {
        self.0.remove(kind).flatten()
    }

    pub fn get(&self, kind: &str) -> Option<&IndicatorSeries> {
        self.0.get(kind).and_then(Option::as_ref)
    }

    /// Entries that carry a series; `null` entries are skipped.
    pub fn requested(&self) -> impl Iterator<Item = (&str, &IndicatorSeries)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|s| (k.as_str(), s)))
    }

    pub(crate) fn series_mut(&mut self) -> impl Iterator<Item = (&str, &mut IndicatorSeries)> {
        self.0
            .iter_mut()
            .filter_map(|(k, v)| v.as_mut().map(|s| (k.as_str(), s)))
    }

    pub fn is_empty(&self) -> bool {
        self.requested().next().is_none()
    }
}
