use super::bar::{Bar, Timestamp};
use super::indicators::IndicatorSet;
use super::signals::Signal;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The single unit of chart configuration. Any change rebuilds the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub bars: Vec<Bar>,
    #[serde(default)]
    pub indicators: IndicatorSet,
    #[serde(default)]
    pub signals: Vec<Signal>,
    pub height: u32,
}

impl ChartConfig {
    pub fn new(bars: Vec<Bar>, indicators: IndicatorSet, signals: Vec<Signal>, height: u32) -> Self {
        Self {
            bars,
            indicators,
            signals,
            height,
        }
        .normalized()
    }

    /// Config with no bars; sessions stay `Empty` on it.
    pub fn empty(height: u32) -> Self {
        Self::new(vec![], IndicatorSet::default(), vec![], height)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid chart config")?;
        Ok(config.normalized())
    }

    /// Sorts bars and indicator points by time, keeping the last record of
    /// any repeated time. The renderer requires strictly increasing times.
    pub fn normalized(mut self) -> Self {
        let dropped = sort_dedup_by_time(&mut self.bars, |b| b.time);
        if dropped > 0 {
            warn!(dropped, "duplicate bar times collapsed");
        }
        for (kind, series) in self.indicators.series_mut() {
            let dropped = sort_dedup_by_time(&mut series.points, |p| p.time());
            if dropped > 0 {
                warn!(kind, dropped, "duplicate indicator times collapsed");
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Volume presence is decided once per config, from the first bar.
    pub fn has_volume(&self) -> bool {
        self.bars.first().is_some_and(|b| b.volume.is_some())
    }
}

/// Stable sort by time, then collapse equal times to their last occurrence.
/// Returns how many records were dropped.
pub(crate) fn sort_dedup_by_time<T>(items: &mut Vec<T>, time: impl Fn(&T) -> Timestamp) -> usize {
    let before = items.len();
    if !items.windows(2).all(|w| time(&w[0]) < time(&w[1])) {
        items.sort_by_key(|item| time(item));
        let mut kept: Vec<T> = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            match kept.last_mut() {
                Some(last) if time(last) == time(&item) => *last = item,
                _ => kept.push(item),
            }
        }
        *items = kept;
    }
    before - items.len()
}
