use super::indicators::IndicatorKind;
use super::plot_configs::StyleOverride;
use crate::theme::ChartTheme;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Vertical layout of the price, volume and oscillator bands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Fraction of the height given to each oscillator band.
    pub oscillator_band: f32,
    /// Upper bound on the share of height all oscillators may take together.
    pub max_oscillator_share: f32,
    /// Fraction of the height given to the volume histogram.
    pub volume_band: f32,
    pub top_margin: f32,
    /// Gap left between stacked bands.
    pub band_gap: f32,
    /// Extra bars of padding added on each side by `fit_content`.
    pub fit_padding_bars: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            oscillator_band: 0.2,
            max_oscillator_share: 0.5,
            volume_band: 0.15,
            top_margin: 0.05,
            band_gap: 0.02,
            fit_padding_bars: 0.5,
        }
    }
}

impl LayoutOptions {
    /// Clamps every fraction so the stacked bands always fit the height.
    pub fn validated(&self) -> Self {
        Self {
            oscillator_band: self.oscillator_band.clamp(0.05, 0.4),
            max_oscillator_share: self.max_oscillator_share.clamp(0.1, 0.5),
            volume_band: self.volume_band.clamp(0.0, 0.2),
            top_margin: self.top_margin.clamp(0.0, 0.1),
            band_gap: self.band_gap.clamp(0.0, 0.03),
            fit_padding_bars: self.fit_padding_bars.clamp(0.0, 50.0),
        }
    }
}

/// Everything a host may tune without touching data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub theme: ChartTheme,
    pub layout: LayoutOptions,
    /// Keyed by indicator kind name (`ma`, `rsi`, ...).
    pub indicator_styles: BTreeMap<String, StyleOverride>,
}

impl ChartOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid chart options")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading chart options from {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn style_override(&self, kind: IndicatorKind) -> Option<&StyleOverride> {
        self.indicator_styles.get(kind.as_str())
    }
}
