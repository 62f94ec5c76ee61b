//! Series Catalog
//!
//! Pure mapping from an indicator kind to the recipe used to draw it: the
//! render kind, the default price scale, default styling and the point
//! fields each drawn series extracts.

use crate::data_types::plot_configs::color;
use crate::data_types::{
    HistogramConfig, IndicatorKind, LinePlotConfig, RenderKind, ScaleId, SeriesStyle,
    StyleOverride, ValueField,
};
use crate::errors::ChartResult;

/// Which group of scales a recipe belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleSlot {
    /// Shares the candlestick price scale.
    Price,
    /// Needs a dedicated scale in the lower band.
    Oscillator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesRecipe {
    pub kind: IndicatorKind,
    pub scale_id: ScaleId,
    pub slot: ScaleSlot,
    pub style: SeriesStyle,
    /// One drawn series per field.
    pub fields: &'static [ValueField],
}

impl SeriesRecipe {
    pub fn render_kind(&self) -> RenderKind {
        self.style.render_kind()
    }

    pub fn with_override(mut self, overrides: Option<&StyleOverride>) -> Self {
        if let Some(o) = overrides {
            self.style = self.style.apply(o);
        }
        self
    }

    pub fn title(&self, field: ValueField, period: Option<u32>) -> String {
        match (self.kind, field) {
            (IndicatorKind::Ma, _) => match period {
                Some(p) => format!("MA{p}"),
                None => "MA".to_string(),
            },
            (IndicatorKind::Rsi, _) => "RSI".to_string(),
            (IndicatorKind::Macd, _) => "MACD".to_string(),
            (IndicatorKind::Bollinger, ValueField::Upper) => "BB Upper".to_string(),
            (IndicatorKind::Bollinger, ValueField::Lower) => "BB Lower".to_string(),
            (IndicatorKind::Bollinger, ValueField::Value) => "BB".to_string(),
        }
    }
}

/// Recipe for a raw kind name. Unknown names are an error, never skipped.
pub fn recipe_for(kind: &str) -> ChartResult<SeriesRecipe> {
    Ok(recipe_for_kind(kind.parse()?))
}

pub fn recipe_for_kind(kind: IndicatorKind) -> SeriesRecipe {
    match kind {
        IndicatorKind::Ma => SeriesRecipe {
            kind,
            scale_id: ScaleId::PRICE,
            slot: ScaleSlot::Price,
            style: SeriesStyle::Line(LinePlotConfig {
                color: color(0x2962ffff),
                line_width: 2.0,
            }),
            fields: &[ValueField::Value],
        },
        IndicatorKind::Rsi => SeriesRecipe {
            kind,
            scale_id: ScaleId::RSI,
            slot: ScaleSlot::Oscillator,
            style: SeriesStyle::Line(LinePlotConfig {
                color: color(0x9c27b0ff),
                line_width: 2.0,
            }),
            fields: &[ValueField::Value],
        },
        IndicatorKind::Macd => SeriesRecipe {
            kind,
            scale_id: ScaleId::MACD,
            slot: ScaleSlot::Oscillator,
            style: SeriesStyle::Histogram(HistogramConfig::default()),
            fields: &[ValueField::Value],
        },
        IndicatorKind::Bollinger => SeriesRecipe {
            kind,
            scale_id: ScaleId::PRICE,
            slot: ScaleSlot::Price,
            style: SeriesStyle::Line(LinePlotConfig {
                color: color(0xff9800ff),
                line_width: 1.0,
            }),
            fields: &[ValueField::Upper, ValueField::Lower],
        },
    }
}
