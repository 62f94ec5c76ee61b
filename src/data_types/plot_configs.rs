use gpui::Hsla;
use serde::{Deserialize, Serialize};

/// `#rrggbb` / `#rrggbbaa` <-> `Hsla` for option files.
pub mod hex_color {
    use gpui::{Hsla, Rgba};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse_hex_str(hex: &str) -> Option<Hsla> {
        let digits = hex.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16).ok()?;
        let rgba = match digits.len() {
            6 => (value << 8) | 0xff,
            8 => value,
            _ => return None,
        };
        Some(Hsla::from(gpui::rgba(rgba)))
    }

    pub fn to_hex_string(color: &Hsla) -> String {
        let Rgba { r, g, b, a } = Rgba::from(*color);
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b), byte(a))
    }

    pub fn serialize<S>(color: &Hsla, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_string(color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Hsla, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_hex_str(&text).ok_or_else(|| de::Error::custom(format!("invalid color `{text}`")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(color: &Option<Hsla>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match color {
                Some(c) => serializer.serialize_some(&to_hex_string(c)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Hsla>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(text) => parse_hex_str(&text)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid color `{text}`"))),
                None => Ok(None),
            }
        }
    }
}

pub(crate) fn color(rgba: u32) -> Hsla {
    Hsla::from(gpui::rgba(rgba))
}

/// How a series is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Candlestick,
    Line,
    Histogram,
    Area,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinePlotConfig {
    pub color: Hsla,
    pub line_width: f32,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            color: color(0x2962ffff),
            line_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandlestickConfig {
    pub up_wick_color: Hsla,
    pub down_wick_color: Hsla,
    pub up_body_color: Hsla,
    pub down_body_color: Hsla,
    pub body_width_pct: f32,
    pub wick_width_px: f32,
}

impl Default for CandlestickConfig {
    fn default() -> Self {
        let green = color(0x26a69aff);
        let red = color(0xef5350ff);
        Self {
            up_wick_color: green,
            down_wick_color: red,
            up_body_color: green,
            down_body_color: red,
            body_width_pct: 0.8,
            wick_width_px: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaPlotConfig {
    pub line_color: Hsla,
    pub fill_color: Hsla,
    pub line_width: f32,
}

impl Default for AreaPlotConfig {
    fn default() -> Self {
        Self {
            line_color: color(0x2962ffff),
            fill_color: color(0x2962ff4d),
            line_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistogramConfig {
    /// Fallback for points that carry no colour of their own.
    pub color: Hsla,
    /// 0.0 to 1.0 relative to bar spacing
    pub bar_width_pct: f32,
    pub base: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            color: color(0x26a69aff),
            bar_width_pct: 0.8,
            base: 0.0,
        }
    }
}

/// Styling of one series; the variant decides the render kind.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesStyle {
    Candlestick(CandlestickConfig),
    Line(LinePlotConfig),
    Histogram(HistogramConfig),
    Area(AreaPlotConfig),
}

impl SeriesStyle {
    pub fn render_kind(&self) -> RenderKind {
        match self {
            Self::Candlestick(_) => RenderKind::Candlestick,
            Self::Line(_) => RenderKind::Line,
            Self::Histogram(_) => RenderKind::Histogram,
            Self::Area(_) => RenderKind::Area,
        }
    }

    /// Main colour of the style, used when re-shaping into another kind.
    pub fn primary_color(&self) -> Hsla {
        match self {
            Self::Candlestick(c) => c.up_body_color,
            Self::Line(c) => c.color,
            Self::Histogram(c) => c.color,
            Self::Area(c) => c.line_color,
        }
    }

    fn line_width(&self) -> f32 {
        match self {
            Self::Line(c) => c.line_width,
            Self::Area(c) => c.line_width,
            _ => LinePlotConfig::default().line_width,
        }
    }

    /// Default style of `kind` painted in `color`.
    pub fn for_kind(kind: RenderKind, color: Hsla, line_width: f32) -> Self {
        match kind {
            RenderKind::Candlestick => Self::Candlestick(CandlestickConfig::default()),
            RenderKind::Line => Self::Line(LinePlotConfig { color, line_width }),
            RenderKind::Histogram => Self::Histogram(HistogramConfig {
                color,
                ..HistogramConfig::default()
            }),
            RenderKind::Area => Self::Area(AreaPlotConfig {
                line_color: color,
                fill_color: color.opacity(0.3),
                line_width,
            }),
        }
    }

    /// Layers user overrides on top of this style.
    pub fn apply(&self, overrides: &StyleOverride) -> Self {
        let kind = overrides.render.unwrap_or(self.render_kind());
        if kind == RenderKind::Candlestick {
            return self.clone();
        }
        let color = overrides.color.unwrap_or(self.primary_color());
        let line_width = overrides.line_width.unwrap_or(self.line_width());
        match (self, kind) {
            (Self::Histogram(h), RenderKind::Histogram) => Self::Histogram(HistogramConfig {
                color,
                ..h.clone()
            }),
            _ => Self::for_kind(kind, color, line_width),
        }
    }
}

/// Per-indicator style override read from chart options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default, with = "hex_color::option", skip_serializing_if = "Option::is_none")]
    pub color: Option<Hsla>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderKind>,
}
