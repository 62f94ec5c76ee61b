use crate::data_types::plot_configs::{color, hex_color};
use gpui::Hsla;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    #[serde(with = "hex_color")]
    pub background: Hsla,
    #[serde(with = "hex_color")]
    pub grid_line: Hsla,
    #[serde(with = "hex_color")]
    pub label: Hsla,
    #[serde(with = "hex_color")]
    pub up: Hsla,
    #[serde(with = "hex_color")]
    pub down: Hsla,
    #[serde(with = "hex_color")]
    pub volume_up: Hsla,
    #[serde(with = "hex_color")]
    pub volume_down: Hsla,
    #[serde(with = "hex_color")]
    pub macd_up: Hsla,
    #[serde(with = "hex_color")]
    pub macd_down: Hsla,
    #[serde(with = "hex_color")]
    pub buy_marker: Hsla,
    #[serde(with = "hex_color")]
    pub sell_marker: Hsla,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: color(0x131722ff),
            grid_line: color(0xffffff1a),
            label: color(0xb2b5beff),
            up: color(0x26a69aff),
            down: color(0xef5350ff),
            volume_up: color(0x26a69a80),
            volume_down: color(0xef535080),
            macd_up: color(0x26a69aff),
            macd_down: color(0xef5350ff),
            buy_marker: color(0x2196f3ff),
            sell_marker: color(0xe91e63ff),
        }
    }
}
