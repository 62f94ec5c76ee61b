use super::bar::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Buy,
    Sell,
}

/// Vertical anchor of a marker relative to its bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
}

/// A discrete trade event pinned to a bar time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub time: Timestamp,
    pub action: SignalAction,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<MarkerPosition>,
}

impl Signal {
    pub fn new(time: impl Into<Timestamp>, action: SignalAction, description: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            action,
            description: description.into(),
            position: None,
        }
    }

    pub fn buy(time: impl Into<Timestamp>, description: impl Into<String>) -> Self {
        Self::new(time, SignalAction::Buy, description)
    }

    pub fn sell(time: impl Into<Timestamp>, description: impl Into<String>) -> Self {
        Self::new(time, SignalAction::Sell, description)
    }

    pub fn with_position(mut self, position: MarkerPosition) -> Self {
        self.position = Some(position);
        self
    }
}
