//! Scale Partitioner
//!
//! Assigns every active series to a vertical price scale and lays the scales
//! out as non-overlapping bands: price on top, then volume, then one band per
//! oscillator stacked upward from the bottom edge.

use crate::catalog::{recipe_for_kind, ScaleSlot};
use crate::data_types::{IndicatorKind, LayoutOptions, ScaleId, ScaleMargins};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScaleLayout {
    assignments: BTreeMap<IndicatorKind, ScaleId>,
    margins: BTreeMap<ScaleId, ScaleMargins>,
}

impl ScaleLayout {
    pub fn scale_for(&self, kind: IndicatorKind) -> Option<&ScaleId> {
        self.assignments.get(&kind)
    }

    pub fn assignments(&self) -> &BTreeMap<IndicatorKind, ScaleId> {
        &self.assignments
    }

    pub fn margins_for(&self, scale: &ScaleId) -> Option<ScaleMargins> {
        self.margins.get(scale).copied()
    }

    pub fn margins(&self) -> impl Iterator<Item = (&ScaleId, &ScaleMargins)> {
        self.margins.iter()
    }
}

/// Partitions `kinds` (duplicates ignored) into scales.
pub fn partition(
    kinds: impl IntoIterator<Item = IndicatorKind>,
    has_volume: bool,
    layout: &LayoutOptions,
) -> ScaleLayout {
    let layout = layout.validated();
    let kinds: BTreeSet<IndicatorKind> = kinds.into_iter().collect();
    let mut assignments = BTreeMap::new();
    let mut oscillators: Vec<ScaleId> = Vec::new();

    for kind in &kinds {
        let recipe = recipe_for_kind(*kind);
        match recipe.slot {
            ScaleSlot::Price => {
                assignments.insert(*kind, ScaleId::PRICE);
            }
            ScaleSlot::Oscillator => {
                let mut id = recipe.scale_id;
                // Never merge two oscillators onto one scale.
                if oscillators.contains(&id) {
                    id = ScaleId::new(format!("{}-{}", id, kind));
                }
                oscillators.push(id.clone());
                assignments.insert(*kind, id);
            }
        }
    }

    let gap = layout.band_gap;
    let band = if oscillators.is_empty() {
        0.0
    } else {
        layout
            .oscillator_band
            .min(layout.max_oscillator_share / oscillators.len() as f32)
    };
    let oscillator_total = band * oscillators.len() as f32;

    let mut margins = BTreeMap::new();
    for (i, id) in oscillators.into_iter().enumerate() {
        let bottom = band * i as f32;
        let top = 1.0 - bottom - band + gap.min(band / 2.0);
        margins.insert(id, ScaleMargins::new(top, bottom));
    }

    let volume_total = if has_volume { layout.volume_band } else { 0.0 };
    if has_volume {
        let top = 1.0 - oscillator_total - volume_total + gap.min(volume_total / 2.0);
        margins.insert(ScaleId::VOLUME, ScaleMargins::new(top, oscillator_total));
    }

    let lower = oscillator_total + volume_total;
    let price_bottom = if lower > 0.0 { lower + gap } else { 0.0 };
    margins.insert(
        ScaleId::PRICE,
        ScaleMargins::new(layout.top_margin, price_bottom),
    );

    ScaleLayout {
        assignments,
        margins,
    }
}
