use std::collections::BTreeMap;

use lotto_types::{BiasInput, SourceId};
use serde::{Deserialize, Serialize};

use crate::error::{EnsembleError, EnsembleResult};

// ---------------------------------------------------------------------------
// WeightTable
// ---------------------------------------------------------------------------

/// Per-source voting weights that always sum to 1.
///
/// The only constructor is [`WeightTable::normalized`], so every table in
/// circulation (including deserialized ones) has been renormalized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<SourceId, f64>",
    into = "BTreeMap<SourceId, f64>"
)]
pub struct WeightTable {
    weights: BTreeMap<SourceId, f64>,
}

impl WeightTable {
    /// Divide every weight by the total.
    ///
    /// Fails with [`EnsembleError::InvalidWeightState`] if any weight is
    /// negative or non-finite, or if the total is not positive.
    pub fn normalized(raw: BTreeMap<SourceId, f64>) -> EnsembleResult<Self> {
        if let Some((id, w)) = raw.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(EnsembleError::InvalidWeightState(format!(
                "weight for '{id}' is {w}"
            )));
        }
        let total: f64 = raw.values().sum();
        if !(total > 0.0) || !total.is_finite() {
            return Err(EnsembleError::InvalidWeightState(format!(
                "weights sum to {total}, cannot renormalize"
            )));
        }
        let weights = raw.into_iter().map(|(id, w)| (id, w / total)).collect();
        Ok(Self { weights })
    }

    /// Weight of a source, zero if the source is not in the table.
    pub fn get(&self, id: &SourceId) -> f64 {
        self.weights.get(id).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, id: &SourceId) -> bool {
        self.weights.contains_key(id)
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, f64)> {
        self.weights.iter().map(|(id, w)| (id, *w))
    }

    /// Keep only the listed sources and renormalize.
    ///
    /// Returns an identical copy when nothing is removed, so a table that
    /// already covers every participant is not re-divided.
    pub fn restrict_to(&self, sources: &[SourceId]) -> EnsembleResult<Self> {
        if self.weights.keys().all(|id| sources.contains(id)) {
            return Ok(self.clone());
        }
        let kept = self
            .weights
            .iter()
            .filter(|(id, _)| sources.contains(id))
            .map(|(id, w)| (id.clone(), *w))
            .collect();
        Self::normalized(kept)
    }
}

impl TryFrom<BTreeMap<SourceId, f64>> for WeightTable {
    type Error = EnsembleError;

    fn try_from(raw: BTreeMap<SourceId, f64>) -> Result<Self, Self::Error> {
        Self::normalized(raw)
    }
}

impl From<WeightTable> for BTreeMap<SourceId, f64> {
    fn from(table: WeightTable) -> Self {
        table.weights
    }
}

// ---------------------------------------------------------------------------
// Bias adjustment
// ---------------------------------------------------------------------------

/// How strongly a source's weight reacts to a bias input.
///
/// The weight multiplier is
/// `1 + bias.intensity * (intensity + chaos * bias.chaos + harmony * bias.harmony)`.
/// Negative sensitivities shrink the weight as the bias grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasSensitivity {
    pub intensity: f64,
    pub chaos: f64,
    pub harmony: f64,
}

impl BiasSensitivity {
    pub fn new(intensity: f64, chaos: f64, harmony: f64) -> Self {
        Self {
            intensity,
            chaos,
            harmony,
        }
    }

    pub fn multiplier(&self, bias: &BiasInput) -> f64 {
        let response = self.intensity + self.chaos * bias.chaos + self.harmony * bias.harmony;
        1.0 + bias.intensity * response
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.intensity.is_finite() && self.chaos.is_finite() && self.harmony.is_finite()
    }
}

/// Apply a bias to a base table and renormalize.
///
/// Without a bias, or with a zero-intensity bias, the base table is returned
/// unchanged. Sources without a configured sensitivity keep a multiplier of
/// 1. Adjusted weights are floored at zero; if nothing positive remains the
/// call fails with [`EnsembleError::InvalidWeightState`].
pub fn adjust_weights(
    base: &WeightTable,
    bias: Option<&BiasInput>,
    sensitivities: &BTreeMap<SourceId, BiasSensitivity>,
) -> EnsembleResult<WeightTable> {
    let bias = match bias {
        Some(b) if !b.is_neutral() => b,
        _ => return Ok(base.clone()),
    };

    let adjusted: BTreeMap<SourceId, f64> = base
        .iter()
        .map(|(id, w)| {
            let sensitivity = sensitivities.get(id).copied().unwrap_or_default();
            (id.clone(), (w * sensitivity.multiplier(bias)).max(0.0))
        })
        .collect();

    tracing::debug!(?adjusted, intensity = bias.intensity, "bias-adjusted weights");

    WeightTable::normalized(adjusted).map_err(|e| match e {
        EnsembleError::InvalidWeightState(msg) => {
            EnsembleError::InvalidWeightState(format!("after bias adjustment: {msg}"))
        }
        other => other,
    })
}
