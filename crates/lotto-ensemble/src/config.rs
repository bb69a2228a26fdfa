use std::collections::BTreeMap;

use lotto_types::{GameConfig, SourceId};
use serde::{Deserialize, Serialize};

use crate::error::{EnsembleError, EnsembleResult};
use crate::weights::{BiasSensitivity, WeightTable};

/// Base weights of the three stock producers.
pub const DEFAULT_WEIGHTS: [(&str, f64); 3] =
    [("lstm", 0.35), ("transformer", 0.40), ("xgboost", 0.25)];

/// Highest combined confidence ever reported.
pub const DEFAULT_CONFIDENCE_CEILING: f64 = 0.95;

/// Confidence added per unit of bias intensity.
pub const DEFAULT_BIAS_BOOST: f64 = 0.1;

/// Configuration for the ensemble combiner.
///
/// Built once at startup, validated by [`EnsembleCombiner::new`], then
/// shared by reference.
///
/// [`EnsembleCombiner::new`]: crate::EnsembleCombiner::new
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Pick counts and ranges for both zones.
    pub game: GameConfig,
    /// Base weight per source. Need not sum to 1; normalized on validation.
    pub weights: BTreeMap<SourceId, f64>,
    /// Per-source reaction to a bias input. Missing sources do not react.
    pub sensitivities: BTreeMap<SourceId, BiasSensitivity>,
    /// Upper clamp for the combined confidence, strictly below 1.
    pub confidence_ceiling: f64,
    /// `k` in `boost = intensity * k`.
    pub bias_boost: f64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::super_lotto(),
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|(id, w)| (SourceId::from(*id), *w))
                .collect(),
            sensitivities: BTreeMap::from([
                (SourceId::from("lstm"), BiasSensitivity::new(0.10, 0.20, 0.0)),
                (SourceId::from("transformer"), BiasSensitivity::new(0.0, 0.0, 0.25)),
                (SourceId::from("xgboost"), BiasSensitivity::new(-0.15, 0.0, 0.0)),
            ]),
            confidence_ceiling: DEFAULT_CONFIDENCE_CEILING,
            bias_boost: DEFAULT_BIAS_BOOST,
        }
    }
}

impl EnsembleConfig {
    /// Same weights and limits, different game shape.
    pub fn with_game(game: GameConfig) -> Self {
        Self {
            game,
            ..Default::default()
        }
    }

    /// Replace the base weights.
    pub fn with_weights<I, S>(mut self, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<SourceId>,
    {
        self.weights = weights.into_iter().map(|(id, w)| (id.into(), w)).collect();
        self
    }

    /// Check every constant and return the normalized base weight table.
    pub fn validate(&self) -> EnsembleResult<WeightTable> {
        self.game.validate().map_err(EnsembleError::configuration)?;

        if !(self.confidence_ceiling > 0.0 && self.confidence_ceiling < 1.0) {
            return Err(EnsembleError::Configuration(format!(
                "confidence ceiling {} must lie in (0, 1)",
                self.confidence_ceiling
            )));
        }
        if !self.bias_boost.is_finite() || !(0.0..=1.0).contains(&self.bias_boost) {
            return Err(EnsembleError::Configuration(format!(
                "bias boost {} must lie in [0, 1]",
                self.bias_boost
            )));
        }
        if let Some((id, _)) = self.sensitivities.iter().find(|(_, s)| !s.is_finite()) {
            return Err(EnsembleError::Configuration(format!(
                "sensitivity for '{id}' is not finite"
            )));
        }
        if self.weights.is_empty() {
            return Err(EnsembleError::Configuration("no source weights configured".into()));
        }

        WeightTable::normalized(self.weights.clone())
            .map_err(|e| EnsembleError::Configuration(format!("base weights: {e}")))
    }
}
