use lotto_types::{BiasInput, Candidate};

use crate::weights::WeightTable;

/// Weighted sum of candidate confidences, plus `intensity * boost` when a
/// bias is present, clamped to `[0, ceiling]`.
pub fn aggregate_confidence(
    candidates: &[&Candidate],
    weights: &WeightTable,
    bias: Option<&BiasInput>,
    boost: f64,
    ceiling: f64,
) -> f64 {
    let weighted: f64 = candidates
        .iter()
        .map(|c| c.confidence * weights.get(&c.source_id))
        .sum();
    let boosted = match bias {
        Some(b) => weighted + b.intensity * boost,
        None => weighted,
    };
    boosted.clamp(0.0, ceiling)
}
