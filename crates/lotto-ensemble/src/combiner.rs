use lotto_types::{BiasInput, Candidate, SourceId, Zone};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EnsembleConfig;
use crate::confidence::aggregate_confidence;
use crate::error::{EnsembleError, EnsembleResult};
use crate::fill::select_numbers;
use crate::vote::{tally_votes, VoteTally};
use crate::weights::{adjust_weights, WeightTable};

// ---------------------------------------------------------------------------
// CombinedResult
// ---------------------------------------------------------------------------

/// A candidate that was left out of the vote, and why.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    pub source_id: SourceId,
    pub reason: String,
}

/// The merged prediction plus everything needed to audit how it was made.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Sorted, exactly `primary_count` unique numbers.
    pub primary_numbers: Vec<u32>,
    /// Sorted, exactly `secondary_count` unique numbers.
    pub secondary_numbers: Vec<u32>,
    /// Combined confidence in `[0, confidence_ceiling]`.
    pub confidence: f64,
    /// The finalized weights the vote ran with.
    pub weights_used: WeightTable,
    pub primary_tally: VoteTally,
    pub secondary_tally: VoteTally,
    /// Primary numbers that came from gap filling rather than votes.
    pub filled_primary: Vec<u32>,
    /// Secondary numbers that came from gap filling rather than votes.
    pub filled_secondary: Vec<u32>,
    pub rejected: Vec<RejectedCandidate>,
}

// ---------------------------------------------------------------------------
// EnsembleCombiner
// ---------------------------------------------------------------------------

/// Merges independently produced candidates into one pick.
///
/// Holds only validated, immutable configuration, so one instance can be
/// shared across threads. Every call brings its own random source, which is
/// consulted only when the vote proposes too few distinct numbers.
#[derive(Clone, Debug)]
pub struct EnsembleCombiner {
    config: EnsembleConfig,
    base_weights: WeightTable,
}

impl EnsembleCombiner {
    /// Validate the configuration and build a combiner.
    ///
    /// Fails with [`EnsembleError::Configuration`] if the game shape, weights,
    /// or limits are inconsistent.
    pub fn new(config: EnsembleConfig) -> EnsembleResult<Self> {
        let base_weights = config.validate()?;
        Ok(Self {
            config,
            base_weights,
        })
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// The configured weights, normalized.
    pub fn base_weights(&self) -> &WeightTable {
        &self.base_weights
    }

    /// Combine candidates using the configured base weights.
    pub fn combine<R: Rng + ?Sized>(
        &self,
        candidates: &[Candidate],
        bias: Option<&BiasInput>,
        rng: &mut R,
    ) -> EnsembleResult<CombinedResult> {
        self.combine_with_weights(candidates, &self.base_weights, bias, rng)
    }

    /// Combine candidates using an explicit base weight table.
    ///
    /// Steps: screen candidates, restrict the table to the surviving
    /// sources, apply the bias, vote per zone, fill gaps, aggregate
    /// confidence.
    pub fn combine_with_weights<R: Rng + ?Sized>(
        &self,
        candidates: &[Candidate],
        base: &WeightTable,
        bias: Option<&BiasInput>,
        rng: &mut R,
    ) -> EnsembleResult<CombinedResult> {
        let game = &self.config.game;
        game.validate().map_err(EnsembleError::configuration)?;
        if let Some(bias) = bias {
            bias.validate()
                .map_err(|e| EnsembleError::InvalidBias(e.to_string()))?;
        }

        let (valid, rejected) = self.screen(candidates, base);
        if valid.is_empty() {
            let detail = rejected
                .iter()
                .map(|r| format!("{}: {}", r.source_id, r.reason))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(EnsembleError::InvalidCandidate(if detail.is_empty() {
                "no candidates supplied".into()
            } else {
                format!("no valid candidates remain ({detail})")
            }));
        }

        let participants: Vec<SourceId> = valid.iter().map(|c| c.source_id.clone()).collect();
        let base = base.restrict_to(&participants)?;
        let weights = adjust_weights(&base, bias, &self.config.sensitivities)?;

        let primary_tally = tally_votes(&valid, &weights, Zone::Primary);
        let secondary_tally = tally_votes(&valid, &weights, Zone::Secondary);
        tracing::debug!(
            primary = primary_tally.len(),
            secondary = secondary_tally.len(),
            "tallied votes"
        );

        let (primary_numbers, filled_primary) = self.select(&primary_tally, Zone::Primary, rng)?;
        let (secondary_numbers, filled_secondary) =
            self.select(&secondary_tally, Zone::Secondary, rng)?;

        let confidence = aggregate_confidence(
            &valid,
            &weights,
            bias,
            self.config.bias_boost,
            self.config.confidence_ceiling,
        );

        Ok(CombinedResult {
            primary_numbers,
            secondary_numbers,
            confidence,
            weights_used: weights,
            primary_tally,
            secondary_tally,
            filled_primary,
            filled_secondary,
            rejected,
        })
    }

    /// Split candidates into voters and rejects.
    ///
    /// A candidate is rejected if it breaks the game invariants, names a
    /// source missing from the weight table, or repeats a source that
    /// already voted.
    fn screen<'a>(
        &self,
        candidates: &'a [Candidate],
        weights: &WeightTable,
    ) -> (Vec<&'a Candidate>, Vec<RejectedCandidate>) {
        let mut valid: Vec<&Candidate> = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for candidate in candidates {
            let reason = if let Err(e) = candidate.validate(&self.config.game) {
                Some(e.to_string())
            } else if !weights.contains(&candidate.source_id) {
                Some("source has no weight".to_string())
            } else if valid.iter().any(|v| v.source_id == candidate.source_id) {
                Some("source already voted".to_string())
            } else {
                None
            };

            match reason {
                None => valid.push(candidate),
                Some(reason) => {
                    let err = EnsembleError::candidate(&candidate.source_id, &reason);
                    tracing::warn!(error = %err, "dropping candidate");
                    rejected.push(RejectedCandidate {
                        source_id: candidate.source_id.clone(),
                        reason,
                    });
                }
            }
        }

        (valid, rejected)
    }

    fn select<R: Rng + ?Sized>(
        &self,
        tally: &VoteTally,
        zone: Zone,
        rng: &mut R,
    ) -> EnsembleResult<(Vec<u32>, Vec<u32>)> {
        let (count, max) = self.config.game.zone(zone);
        select_numbers(tally, count, max, rng)
    }
}
