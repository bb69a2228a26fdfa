use std::fmt;
use std::ops::RangeInclusive;

use lotto_types::{Candidate, GameConfig, SourceId, Zone};
use rand::seq::index;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Anything that can propose a candidate pick.
///
/// The trait is object-safe and `Send + Sync` so sources can be stored in a
/// `Vec<Box<dyn CandidateSource>>` and shared across request handlers.
pub trait CandidateSource: Send + Sync {
    /// Label the combiner weighs this source by.
    fn id(&self) -> SourceId;

    /// Produce a candidate that satisfies `game`.
    fn generate(&self, game: &GameConfig, rng: &mut dyn RngCore) -> Candidate;
}

/// The synthetic model families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Lstm,
    Transformer,
    Xgboost,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Lstm, ModelKind::Transformer, ModelKind::Xgboost];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Lstm => "lstm",
            Self::Transformer => "transformer",
            Self::Xgboost => "xgboost",
        }
    }

    /// Range the reported confidence is drawn from.
    pub fn confidence_range(&self) -> RangeInclusive<f64> {
        match self {
            Self::Lstm => 0.60..=0.90,
            Self::Transformer => 0.65..=0.92,
            Self::Xgboost => 0.55..=0.85,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lstm => write!(f, "LSTM"),
            Self::Transformer => write!(f, "Transformer"),
            Self::Xgboost => write!(f, "XGBoost"),
        }
    }
}

/// A model that proposes uniformly random picks.
#[derive(Clone, Copy, Debug)]
pub struct MockModel {
    kind: ModelKind,
}

impl MockModel {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }
}

impl CandidateSource for MockModel {
    fn id(&self) -> SourceId {
        SourceId::from(self.kind.id())
    }

    fn generate(&self, game: &GameConfig, rng: &mut dyn RngCore) -> Candidate {
        let primary = draw_zone(game, Zone::Primary, rng);
        let secondary = draw_zone(game, Zone::Secondary, rng);
        let confidence = round3(rng.gen_range(self.kind.confidence_range()));
        Candidate::new(self.id(), primary, secondary, confidence)
    }
}

/// One mock model per family, in weight-table order.
pub fn default_sources() -> Vec<Box<dyn CandidateSource>> {
    ModelKind::ALL
        .into_iter()
        .map(|kind| Box::new(MockModel::new(kind)) as Box<dyn CandidateSource>)
        .collect()
}

/// Ask every source for a candidate, sharing one random source.
pub fn generate_all(
    sources: &[Box<dyn CandidateSource>],
    game: &GameConfig,
    rng: &mut dyn RngCore,
) -> Vec<Candidate> {
    sources.iter().map(|s| s.generate(game, rng)).collect()
}

/// Sorted unique numbers filling one zone of `game`.
pub fn draw_zone<R: Rng + ?Sized>(game: &GameConfig, zone: Zone, rng: &mut R) -> Vec<u32> {
    let (count, max) = game.zone(zone);
    let mut numbers: Vec<u32> = index::sample(rng, max as usize, count)
        .into_iter()
        .map(|i| i as u32 + 1)
        .collect();
    numbers.sort_unstable();
    numbers
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_ensemble::DEFAULT_WEIGHTS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_candidates_are_valid() {
        let game = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            for source in default_sources() {
                let c = source.generate(&game, &mut rng);
                assert!(c.validate(&game).is_ok(), "{c:?}");
                assert!(c.primary_numbers.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn confidence_within_family_range() {
        let game = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        for kind in ModelKind::ALL {
            let model = MockModel::new(kind);
            for _ in 0..20 {
                let c = model.generate(&game, &mut rng);
                assert!(kind.confidence_range().contains(&c.confidence));
                assert_eq!(c.confidence, round3(c.confidence));
            }
        }
    }

    #[test]
    fn source_ids_match_default_weights() {
        let ids: Vec<String> = default_sources().iter().map(|s| s.id().to_string()).collect();
        let weighted: Vec<&str> = DEFAULT_WEIGHTS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, weighted);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let game = GameConfig::default();
        let sources = default_sources();
        let a = generate_all(&sources, &game, &mut StdRng::seed_from_u64(8));
        let b = generate_all(&sources, &game, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn draw_zone_handles_full_range() {
        let game = GameConfig {
            secondary_count: 12,
            ..GameConfig::default()
        };
        let numbers = draw_zone(&game, Zone::Secondary, &mut StdRng::seed_from_u64(0));
        assert_eq!(numbers, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn display_names() {
        assert_eq!(ModelKind::Xgboost.to_string(), "XGBoost");
        assert_eq!(ModelKind::Lstm.id(), "lstm");
    }
}
