//! Ensemble combiner for Lotto Oracle.
//!
//! Several producers each propose a full pick with a confidence score. The
//! combiner merges them into one pick by weighted voting: every producer
//! votes for its numbers with its weight, the highest-voted numbers win
//! (ties go to the lower number), and any shortfall is filled at random
//! from the caller's random source. An optional bias input reshapes the
//! weights and adds a bounded confidence boost.
//!
//! # Quick Start
//!
//! ```rust
//! use lotto_ensemble::{EnsembleCombiner, EnsembleConfig};
//! use lotto_types::Candidate;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let combiner = EnsembleCombiner::new(EnsembleConfig::default()).unwrap();
//! let candidates = vec![
//!     Candidate::new("lstm", vec![3, 8, 15, 22, 31], vec![4, 9], 0.78),
//!     Candidate::new("transformer", vec![3, 8, 17, 22, 30], vec![4, 11], 0.82),
//!     Candidate::new("xgboost", vec![1, 8, 15, 22, 35], vec![2, 9], 0.66),
//! ];
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = combiner.combine(&candidates, None, &mut rng).unwrap();
//! assert_eq!(result.primary_numbers.len(), 5);
//! assert!(result.confidence <= 0.95);
//! ```

pub mod combiner;
pub mod confidence;
pub mod config;
pub mod error;
pub mod fill;
pub mod vote;
pub mod weights;

// Re-exports for convenience.
pub use combiner::{CombinedResult, EnsembleCombiner, RejectedCandidate};
pub use confidence::aggregate_confidence;
pub use config::{EnsembleConfig, DEFAULT_BIAS_BOOST, DEFAULT_CONFIDENCE_CEILING, DEFAULT_WEIGHTS};
pub use error::{EnsembleError, EnsembleResult};
pub use fill::{fill_gaps, select_numbers};
pub use vote::{tally_votes, VoteTally};
pub use weights::{adjust_weights, BiasSensitivity, WeightTable};
