use std::sync::Arc;

use lotto_ensemble::{EnsembleCombiner, EnsembleError};
use lotto_models::{default_sources, CandidateSource, DrawSimulator};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub combiner: Arc<EnsembleCombiner>,
    pub sources: Arc<[Box<dyn CandidateSource>]>,
    pub draws: DrawSimulator,
}

impl AppState {
    /// Validate the ensemble configuration and build the stock sources.
    ///
    /// Every stock source needs a configured weight, and at least one of
    /// those weights must be positive.
    pub fn new(config: &ServerConfig) -> ServerResult<Self> {
        let combiner = EnsembleCombiner::new(config.ensemble.clone())?;
        let sources: Arc<[Box<dyn CandidateSource>]> = default_sources().into();
        check_source_weights(&combiner, &sources)?;
        Ok(Self {
            draws: DrawSimulator::new(config.ensemble.game),
            combiner: Arc::new(combiner),
            sources,
        })
    }
}

fn check_source_weights(
    combiner: &EnsembleCombiner,
    sources: &[Box<dyn CandidateSource>],
) -> Result<(), EnsembleError> {
    let weights = combiner.base_weights();
    let missing: Vec<String> = sources
        .iter()
        .map(|s| s.id())
        .filter(|id| !weights.contains(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EnsembleError::Configuration(format!(
            "no weight configured for source(s): {}",
            missing.join(", ")
        )));
    }
    let total: f64 = sources.iter().map(|s| weights.get(&s.id())).sum();
    if total <= 0.0 {
        return Err(EnsembleError::Configuration(
            "every model source has zero weight".into(),
        ));
    }
    Ok(())
}

/// A request-local random source: seeded when the caller asks for
/// reproducibility, from OS entropy otherwise.
pub fn request_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use axum::http::StatusCode;
    use lotto_types::GameConfig;
    use rand::Rng;

    #[test]
    fn default_state_builds() {
        let state = AppState::new(&ServerConfig::default()).unwrap();
        assert_eq!(state.sources.len(), 3);
        assert_eq!(state.combiner.base_weights().len(), 3);
    }

    #[test]
    fn invalid_game_fails_fast() {
        let mut config = ServerConfig::default();
        config.ensemble.game = GameConfig {
            primary_count: 40,
            ..GameConfig::super_lotto()
        };
        let err = AppState::new(&config).err().unwrap();
        assert!(matches!(
            err,
            ServerError::Ensemble(EnsembleError::Configuration(_))
        ));
    }

    #[test]
    fn unknown_weight_keys_fail_fast() {
        let mut config = ServerConfig::default();
        config.ensemble = config.ensemble.with_weights([("alpha", 1.0)]);
        let err = AppState::new(&config).err().unwrap();
        assert!(matches!(
            err,
            ServerError::Ensemble(EnsembleError::Configuration(_))
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("lstm"));
    }

    #[test]
    fn missing_source_weight_is_named() {
        let mut config = ServerConfig::default();
        config.ensemble = config
            .ensemble
            .with_weights([("lstm", 0.5), ("transformer", 0.5)]);
        let err = AppState::new(&config).err().unwrap();
        let message = err.to_string();
        assert!(message.contains("xgboost"), "{message}");
        assert!(!message.contains("lstm"), "{message}");
    }

    #[test]
    fn all_model_weights_zero_fail_fast() {
        let mut config = ServerConfig::default();
        config.ensemble = config.ensemble.with_weights([
            ("lstm", 0.0),
            ("transformer", 0.0),
            ("xgboost", 0.0),
            ("alpha", 1.0),
        ]);
        assert!(AppState::new(&config).is_err());
    }

    #[test]
    fn seeded_rng_repeats() {
        let a: u64 = request_rng(Some(5)).gen();
        let b: u64 = request_rng(Some(5)).gen();
        assert_eq!(a, b);
    }
}
