use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::game::{GameConfig, Zone};
use crate::source::SourceId;

/// One producer's proposed pick.
///
/// Candidates are immutable once produced. They are validated against a
/// [`GameConfig`] by the consumer, not at construction, so a malformed
/// candidate can be reported and dropped instead of aborting a whole batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub source_id: SourceId,
    pub primary_numbers: Vec<u32>,
    pub secondary_numbers: Vec<u32>,
    /// Producer's self-reported confidence in [0, 1].
    pub confidence: f64,
}

impl Candidate {
    pub fn new(
        source_id: impl Into<SourceId>,
        primary_numbers: Vec<u32>,
        secondary_numbers: Vec<u32>,
        confidence: f64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            primary_numbers,
            secondary_numbers,
            confidence,
        }
    }

    pub fn numbers(&self, zone: Zone) -> &[u32] {
        match zone {
            Zone::Primary => &self.primary_numbers,
            Zone::Secondary => &self.secondary_numbers,
        }
    }

    /// Check size, range, uniqueness, and confidence invariants.
    pub fn validate(&self, game: &GameConfig) -> Result<(), TypeError> {
        for zone in Zone::ALL {
            game.validate_numbers(zone, self.numbers(zone))?;
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(TypeError::InvalidConfidence(self.confidence));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Candidate {
        Candidate::new("lstm", vec![3, 9, 14, 22, 31], vec![4, 11], 0.72)
    }

    #[test]
    fn valid_candidate_passes() {
        assert!(valid().validate(&GameConfig::default()).is_ok());
    }

    #[test]
    fn numbers_by_zone() {
        let c = valid();
        assert_eq!(c.numbers(Zone::Primary), &[3, 9, 14, 22, 31]);
        assert_eq!(c.numbers(Zone::Secondary), &[4, 11]);
    }

    #[test]
    fn secondary_violation_is_reported() {
        let mut c = valid();
        c.secondary_numbers = vec![4];
        let err = c.validate(&GameConfig::default()).unwrap_err();
        assert!(matches!(err, TypeError::WrongCount { zone: Zone::Secondary, .. }));
    }

    #[test]
    fn confidence_must_be_unit_interval() {
        let game = GameConfig::default();
        for bad in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            let mut c = valid();
            c.confidence = bad;
            assert!(c.validate(&game).is_err(), "confidence {bad} accepted");
        }
        let mut edge = valid();
        edge.confidence = 1.0;
        assert!(edge.validate(&game).is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let c = valid();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"source_id\":\"lstm\""));
        let parsed: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }
}
