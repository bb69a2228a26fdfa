use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// External perturbation that nudges ensemble weights and confidence.
///
/// The components carry no meaning beyond their effect on the combiner.
/// `chaos` and `harmony` are the two secondary signals; they are also
/// accepted under the generic names `secondary_signal_a` and
/// `secondary_signal_b`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasInput {
    pub intensity: f64,
    #[serde(alias = "secondary_signal_a")]
    pub chaos: f64,
    #[serde(alias = "secondary_signal_b")]
    pub harmony: f64,
}

impl BiasInput {
    pub fn new(intensity: f64, chaos: f64, harmony: f64) -> Self {
        Self {
            intensity,
            chaos,
            harmony,
        }
    }

    /// A bias with zero intensity has no effect on the combiner.
    pub fn is_neutral(&self) -> bool {
        self.intensity == 0.0
    }

    /// Every component must be finite and within [0, 1].
    pub fn validate(&self) -> Result<(), TypeError> {
        for (field, value) in [
            ("intensity", self.intensity),
            ("chaos", self.chaos),
            ("harmony", self.harmony),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TypeError::InvalidBias { field, value });
            }
        }
        Ok(())
    }
}
