use std::fmt;

use lotto_types::BiasInput;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::source::round3;

// ----- Fixed tables -----

const IMAGES: [(&str, &str); 5] = [
    ("lotus_meditation.jpg", "Lotus meditation, purity and awakening"),
    ("mountain_zen.jpg", "Mountain zen, stability and height"),
    ("ocean_waves.jpg", "Ocean waves, flow and change"),
    ("forest_tranquility.jpg", "Forest tranquility, nature and harmony"),
    ("sunset_chakra.jpg", "Sunset chakra, energy and balance"),
];

const MANTRAS: [&str; 3] = [
    "May wisdom light the road ahead",
    "A still heart stays cool",
    "Follow what comes, stay unchanged",
];

// ----- Types -----

/// Coarse label attached to a reading. Carries no weight in the combiner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 5] = [
        EnergyLevel::VeryHigh,
        EnergyLevel::High,
        EnergyLevel::Medium,
        EnergyLevel::Low,
        EnergyLevel::VeryLow,
    ];
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::VeryHigh => "very high",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very low",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeditationImage {
    pub filename: String,
    pub description: String,
}

/// Percent readings shown next to a perturbation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub cosmic: u8,
    pub earth: u8,
    pub personal: u8,
}

/// A synthetic perturbation reading.
///
/// `chaos_factor`, `harmony_factor` and `overall_intensity` feed the
/// combiner through [`Perturbation::bias`]; everything else is decoration
/// for the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Perturbation {
    pub image: MeditationImage,
    pub chaos_factor: f64,
    pub harmony_factor: f64,
    pub cosmic_alignment: f64,
    pub energy_level: EnergyLevel,
    pub overall_intensity: f64,
    pub meditation_minutes: u32,
    pub mantra: String,
    pub energy_reading: EnergyReading,
}

impl Perturbation {
    /// Draw a fresh reading from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (filename, description) = IMAGES[rng.gen_range(0..IMAGES.len())];
        let chaos_factor = round3(rng.gen_range(0.1..=0.9));
        let harmony_factor = round3(rng.gen_range(0.1..=0.9));
        let energy_level = EnergyLevel::ALL[rng.gen_range(0..EnergyLevel::ALL.len())];
        let cosmic_alignment = round3(rng.gen_range(0.0..=1.0));
        let meditation_minutes = rng.gen_range(5..=30);
        let mantra = MANTRAS[rng.gen_range(0..MANTRAS.len())];
        let energy_reading = EnergyReading {
            cosmic: rng.gen_range(60..=95),
            earth: rng.gen_range(50..=90),
            personal: rng.gen_range(70..=100),
        };

        let perturbation = Self {
            image: MeditationImage {
                filename: filename.to_string(),
                description: description.to_string(),
            },
            chaos_factor,
            harmony_factor,
            cosmic_alignment,
            energy_level,
            overall_intensity: overall_intensity(chaos_factor, harmony_factor, cosmic_alignment),
            meditation_minutes,
            mantra: mantra.to_string(),
            energy_reading,
        };
        tracing::debug!(
            intensity = perturbation.overall_intensity,
            chaos = chaos_factor,
            harmony = harmony_factor,
            "generated perturbation"
        );
        perturbation
    }

    /// The reading as combiner input.
    pub fn bias(&self) -> BiasInput {
        BiasInput::new(self.overall_intensity, self.chaos_factor, self.harmony_factor)
    }
}

/// `0.3 * chaos + 0.3 * harmony + 0.4 * cosmic`, rounded to 3 decimals.
pub fn overall_intensity(chaos: f64, harmony: f64, cosmic: f64) -> f64 {
    round3(0.3 * chaos + 0.3 * harmony + 0.4 * cosmic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn factors_within_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let p = Perturbation::generate(&mut rng);
            assert!((0.1..=0.9).contains(&p.chaos_factor));
            assert!((0.1..=0.9).contains(&p.harmony_factor));
            assert!((0.0..=1.0).contains(&p.cosmic_alignment));
            assert!((5..=30).contains(&p.meditation_minutes));
            assert!((60..=95).contains(&p.energy_reading.cosmic));
            assert!(IMAGES.iter().any(|(f, _)| *f == p.image.filename));
            assert!(MANTRAS.contains(&p.mantra.as_str()));
        }
    }

    #[test]
    fn intensity_formula() {
        assert_eq!(overall_intensity(0.5, 0.5, 0.5), 0.5);
        assert_eq!(overall_intensity(0.9, 0.9, 1.0), 0.94);
        assert_eq!(overall_intensity(0.1, 0.1, 0.0), 0.06);
    }

    #[test]
    fn bias_is_always_valid() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let p = Perturbation::generate(&mut rng);
            let bias = p.bias();
            assert!(bias.validate().is_ok(), "{bias:?}");
            assert_eq!(bias.intensity, p.overall_intensity);
            assert_eq!(bias.chaos, p.chaos_factor);
            assert_eq!(bias.harmony, p.harmony_factor);
        }
    }

    #[test]
    fn seeded_reading_is_reproducible() {
        let a = Perturbation::generate(&mut StdRng::seed_from_u64(12));
        let b = Perturbation::generate(&mut StdRng::seed_from_u64(12));
        assert_eq!(a, b);
    }

    #[test]
    fn energy_level_serializes_snake_case() {
        let json = serde_json::to_string(&EnergyLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
        assert_eq!(EnergyLevel::VeryLow.to_string(), "very low");
    }
}
