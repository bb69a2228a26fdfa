//! Synthetic producers for Lotto Oracle.
//!
//! Nothing here is predictive. The mock models, perturbation readings and
//! draws exist so the ensemble combiner has realistic input and the
//! server has something to show.
//!
//! # Key Types
//!
//! - [`CandidateSource`] - anything that proposes a candidate pick
//! - [`MockModel`] - uniform random candidates for one [`ModelKind`]
//! - [`Perturbation`] - a reading convertible into a `BiasInput`
//! - [`DrawSimulator`] - a plausible recent draw with prize tiers
//! - [`DataAnalysis`] - hot, cold and frequency statistics over a simulated history
//! - [`render_markdown`] - the analysis report

pub mod analysis;
pub mod draw;
pub mod perturbation;
pub mod report;
pub mod source;

pub use analysis::{DataAnalysis, ZoneStats};
pub use draw::{format_pick, pad_numbers, DrawSimulator, LatestDraw, PrizeTier};
pub use perturbation::{EnergyLevel, Perturbation};
pub use report::render_markdown;
pub use source::{default_sources, generate_all, CandidateSource, MockModel, ModelKind};
