//! Foundation types for Lotto Oracle.
//!
//! This crate provides the value types shared by every other crate in the
//! workspace: who proposed a pick, what was proposed, how the draw game is
//! shaped, and the optional perturbation signal that nudges the ensemble.
//!
//! # Key Types
//!
//! - [`SourceId`] - Label of a candidate producer (e.g. `lstm`)
//! - [`Zone`] - Primary or secondary number zone of the draw
//! - [`GameConfig`] - Pick counts and number ranges for both zones
//! - [`Candidate`] - One producer's proposed numbers plus its confidence
//! - [`BiasInput`] - Optional perturbation applied to weights and confidence

pub mod bias;
pub mod candidate;
pub mod error;
pub mod game;
pub mod source;

pub use bias::BiasInput;
pub use candidate::Candidate;
pub use error::TypeError;
pub use game::{GameConfig, Zone};
pub use source::SourceId;
