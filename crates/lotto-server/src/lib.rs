//! HTTP server for Lotto Oracle.
//!
//! Serves ensemble predictions built from the mock models, perturbation
//! readings, a synthetic latest draw and a Markdown report. Every route
//! sits behind a permissive CORS layer; every failure leaves through
//! [`ServerError`]'s single `IntoResponse` mapping.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{PredictRequest, Prediction, ReportRequest};
pub use server::LottoServer;
pub use state::AppState;
