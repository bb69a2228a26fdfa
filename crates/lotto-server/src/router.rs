use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all API endpoints.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(handler::health_handler))
        .route("/api/predict", post(handler::predict_handler))
        .route("/api/perturbation", get(handler::perturbation_handler))
        .route("/api/spiritual", get(handler::spiritual_handler))
        .route(
            "/api/latest-results",
            get(handler::latest_results_handler).post(handler::report_handler),
        )
        .route("/api/data-analysis", get(handler::data_analysis_handler))
        .route("/api/report", post(handler::report_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
