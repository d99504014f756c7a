//! HTTP routes for triage and patient endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_patient, get_category_ranking, get_hierarchy, get_patient, rank_patients,
    TriageAppState,
};

/// Creates the triage router with all routes.
pub fn triage_routes(state: TriageAppState) -> Router {
    Router::new()
        // POST /api/triage/rank
        .route("/api/triage/rank", post(rank_patients))
        // GET /api/triage/categories/:category/ranking
        .route(
            "/api/triage/categories/:category/ranking",
            get(get_category_ranking),
        )
        // GET /api/triage/hierarchy
        .route("/api/triage/hierarchy", get(get_hierarchy))
        // POST /api/patients
        .route("/api/patients", post(create_patient))
        // GET /api/patients/:patient_id
        .route("/api/patients/:patient_id", get(get_patient))
        .with_state(state)
}
