//! HTTP handlers for triage endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::adapters::hierarchy::{StaticHierarchyProvider, YamlHierarchyProvider};
use crate::adapters::memory::InMemoryPatientStore;
use crate::application::handlers::{
    EvaluateHierarchyHandler, GetPatientHandler, RankCategoryHandler, RankCategoryQuery,
    RankPatientsCommand, RankPatientsHandler, RegisterPatientCommand, RegisterPatientHandler,
};
use crate::config::TriageConfig;
use crate::domain::ahp::TriageEngine;
use crate::domain::foundation::{DomainError, ErrorCode, PatientId, TriageCategory};
use crate::domain::patient::PatientRecord;
use crate::ports::{HierarchyProvider, PatientReader, PatientWriter};

use super::dto::{
    ErrorResponse, HierarchyResponse, PatientCommandResponse, RankPatientsRequest, RankingQuery,
    RankingResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Triage API error that implements IntoResponse.
#[derive(Debug)]
pub enum TriageApiError {
    BadRequest(DomainError),
    NotFound(DomainError),
    /// The hierarchy could not be turned into a ranking.
    Unprocessable(DomainError),
    PayloadTooLarge(DomainError),
    Internal(DomainError),
}

impl IntoResponse for TriageApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, err) = match self {
            TriageApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err),
            TriageApiError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            TriageApiError::Unprocessable(err) => (StatusCode::UNPROCESSABLE_ENTITY, err),
            TriageApiError::PayloadTooLarge(err) => (StatusCode::PAYLOAD_TOO_LARGE, err),
            TriageApiError::Internal(err) => {
                error!(code = %err.code, message = %err.message, "Triage request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err)
            }
        };
        (status, Json(ErrorResponse::from(&err))).into_response()
    }
}

impl From<DomainError> for TriageApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidCategory => TriageApiError::BadRequest(err),
            ErrorCode::PatientNotFound => TriageApiError::NotFound(err),
            ErrorCode::InvalidConfiguration => TriageApiError::Unprocessable(err),
            ErrorCode::TooManyPatients => TriageApiError::PayloadTooLarge(err),
            ErrorCode::StorageError | ErrorCode::HierarchySourceError | ErrorCode::InternalError => {
                TriageApiError::Internal(err)
            }
        }
    }
}

fn parse_category(raw: &str) -> Result<TriageCategory, TriageApiError> {
    raw.parse::<TriageCategory>().map_err(|e| {
        TriageApiError::BadRequest(
            DomainError::new(ErrorCode::InvalidCategory, e.to_string()).with_detail("category", raw),
        )
    })
}

fn parse_patient_id(raw: String) -> Result<PatientId, TriageApiError> {
    PatientId::new(raw).map_err(|e| TriageApiError::BadRequest(e.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing triage dependencies.
#[derive(Clone)]
pub struct TriageAppState {
    pub patient_reader: Arc<dyn PatientReader>,
    pub patient_writer: Arc<dyn PatientWriter>,
    pub hierarchy_provider: Arc<dyn HierarchyProvider>,
    pub engine: TriageEngine,
    pub max_patients_per_run: usize,
}

impl TriageAppState {
    /// Wires the in-memory store and the configured hierarchy source.
    pub fn from_config(config: &TriageConfig) -> Self {
        let store = Arc::new(InMemoryPatientStore::new());
        let hierarchy_provider: Arc<dyn HierarchyProvider> = match &config.hierarchy_path {
            Some(path) => Arc::new(YamlHierarchyProvider::new(path)),
            None => Arc::new(StaticHierarchyProvider::standard()),
        };

        Self {
            patient_reader: store.clone(),
            patient_writer: store,
            hierarchy_provider,
            engine: TriageEngine::standard(),
            max_patients_per_run: config.max_patients_per_run,
        }
    }

    pub fn rank_patients_handler(&self) -> RankPatientsHandler {
        RankPatientsHandler::new(
            self.hierarchy_provider.clone(),
            self.engine.clone(),
            self.max_patients_per_run,
        )
    }

    pub fn rank_category_handler(&self) -> RankCategoryHandler {
        RankCategoryHandler::new(
            self.patient_reader.clone(),
            self.hierarchy_provider.clone(),
            self.engine.clone(),
            self.max_patients_per_run,
        )
    }

    pub fn evaluate_hierarchy_handler(&self) -> EvaluateHierarchyHandler {
        EvaluateHierarchyHandler::new(self.hierarchy_provider.clone(), self.engine.clone())
    }

    pub fn register_patient_handler(&self) -> RegisterPatientHandler {
        RegisterPatientHandler::new(self.patient_writer.clone())
    }

    pub fn get_patient_handler(&self) -> GetPatientHandler {
        GetPatientHandler::new(self.patient_reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Triage Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/triage/rank - Rank caller-supplied patients
pub async fn rank_patients(
    State(state): State<TriageAppState>,
    Json(request): Json<RankPatientsRequest>,
) -> Result<Json<RankingResponse>, TriageApiError> {
    let category = parse_category(&request.category)?;

    let cmd = RankPatientsCommand {
        category,
        patients: request.patients,
        hierarchy: request.hierarchy,
        reference_date: request.reference_date,
    };

    let ranking = state.rank_patients_handler().handle(cmd).await?;
    Ok(Json(ranking.into()))
}

/// GET /api/triage/categories/:category/ranking - Rank stored patients of a category
pub async fn get_category_ranking(
    State(state): State<TriageAppState>,
    Path(category): Path<String>,
    Query(params): Query<RankingQuery>,
) -> Result<Json<RankingResponse>, TriageApiError> {
    let query = RankCategoryQuery {
        category: parse_category(&category)?,
        reference_date: params.reference_date,
    };

    let ranking = state.rank_category_handler().handle(query).await?;
    Ok(Json(ranking.into()))
}

/// GET /api/triage/hierarchy - Weights and consistency of the configured hierarchy
pub async fn get_hierarchy(
    State(state): State<TriageAppState>,
) -> Result<Json<HierarchyResponse>, TriageApiError> {
    let evaluation = state.evaluate_hierarchy_handler().handle().await?;
    Ok(Json(evaluation.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Patient Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/patients - Store a casualty record
pub async fn create_patient(
    State(state): State<TriageAppState>,
    Json(record): Json<PatientRecord>,
) -> Result<impl IntoResponse, TriageApiError> {
    let stored = state
        .register_patient_handler()
        .handle(RegisterPatientCommand { record })
        .await?;

    let response = PatientCommandResponse {
        patient_id: stored.id.to_string(),
        message: "Patient registered".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/patients/:patient_id - Fetch one casualty record
pub async fn get_patient(
    State(state): State<TriageAppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRecord>, TriageApiError> {
    let id = parse_patient_id(patient_id)?;
    let record = state.get_patient_handler().handle(id).await?;
    Ok(Json(record))
}
