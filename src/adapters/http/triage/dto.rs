//! HTTP DTOs for triage endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::ahp::{
    ConsistencyReport, CriterionWeight, HierarchyConfig, HierarchyEvaluation, ScoredPatient,
    TriageRanking,
};
use crate::domain::foundation::DomainError;
use crate::domain::patient::{ClinicalSummary, PatientRecord};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to rank an explicit list of patients.
#[derive(Debug, Clone, Deserialize)]
pub struct RankPatientsRequest {
    /// Category name, code (`T1`) or colour (`red`).
    pub category: String,
    #[serde(default)]
    pub patients: Vec<PatientRecord>,
    /// Replaces the configured hierarchy for this request only.
    #[serde(default)]
    pub hierarchy: Option<HierarchyConfig>,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Query parameters for ranking a stored category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One ranked patient with the scores that produced its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPatientResponse {
    pub rank: u32,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    pub global_priority: f64,
    pub criterion_scores: BTreeMap<String, f64>,
    pub leaf_scores: BTreeMap<String, f64>,
    pub clinical: ClinicalSummary,
}

impl From<ScoredPatient> for RankedPatientResponse {
    fn from(scored: ScoredPatient) -> Self {
        Self {
            rank: scored.rank.unwrap_or_default(),
            patient_id: scored.patient_id.to_string(),
            card_id: scored.card_id,
            global_priority: scored.global_priority,
            criterion_scores: scored.criterion_scores,
            leaf_scores: scored.leaf_scores,
            clinical: scored.clinical,
        }
    }
}

/// Ranking of one triage category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    pub category: String,
    /// Short code of the category (`T1`..`T4`).
    pub category_code: String,
    pub patients: Vec<RankedPatientResponse>,
    pub excluded_count: usize,
    pub weights: Vec<CriterionWeight>,
    pub consistency: ConsistencyReport,
}

impl From<TriageRanking> for RankingResponse {
    fn from(ranking: TriageRanking) -> Self {
        Self {
            category: ranking.category.to_string(),
            category_code: ranking.category.code().to_string(),
            patients: ranking
                .ranked_patients
                .into_iter()
                .map(RankedPatientResponse::from)
                .collect(),
            excluded_count: ranking.excluded_count,
            weights: ranking.weights,
            consistency: ranking.consistency,
        }
    }
}

/// Resolved weights and consistency of the configured hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyResponse {
    pub weights: Vec<CriterionWeight>,
    pub consistency: ConsistencyReport,
}

impl From<HierarchyEvaluation> for HierarchyResponse {
    fn from(evaluation: HierarchyEvaluation) -> Self {
        Self {
            weights: evaluation.weights,
            consistency: evaluation.consistency,
        }
    }
}

/// Response for patient command operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCommandResponse {
    pub patient_id: String,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            let sorted: BTreeMap<_, _> = err.details.iter().collect();
            serde_json::to_value(sorted).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, PatientId, TriageCategory};

    #[test]
    fn rank_request_deserializes_with_defaults() {
        let json = r#"{ "category": "T1" }"#;
        let request: RankPatientsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.category, "T1");
        assert!(request.patients.is_empty());
        assert!(request.hierarchy.is_none());
        assert!(request.reference_date.is_none());
    }

    #[test]
    fn ranked_patient_drops_full_record() {
        let record = PatientRecord::builder(PatientId::new("p-1").unwrap())
            .category(TriageCategory::Immediate)
            .card_id("CARD-7")
            .build();
        let scored = ScoredPatient {
            patient_id: record.id.clone(),
            card_id: record.card_id.clone(),
            record,
            leaf_scores: BTreeMap::new(),
            criterion_scores: BTreeMap::new(),
            global_priority: 0.4,
            rank: Some(2),
            clinical: ClinicalSummary::default(),
        };

        let response = RankedPatientResponse::from(scored);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["rank"], 2);
        assert_eq!(json["card_id"], "CARD-7");
        assert!(json.get("record").is_none());
    }

    #[test]
    fn error_response_carries_domain_code_and_details() {
        let err = DomainError::new(ErrorCode::InvalidConfiguration, "no rule")
            .with_detail("criterion_id", "pupils");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "INVALID_CONFIGURATION");
        assert_eq!(response.details.unwrap()["criterion_id"], "pupils");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let response = ErrorResponse::bad_request("Invalid input");
        assert_eq!(response.code, "BAD_REQUEST");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }
}
