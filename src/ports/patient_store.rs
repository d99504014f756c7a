use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PatientId, TriageCategory};
use crate::domain::patient::PatientRecord;

/// Read-only port for casualty records.
#[async_trait]
pub trait PatientReader: Send + Sync {
    /// Lists every record currently assigned to a triage category.
    ///
    /// Order is insertion order; rankings rely on it to break exact ties.
    async fn list_by_category(
        &self,
        category: TriageCategory,
    ) -> Result<Vec<PatientRecord>, PatientStoreError>;

    /// Gets a single record.
    async fn get(&self, id: &PatientId) -> Result<Option<PatientRecord>, PatientStoreError>;
}

/// Write port for casualty records.
#[async_trait]
pub trait PatientWriter: Send + Sync {
    /// Inserts or replaces a record, keeping the original position on replace.
    async fn save(&self, record: &PatientRecord) -> Result<(), PatientStoreError>;
}

/// Errors that can occur while reading or writing patient records.
#[derive(Debug, thiserror::Error)]
pub enum PatientStoreError {
    #[error("Patient not found: {0}")]
    NotFound(PatientId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<PatientStoreError> for DomainError {
    fn from(err: PatientStoreError) -> Self {
        match &err {
            PatientStoreError::NotFound(id) => {
                DomainError::new(ErrorCode::PatientNotFound, err.to_string())
                    .with_detail("patient_id", id.as_str())
            }
            PatientStoreError::Storage(_) => DomainError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyReader;

    #[async_trait]
    impl PatientReader for EmptyReader {
        async fn list_by_category(
            &self,
            _category: TriageCategory,
        ) -> Result<Vec<PatientRecord>, PatientStoreError> {
            Ok(Vec::new())
        }

        async fn get(&self, _id: &PatientId) -> Result<Option<PatientRecord>, PatientStoreError> {
            Ok(None)
        }
    }

    #[test]
    fn patient_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn PatientReader) {}
        _accepts_dyn(&EmptyReader);
    }

    #[test]
    fn store_errors_map_to_domain_codes() {
        let id = PatientId::new("p-9").unwrap();
        let err: DomainError = PatientStoreError::NotFound(id).into();
        assert_eq!(err.code, ErrorCode::PatientNotFound);
        assert_eq!(err.details.get("patient_id").map(String::as_str), Some("p-9"));

        let err: DomainError = PatientStoreError::Storage("locked".into()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[test]
    fn errors_display_context() {
        let id = PatientId::new("p-7").unwrap();
        assert_eq!(PatientStoreError::NotFound(id).to_string(), "Patient not found: p-7");
        assert_eq!(
            PatientStoreError::Storage("disk full".into()).to_string(),
            "Storage error: disk full"
        );
    }
}
