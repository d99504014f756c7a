//! GetPatientHandler - Query handler for a single stored casualty record.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PatientId};
use crate::domain::patient::PatientRecord;
use crate::ports::{PatientReader, PatientStoreError};

/// Handler for retrieving one patient.
pub struct GetPatientHandler {
    reader: Arc<dyn PatientReader>,
}

impl GetPatientHandler {
    pub fn new(reader: Arc<dyn PatientReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, id: PatientId) -> Result<PatientRecord, DomainError> {
        match self.reader.get(&id).await? {
            Some(record) => Ok(record),
            None => Err(PatientStoreError::NotFound(id).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, TriageCategory};
    use async_trait::async_trait;

    struct SinglePatientReader(PatientRecord);

    #[async_trait]
    impl PatientReader for SinglePatientReader {
        async fn list_by_category(
            &self,
            _category: TriageCategory,
        ) -> Result<Vec<PatientRecord>, PatientStoreError> {
            Ok(vec![self.0.clone()])
        }

        async fn get(&self, id: &PatientId) -> Result<Option<PatientRecord>, PatientStoreError> {
            Ok(Some(self.0.clone()).filter(|r| &r.id == id))
        }
    }

    fn handler() -> GetPatientHandler {
        let record = PatientRecord::new(PatientId::new("known").unwrap());
        GetPatientHandler::new(Arc::new(SinglePatientReader(record)))
    }

    #[tokio::test]
    async fn returns_existing_record() {
        let record = handler().handle(PatientId::new("known").unwrap()).await.unwrap();
        assert_eq!(record.id.as_str(), "known");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let err = handler()
            .handle(PatientId::new("ghost").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PatientNotFound);
    }
}
