//! RegisterPatientHandler - Command handler storing a casualty record.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::DomainError;
use crate::domain::patient::PatientRecord;
use crate::ports::PatientWriter;

/// Command to store (or replace) a casualty record.
#[derive(Debug, Clone)]
pub struct RegisterPatientCommand {
    pub record: PatientRecord,
}

/// Result of successful registration: the stored record.
pub type RegisterPatientResult = PatientRecord;

/// Handler for registering patients.
pub struct RegisterPatientHandler {
    writer: Arc<dyn PatientWriter>,
}

impl RegisterPatientHandler {
    pub fn new(writer: Arc<dyn PatientWriter>) -> Self {
        Self { writer }
    }

    pub async fn handle(&self, cmd: RegisterPatientCommand) -> Result<RegisterPatientResult, DomainError> {
        let record = cmd.record;
        record.validate()?;

        self.writer.save(&record).await?;

        info!(
            patient_id = %record.id,
            category = ?record.triage_category,
            "Registered patient"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, PatientId, TriageCategory};
    use crate::ports::PatientStoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPatientWriter {
        saved: Mutex<Vec<PatientRecord>>,
        fail_save: bool,
    }

    impl MockPatientWriter {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<PatientRecord> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PatientWriter for MockPatientWriter {
        async fn save(&self, record: &PatientRecord) -> Result<(), PatientStoreError> {
            if self.fail_save {
                return Err(PatientStoreError::Storage("Simulated failure".to_string()));
            }
            self.saved.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn record(id: &str) -> PatientRecord {
        PatientRecord::builder(PatientId::new(id).unwrap())
            .category(TriageCategory::Delayed)
            .pulse_rate(110)
            .build()
    }

    #[tokio::test]
    async fn saves_valid_record() {
        let writer = Arc::new(MockPatientWriter::new());
        let handler = RegisterPatientHandler::new(writer.clone());

        let stored = handler
            .handle(RegisterPatientCommand { record: record("p-1") })
            .await
            .unwrap();

        assert_eq!(stored.id.as_str(), "p-1");
        assert_eq!(writer.saved().len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_record_without_saving() {
        let writer = Arc::new(MockPatientWriter::new());
        let handler = RegisterPatientHandler::new(writer.clone());
        let mut invalid = record("p-2");
        invalid.oxygen_saturation = Some(140.0);

        let err = handler
            .handle(RegisterPatientCommand { record: invalid })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert!(writer.saved().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_propagated() {
        let handler = RegisterPatientHandler::new(Arc::new(MockPatientWriter::failing()));
        let err = handler
            .handle(RegisterPatientCommand { record: record("p-3") })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
