//! In-memory patient store.
//!
//! Keeps records in insertion order so that rankings over the same data
//! break exact ties the same way on every run.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{PatientId, TriageCategory};
use crate::domain::patient::PatientRecord;
use crate::ports::{PatientReader, PatientStoreError, PatientWriter};

/// Patient store backed by a vector behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    records: RwLock<Vec<PatientRecord>>,
}

impl InMemoryPatientStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records, in the given order.
    pub fn with_records(records: Vec<PatientRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PatientReader for InMemoryPatientStore {
    async fn list_by_category(
        &self,
        category: TriageCategory,
    ) -> Result<Vec<PatientRecord>, PatientStoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.is_in_category(category))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &PatientId) -> Result<Option<PatientRecord>, PatientStoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| &r.id == id).cloned())
    }
}

#[async_trait]
impl PatientWriter for InMemoryPatientStore {
    async fn save(&self, record: &PatientRecord) -> Result<(), PatientStoreError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                debug!(patient_id = %record.id, "Replacing stored patient");
                *existing = record.clone();
            }
            None => records.push(record.clone()),
        }
        Ok(())
    }
}
