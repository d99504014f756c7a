//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PatientReader` / `PatientWriter` - Casualty record storage
//! - `HierarchyProvider` - Source of the comparison hierarchy

mod hierarchy_provider;
mod patient_store;

pub use hierarchy_provider::{HierarchyProvider, HierarchySourceError};
pub use patient_store::{PatientReader, PatientStoreError, PatientWriter};
