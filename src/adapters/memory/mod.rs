//! In-memory adapters.

mod patient_store;

pub use patient_store::InMemoryPatientStore;
