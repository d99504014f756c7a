//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory patient store
//! - `hierarchy` - Static and YAML-file hierarchy providers
//! - `http` - Axum REST API

pub mod hierarchy;
pub mod http;
pub mod memory;

pub use hierarchy::{StaticHierarchyProvider, YamlHierarchyProvider};
pub use http::{triage_routes, TriageAppState};
pub use memory::InMemoryPatientStore;
