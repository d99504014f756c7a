//! Triage HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{TriageApiError, TriageAppState};
pub use routes::triage_routes;
