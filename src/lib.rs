//! Casualty Triage - AHP-based patient prioritization
//!
//! This crate ranks casualties within a triage category using the Analytic
//! Hierarchy Process: pairwise criterion judgements become weights, each
//! patient is scored per criterion, and the weighted sum orders the queue.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
