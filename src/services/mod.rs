// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod export_service;
pub mod report_service;
pub mod review_service;

#[cfg(test)]
mod export_service_tests;
#[cfg(test)]
mod report_service_tests;

// Re-export all services and their types
pub use review_service::ReviewService;

pub use report_service::{GroupedPartition, ReportService};

pub use export_service::{ExportOutcome, ExportService, DEFAULT_FETCH_CONCURRENCY};
