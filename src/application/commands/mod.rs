// src/application/commands/mod.rs
//
// Command entry points called by the host UI. Each command takes the
// shared state plus the acting identity and returns a DTO or an
// ErrorResponse; nothing here holds business logic.

pub mod export_commands;
pub mod report_commands;
pub mod review_commands;

pub use export_commands::export_findings;
pub use report_commands::{bridge_summary, grouped_findings};
pub use review_commands::{list_review_partition, submit_review};

use uuid::Uuid;

use crate::application::error_handling::ErrorResponse;

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, ErrorResponse> {
    Uuid::parse_str(value)
        .map_err(|_| ErrorResponse::validation(format!("Invalid {}: {}", field, value)))
}
