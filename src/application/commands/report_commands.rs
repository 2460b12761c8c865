// src/application/commands/report_commands.rs

use crate::application::commands::parse_uuid;
use crate::application::dto::{GroupedPartitionDto, SummaryDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::review::ReviewerIdentity;

/// The acting role's partition, grouped span → work-kind for display
pub async fn grouped_findings(
    state: &AppState,
    identity: &ReviewerIdentity,
    bridge_id: &str,
) -> Result<GroupedPartitionDto, ErrorResponse> {
    let bridge_id = parse_uuid(bridge_id, "bridge id")?;

    let grouped = state
        .report_service
        .grouped_partition(bridge_id, identity)
        .await?;

    Ok(grouped.into())
}

/// Roll-up statistics for a bridge's report header
pub async fn bridge_summary(
    state: &AppState,
    bridge_id: &str,
) -> Result<SummaryDto, ErrorResponse> {
    let bridge_id = parse_uuid(bridge_id, "bridge id")?;

    let stats = state.report_service.bridge_summary(bridge_id).await?;

    Ok(stats.into())
}
