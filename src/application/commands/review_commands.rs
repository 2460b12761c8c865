// src/application/commands/review_commands.rs

use crate::application::commands::parse_uuid;
use crate::application::dto::{FindingPartitionDto, SubmitReviewDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::finding::ReviewStatus;
use crate::domain::review::{ReviewSubmission, ReviewerIdentity};

/// The acting role's read partition for a bridge
pub async fn list_review_partition(
    state: &AppState,
    identity: &ReviewerIdentity,
    bridge_id: &str,
) -> Result<FindingPartitionDto, ErrorResponse> {
    let bridge_id = parse_uuid(bridge_id, "bridge id")?;

    let partition = state
        .review_service
        .list_partition(bridge_id, identity)
        .await?;

    Ok(partition.into())
}

/// Save one review action.
///
/// The UI runs its irreversible-action confirmation before calling this;
/// on an error result the UI keeps the typed remarks.
pub async fn submit_review(
    state: &AppState,
    identity: &ReviewerIdentity,
    dto: SubmitReviewDto,
) -> Result<FindingPartitionDto, ErrorResponse> {
    let finding_id = parse_uuid(&dto.finding_id, "finding id")?;
    let submission = parse_submission(&dto)?;

    let partition = state
        .review_service
        .submit_review(identity, finding_id, submission)
        .await?;

    Ok(partition.into())
}

fn parse_submission(dto: &SubmitReviewDto) -> Result<ReviewSubmission, ErrorResponse> {
    match dto.role.as_str() {
        "consultant" => Ok(ReviewSubmission::Consultant {
            remarks: dto.remarks.clone(),
            status: parse_status(dto.status.as_deref())?,
        }),
        "oversight" => Ok(ReviewSubmission::Oversight {
            remarks: dto.remarks.clone(),
            status: parse_status(dto.status.as_deref())?,
        }),
        "evaluator" => Ok(ReviewSubmission::Evaluation {
            remarks: dto.remarks.clone(),
        }),
        other => Err(ErrorResponse::validation(format!(
            "Unknown review role: {}",
            other
        ))),
    }
}

fn parse_status(status: Option<&str>) -> Result<ReviewStatus, ErrorResponse> {
    match status {
        Some("approved") => Ok(ReviewStatus::Approved),
        Some("unapproved") => Ok(ReviewStatus::Unapproved),
        Some(other) => Err(ErrorResponse::validation(format!(
            "Unknown review status: {}",
            other
        ))),
        None => Err(ErrorResponse::validation(
            "A consultant or oversight submission requires a status",
        )),
    }
}
