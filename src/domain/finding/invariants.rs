use super::entity::InspectionFinding;
use crate::domain::{DomainError, DomainResult};

/// Validates all InspectionFinding invariants
pub fn validate_finding(finding: &InspectionFinding) -> DomainResult<()> {
    validate_observation(finding)?;
    validate_review_slots(finding)?;
    Ok(())
}

/// Observation fields must carry survey data
fn validate_observation(finding: &InspectionFinding) -> DomainResult<()> {
    if finding.part_name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Finding part name cannot be empty".to_string(),
        ));
    }

    if finding.damage_kind.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Finding damage kind cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Review slots must never hold empty-string remarks; absent is `None`
fn validate_review_slots(finding: &InspectionFinding) -> DomainResult<()> {
    for (field, remarks) in [
        ("consultant remarks", &finding.consultant_remarks),
        ("oversight remarks", &finding.oversight_remarks),
        ("evaluator remarks", &finding.evaluator_remarks),
    ] {
        if let Some(text) = remarks {
            if text.trim().is_empty() {
                return Err(DomainError::InvariantViolation(format!(
                    "{} must be absent rather than empty",
                    field
                )));
            }
        }
    }

    if finding.finalized && finding.evaluator_remarks.is_none() {
        return Err(DomainError::InvariantViolation(
            "Finalized finding must carry evaluator remarks".to_string(),
        ));
    }

    Ok(())
}

/// Normalize a submitted remarks value for storage.
///
/// Empty or whitespace-only input becomes `None`; the stored field must be
/// absent rather than an empty string.
pub fn normalize_remarks(remarks: &str) -> Option<String> {
    let trimmed = remarks.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
