use serde::{Deserialize, Serialize};

use crate::domain::finding::{
    normalize_remarks, EvaluationRecord, InspectionFinding, ReviewStatus,
};
use crate::domain::{DomainError, DomainResult};

/// The three review roles of the pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewRole {
    Consultant,
    Oversight,
    Evaluator,
}

impl std::fmt::Display for ReviewRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewRole::Consultant => write!(f, "consultant"),
            ReviewRole::Oversight => write!(f, "oversight"),
            ReviewRole::Evaluator => write!(f, "evaluator"),
        }
    }
}

/// Identity of the acting reviewer.
///
/// The role value comes from an externally-managed session token and is
/// injected at every entry point; the core never reads ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerIdentity {
    pub name: String,
    pub role: ReviewRole,
}

impl ReviewerIdentity {
    pub fn new(name: impl Into<String>, role: ReviewRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// A proposed review action, as typed by the reviewer.
///
/// Remarks arrive as raw strings; normalization to absent-when-blank
/// happens during planning.
#[derive(Debug, Clone)]
pub enum ReviewSubmission {
    Consultant { remarks: String, status: ReviewStatus },
    Oversight { remarks: String, status: ReviewStatus },
    Evaluation { remarks: String },
}

impl ReviewSubmission {
    /// The role that owns the submitted fields
    pub fn owning_role(&self) -> ReviewRole {
        match self {
            ReviewSubmission::Consultant { .. } => ReviewRole::Consultant,
            ReviewSubmission::Oversight { .. } => ReviewRole::Oversight,
            ReviewSubmission::Evaluation { .. } => ReviewRole::Evaluator,
        }
    }
}

/// Full-replace payload for one role's review slot.
///
/// Each variant carries only its own role's fields, so an oversight write
/// cannot alter consultant-owned data by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleScopedFields {
    Consultant {
        remarks: Option<String>,
        status: ReviewStatus,
    },
    Oversight {
        remarks: Option<String>,
        status: ReviewStatus,
    },
}

/// The planned store operation for a legal submission.
#[derive(Debug, Clone)]
pub enum ReviewWrite {
    /// Full replace of one role's remarks+status on the finding
    Update(RoleScopedFields),
    /// Insert of a new evaluator-owned snapshot record
    Finalize(EvaluationRecord),
}

/// Plan the store write for a review submission.
///
/// Pure function: no I/O, no mutation of `finding`. Enforces:
/// - the acting role owns the submitted fields;
/// - a finalized finding is read-only for every role;
/// - `Unset` is not a legal submission target;
/// - blank remarks are stored as absent, and an evaluation without remarks
///   is rejected (its remarks' presence is the terminal state).
pub fn plan_review(
    identity: &ReviewerIdentity,
    finding: &InspectionFinding,
    submission: ReviewSubmission,
) -> DomainResult<ReviewWrite> {
    let owning_role = submission.owning_role();
    if identity.role != owning_role {
        return Err(DomainError::RoleNotPermitted {
            role: identity.role.to_string(),
            field: format!("{} review fields", owning_role),
        });
    }

    if finding.finalized {
        return Err(DomainError::AlreadyFinalized(finding.id));
    }

    match submission {
        ReviewSubmission::Consultant { remarks, status } => {
            validate_status_target(status)?;
            Ok(ReviewWrite::Update(RoleScopedFields::Consultant {
                remarks: normalize_remarks(&remarks),
                status,
            }))
        }
        ReviewSubmission::Oversight { remarks, status } => {
            validate_status_target(status)?;
            Ok(ReviewWrite::Update(RoleScopedFields::Oversight {
                remarks: normalize_remarks(&remarks),
                status,
            }))
        }
        ReviewSubmission::Evaluation { remarks } => {
            let remarks = normalize_remarks(&remarks).ok_or_else(|| {
                DomainError::InvariantViolation(
                    "Evaluation requires non-empty remarks".to_string(),
                )
            })?;
            Ok(ReviewWrite::Finalize(EvaluationRecord::from_finding(
                finding,
                remarks,
                identity.name.clone(),
            )))
        }
    }
}

/// A submission must resolve the review one way or the other
fn validate_status_target(status: ReviewStatus) -> DomainResult<()> {
    if status == ReviewStatus::Unset {
        return Err(DomainError::InvalidStateTransition(
            "A review submission must target approved or unapproved".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_finding() -> InspectionFinding {
        InspectionFinding::new(
            Uuid::new_v4(),
            Some("2".to_string()),
            Some("Substructure".to_string()),
            "Pier".to_string(),
            "Concrete".to_string(),
            "Crack".to_string(),
            "b".to_string(),
            "10%".to_string(),
        )
    }

    fn consultant() -> ReviewerIdentity {
        ReviewerIdentity::new("tanaka", ReviewRole::Consultant)
    }

    fn oversight() -> ReviewerIdentity {
        ReviewerIdentity::new("city-office", ReviewRole::Oversight)
    }

    fn evaluator() -> ReviewerIdentity {
        ReviewerIdentity::new("board", ReviewRole::Evaluator)
    }

    #[test]
    fn test_consultant_approval_plans_consultant_fields_only() {
        let finding = sample_finding();
        let write = plan_review(
            &consultant(),
            &finding,
            ReviewSubmission::Consultant {
                remarks: "ok as surveyed".to_string(),
                status: ReviewStatus::Approved,
            },
        )
        .unwrap();

        match write {
            ReviewWrite::Update(RoleScopedFields::Consultant { remarks, status }) => {
                assert_eq!(remarks, Some("ok as surveyed".to_string()));
                assert_eq!(status, ReviewStatus::Approved);
            }
            other => panic!("Expected consultant update, got {:?}", other),
        }
    }

    #[test]
    fn test_role_mismatch_is_rejected() {
        let finding = sample_finding();
        let result = plan_review(
            &oversight(),
            &finding,
            ReviewSubmission::Consultant {
                remarks: "sneaky".to_string(),
                status: ReviewStatus::Approved,
            },
        );

        assert!(matches!(result, Err(DomainError::RoleNotPermitted { .. })));
    }

    #[test]
    fn test_finalized_finding_rejects_consultant_write() {
        let mut finding = sample_finding();
        finding.evaluator_remarks = Some("adjudicated".to_string());
        finding.finalized = true;

        let result = plan_review(
            &consultant(),
            &finding,
            ReviewSubmission::Consultant {
                remarks: "too late".to_string(),
                status: ReviewStatus::Unapproved,
            },
        );

        assert!(matches!(result, Err(DomainError::AlreadyFinalized(id)) if id == finding.id));
    }

    #[test]
    fn test_finalized_finding_rejects_second_evaluation() {
        let mut finding = sample_finding();
        finding.evaluator_remarks = Some("adjudicated".to_string());
        finding.finalized = true;

        let result = plan_review(
            &evaluator(),
            &finding,
            ReviewSubmission::Evaluation {
                remarks: "again".to_string(),
            },
        );

        assert!(matches!(result, Err(DomainError::AlreadyFinalized(_))));
    }

    #[test]
    fn test_unset_is_not_a_legal_submission_target() {
        let finding = sample_finding();
        let result = plan_review(
            &oversight(),
            &finding,
            ReviewSubmission::Oversight {
                remarks: "undecided".to_string(),
                status: ReviewStatus::Unset,
            },
        );

        assert!(matches!(
            result,
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_blank_remarks_are_stored_as_absent() {
        let finding = sample_finding();
        let write = plan_review(
            &oversight(),
            &finding,
            ReviewSubmission::Oversight {
                remarks: "   ".to_string(),
                status: ReviewStatus::Unapproved,
            },
        )
        .unwrap();

        match write {
            ReviewWrite::Update(RoleScopedFields::Oversight { remarks, .. }) => {
                assert_eq!(remarks, None);
            }
            other => panic!("Expected oversight update, got {:?}", other),
        }
    }

    #[test]
    fn test_oversight_write_carries_no_consultant_fields() {
        let mut finding = sample_finding();
        finding.consultant_remarks = Some("consultant text".to_string());
        finding.consultant_status = ReviewStatus::Approved;

        let write = plan_review(
            &oversight(),
            &finding,
            ReviewSubmission::Oversight {
                remarks: "checked".to_string(),
                status: ReviewStatus::Approved,
            },
        )
        .unwrap();

        // The payload variant itself scopes the write; a consultant slot
        // cannot be expressed through it.
        assert!(matches!(
            write,
            ReviewWrite::Update(RoleScopedFields::Oversight { .. })
        ));
    }

    #[test]
    fn test_evaluation_requires_remarks() {
        let finding = sample_finding();
        let result = plan_review(
            &evaluator(),
            &finding,
            ReviewSubmission::Evaluation {
                remarks: "  ".to_string(),
            },
        );

        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn test_evaluation_copies_observation_forward() {
        let mut finding = sample_finding();
        finding.consultant_remarks = Some("repair soon".to_string());

        let write = plan_review(
            &evaluator(),
            &finding,
            ReviewSubmission::Evaluation {
                remarks: "confirmed, schedule repair".to_string(),
            },
        )
        .unwrap();

        match write {
            ReviewWrite::Finalize(record) => {
                assert_eq!(record.finding_id, finding.id);
                assert_eq!(record.bridge_id, finding.bridge_id);
                assert_eq!(record.span_index, finding.span_index);
                assert_eq!(record.work_kind, finding.work_kind);
                assert_eq!(record.part_name, finding.part_name);
                assert_eq!(record.material_name, finding.material_name);
                assert_eq!(record.damage_kind, finding.damage_kind);
                assert_eq!(record.damage_level, finding.damage_level);
                assert_eq!(record.damage_extent, finding.damage_extent);
                assert_eq!(record.remarks, "confirmed, schedule repair");
                assert_eq!(record.evaluated_by, "board");
            }
            other => panic!("Expected finalize, got {:?}", other),
        }
    }
}
