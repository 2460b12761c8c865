// src/domain/review/mod.rs
//
// Review Domain - role model and pure transition planning
//
// The confirm-before-save dialog is a UI concern and lives outside this
// crate; planning a review write is a pure function of current finding
// state + role + proposed fields so it can be tested without a dialog
// harness or a live store.

pub mod transition;

pub use transition::{
    plan_review, ReviewRole, ReviewSubmission, ReviewWrite, ReviewerIdentity, RoleScopedFields,
};
