// src/domain/grouping/mod.rs

pub mod index;

pub use index::{group, GroupedFindingIndex, SpanGroup, WorkKindGroup, UNKNOWN_BUCKET};
