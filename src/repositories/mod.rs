// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers over the store's wire contract
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls

pub mod dataset_repository;
pub mod finding_repository;

pub use dataset_repository::{DatasetRepository, HttpDatasetRepository};
pub use finding_repository::{FindingRepository, HttpFindingRepository, StoreConfig};

#[cfg(test)]
pub use dataset_repository::MockDatasetRepository;
#[cfg(test)]
pub use finding_repository::MockFindingRepository;
