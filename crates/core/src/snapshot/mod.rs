//! The storage collaborator contract: one consistent read, one atomic write.

mod snapshot_model;
mod snapshot_repository;
mod snapshot_traits;

pub use snapshot_model::*;
pub use snapshot_repository::InMemorySnapshotRepository;
pub use snapshot_traits::SnapshotRepositoryTrait;
