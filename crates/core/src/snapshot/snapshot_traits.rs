use async_trait::async_trait;

use super::snapshot_model::{LedgerWrite, Snapshot};
use crate::errors::Result;

/// Contract for the storage layer that owns a user's records.
///
/// Implementations must apply a [`LedgerWrite`] atomically: either every
/// operation is visible afterwards or none is. A write carrying an expected
/// budget revision that no longer matches fails with
/// `DatabaseError::ConcurrentWriteConflict`.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    fn load_snapshot(&self, user_id: &str) -> Result<Snapshot>;

    async fn commit(&self, user_id: &str, write: LedgerWrite) -> Result<()>;
}
