use super::portfolio::{Entry, Section};
use anyhow::Result;
use std::sync::Arc;

/// Abstraction for portfolio content persistence.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Insert every section whose name is not stored yet.
    ///
    /// Existing sections are left untouched. Returns the number of rows inserted.
    async fn seed_sections(&self, sections: &[Section]) -> Result<usize>;

    /// Get all stored sections.
    async fn list_sections(&self) -> Result<Vec<Section>>;

    /// Get entries, newest first, optionally capped at `limit`.
    async fn list_entries(&self, limit: Option<i64>) -> Result<Vec<Entry>>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
