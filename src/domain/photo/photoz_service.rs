use async_trait::async_trait;
use axum::body::Bytes;

use super::photo::Photo;

/// Persistence and id assignment for photo records.
///
/// Implementations must be safe to call concurrently from every request task.
/// Reads never fail from the caller's point of view: a record that cannot be
/// loaded is reported as absent.
#[async_trait]
pub trait PhotozService: Send + Sync {
    /// Every stored record, in no particular order. The `data` payload of the
    /// returned records may be left unloaded.
    async fn list(&self) -> Vec<Photo>;

    async fn get(&self, id: &str) -> Option<Photo>;

    /// Stores a new record under a freshly generated id.
    async fn save(
        &self,
        filename: Option<String>,
        content_type: String,
        data: Bytes,
    ) -> anyhow::Result<Photo>;

    /// Removes the record, returning it, or `None` if nothing matched.
    async fn remove(&self, id: &str) -> anyhow::Result<Option<Photo>>;

    fn count(&self) -> usize;
}
