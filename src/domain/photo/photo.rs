use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored photo record.
///
/// `data` never leaves the server as JSON; clients fetch it through the
/// download endpoint. The serialized form doubles as the disk store's
/// metadata sidecar.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub filename: Option<String>,
    pub content_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub data: Bytes,
}

impl Photo {
    pub fn new(id: String, filename: Option<String>, content_type: String, data: Bytes) -> Self {
        Photo {
            id,
            filename,
            content_type,
            size: data.len() as u64,
            created_at: Utc::now(),
            data,
        }
    }

    pub fn with_data(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }
}
