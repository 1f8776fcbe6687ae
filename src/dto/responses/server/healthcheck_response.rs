use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerHealthcheckResponse {
    pub app_name_version: String,
    pub server_uptime: String,
    pub responses_handled: u64,
    pub photo_count: usize,
}
