use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::{domain::photo::photo::Photo, init::state::ServerState};

#[utoipa::path(
    get,
    path = "/photoz",
    tag = "photoz",
    responses(
        (status = 200, description = "Every stored photo, unordered", body = Vec<Photo>)
    )
)]
pub async fn get_photoz(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let photos: Vec<Photo> = state.photoz().list().await;
    debug!(count = photos.len(), "Listed photos");
    Json(photos)
}
