use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    domain::photo::photo::Photo,
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
};

#[utoipa::path(
    get,
    path = "/photoz/{id}",
    tag = "photoz",
    params(
        ("id" = String, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "The photo's metadata", body = Photo),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn get_photo(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let photo: Photo = state
        .photoz()
        .get(&id)
        .await
        .ok_or_else(|| code_err(CodeError::PHOTO_NOT_FOUND, format!("No photo with id {id}")))?;

    Ok(Json(photo))
}
