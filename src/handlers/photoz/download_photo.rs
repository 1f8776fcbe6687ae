use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::response::Attachment;

use crate::{
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
};

/// Streams back the stored bytes with their content type; the original
/// filename, when known, goes into `Content-Disposition`.
#[utoipa::path(
    get,
    path = "/download/{id}",
    tag = "photoz",
    params(
        ("id" = String, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Raw photo bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn download_photo(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let photo = state
        .photoz()
        .get(&id)
        .await
        .ok_or_else(|| code_err(CodeError::PHOTO_NOT_FOUND, format!("No photo with id {id}")))?;

    let mut attachment = Attachment::new(photo.data).content_type(photo.content_type);
    if let Some(filename) = photo.filename {
        attachment = attachment.filename(filename);
    }

    Ok(attachment)
}
