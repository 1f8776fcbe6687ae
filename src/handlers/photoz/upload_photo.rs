use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info, warn};

use crate::{
    dto::requests::photoz::upload_photo_request::UploadPhotoRequest,
    domain::photo::photo::Photo,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::{mime::resolve_content_type::resolve_content_type, time::now::tokio_now},
};

const UPLOAD_PART_NAME: &str = "data";

// The body limit surfaces while the multipart stream is read.
fn multipart_err(e: MultipartError, context: &'static str) -> CodeErrorResp {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = ?e, "{context}: upload over the body size limit");
        code_err(CodeError::PAYLOAD_TOO_LARGE, e.body_text())
    } else {
        error!(error = ?e, "{context}");
        code_err(CodeError::FILE_UPLOAD_ERROR, e)
    }
}

struct UploadedFile {
    filename: Option<String>,
    content_type: String,
    bytes: Bytes,
}

#[utoipa::path(
    post,
    path = "/photoz",
    tag = "photoz",
    request_body(content = UploadPhotoRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored; body carries the assigned id", body = Photo),
        (status = 400, description = "No `data` part in the request", body = CodeErrorResp),
        (status = 413, description = "Request body over the configured limit", body = CodeErrorResp),
        (status = 500, description = "Upload could not be read or stored", body = CodeErrorResp)
    )
)]
pub async fn upload_photo(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut uploaded: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_err(e, "Failed to fetch next multipart field"))?
    {
        let name = field.name().map(str::to_owned);

        match name.as_deref() {
            Some(UPLOAD_PART_NAME) if uploaded.is_none() => {
                let filename = field.file_name().map(str::to_owned);
                let content_type = resolve_content_type(field.content_type(), filename.as_deref());

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_err(e, "Failed reading multipart field bytes"))?;

                uploaded = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            Some(UPLOAD_PART_NAME) => {
                warn!("Repeated `data` part; keeping the first one");
            }
            // Unknown fields: log and ignore
            other => {
                warn!(field = ?other, "Unexpected multipart field");
            }
        }
    }

    let UploadedFile {
        filename,
        content_type,
        bytes,
    } = uploaded.ok_or_else(|| {
        warn!("Upload request carried no `data` part");
        code_err(
            CodeError::MISSING_UPLOAD_PART,
            "Multipart part `data` is required",
        )
    })?;

    let photo: Photo = state
        .photoz()
        .save(filename, content_type, bytes)
        .await
        .map_err(|e| {
            error!(error = ?e, "Failed to store uploaded photo");
            code_err(CodeError::STORAGE_ERROR, e)
        })?;

    info!(
        photo_id = %photo.id,
        filename = ?photo.filename,
        content_type = %photo.content_type,
        size_bytes = photo.size,
        elapsed = ?start.elapsed(),
        "Stored uploaded photo"
    );

    Ok(Json(photo))
}
