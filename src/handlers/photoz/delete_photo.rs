use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{error, info};

use crate::{
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
};

#[utoipa::path(
    delete,
    path = "/photoz/{id}",
    tag = "photoz",
    params(
        ("id" = String, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo deleted"),
        (status = 404, description = "Photo not found"),
        (status = 500, description = "Storage failure", body = crate::errors::code_error::CodeErrorResp)
    )
)]
pub async fn delete_photo(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> HandlerResponse<StatusCode> {
    let removed = state.photoz().remove(&id).await.map_err(|e| {
        error!(error = ?e, photo_id = %id, "Failed to delete photo");
        code_err(CodeError::STORAGE_ERROR, e)
    })?;

    match removed {
        Some(photo) => {
            info!(photo_id = %photo.id, size_bytes = photo.size, "Photo deleted");
            Ok(StatusCode::OK)
        }
        None => Err(code_err(
            CodeError::PHOTO_NOT_FOUND,
            format!("No photo with id {id}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::{CAT_PNG, create_test_server, upload_file};

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let server = create_test_server();
        let created = upload_file(&server, "cat.png", "image/png", CAT_PNG).await;
        let path = format!("/photoz/{}", created.id);

        let response = server.delete(&path).await;
        response.assert_status_ok();
        assert!(response.as_bytes().is_empty());

        server
            .get(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let server = create_test_server();

        let response = server.delete("/photoz/never-created").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.as_bytes().is_empty());
    }
}
