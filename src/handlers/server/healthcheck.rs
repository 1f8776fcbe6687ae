use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    dto::responses::server::healthcheck_response::ServerHealthcheckResponse,
    init::state::ServerState, util::time::duration_formatter::format_duration,
};

#[utoipa::path(
    get,
    path = "/api/healthcheck/server",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = ServerHealthcheckResponse)
    )
)]
pub async fn healthcheck(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ServerHealthcheckResponse {
            app_name_version: state.get_app_name_version(),
            server_uptime: format_duration(state.get_uptime()),
            responses_handled: state.get_responses_handled(),
            photo_count: state.photoz().count(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        dto::responses::server::healthcheck_response::ServerHealthcheckResponse,
        test_utils::{CAT_PNG, create_test_server, upload_file},
    };

    #[tokio::test]
    async fn reports_photo_count_and_requests() {
        let server = create_test_server();
        upload_file(&server, "cat.png", "image/png", CAT_PNG).await;

        let response = server.get("/api/healthcheck/server").await;
        response.assert_status_ok();

        let health: ServerHealthcheckResponse = response.json();
        assert_eq!(health.app_name_version, "photoz test");
        assert_eq!(health.photo_count, 1);
        // the upload plus this request
        assert_eq!(health.responses_handled, 2);
        assert!(health.server_uptime.ends_with('s'));
    }
}
