#[utoipa::path(
    get,
    path = "/",
    tag = "server",
    responses(
        (status = 200, description = "Static greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn root_handler() -> &'static str {
    "hello world"
}
