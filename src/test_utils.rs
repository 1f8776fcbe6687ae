use std::sync::Arc;

use axum_test::TestServer;

use crate::{
    domain::photo::{memory_store::MemoryPhotoStore, photoz_service::PhotozService},
    init::state::{DeploymentEnvironment, ServerState},
    routers::main_router::build_router,
    util::time::now::tokio_now,
};

pub const TEST_MAX_UPLOAD_SIZE_BYTES: usize = 1024 * 64;

pub fn create_test_state_with(photoz_service: Arc<dyn PhotozService>) -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("photoz test".to_string())
            .server_start_time(tokio_now())
            .photoz_service(photoz_service)
            .deployment_environment(DeploymentEnvironment::Local)
            .max_upload_size_bytes(TEST_MAX_UPLOAD_SIZE_BYTES)
            .build()
            .expect("Failed to build test state"),
    )
}

pub fn create_test_server_with(photoz_service: Arc<dyn PhotozService>) -> TestServer {
    let router = build_router(create_test_state_with(photoz_service));
    TestServer::new(router.into_make_service()).expect("Failed to create test server")
}

pub fn create_test_server() -> TestServer {
    create_test_server_with(Arc::new(MemoryPhotoStore::new()))
}

pub const CAT_PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

pub async fn upload_file(
    server: &TestServer,
    filename: &str,
    mime_type: &str,
    bytes: &'static [u8],
) -> crate::domain::photo::photo::Photo {
    let part = axum_test::multipart::Part::bytes(bytes)
        .file_name(filename)
        .mime_type(mime_type);

    let response = server
        .post("/photoz")
        .multipart(axum_test::multipart::MultipartForm::new().add_part("data", part))
        .await;

    response.assert_status_ok();
    response.json()
}
