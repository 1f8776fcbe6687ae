use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Method,
    middleware::from_fn_with_state,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        fallback::fallback_handler,
        photoz::{
            delete_photo::delete_photo, download_photo::download_photo, get_photo::get_photo,
            get_photoz::get_photoz, upload_photo::upload_photo,
        },
        root::root_handler,
        server::healthcheck::healthcheck,
    },
    init::state::ServerState,
};

use super::middleware::logging::log_middleware;

// PUT is advertised to browsers but no route implements it yet.
const CORS_ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true);
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(CORS_ALLOWED_METHODS)
        .allow_headers(Any);

    let api_router = Router::new()
        .route("/", get(root_handler))
        .route("/photoz", get(get_photoz).post(upload_photo))
        .route("/photoz/{id}", get(get_photo).delete(delete_photo))
        .route("/download/{id}", get(download_photo))
        .route("/api/healthcheck/server", get(healthcheck))
        .fallback(fallback_handler)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(DefaultBodyLimit::max(state.get_max_upload_size_bytes()))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
