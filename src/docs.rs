//! OpenAPI documentation registration for Swagger UI.
//!
//! Important: Utoipa only exposes operations you list in `#[openapi(paths(...))]`.
//! Handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::OpenApi;

// ---- handlers (for `paths(...)`) ----
use crate::handlers::{
    photoz::{delete_photo, download_photo, get_photo, get_photoz, upload_photo},
    root,
    server::healthcheck,
};

// ---- schemas (for `components(schemas(...))`) ----
use crate::domain::photo::photo::Photo;
use crate::dto::{
    requests::photoz::upload_photo_request::UploadPhotoRequest,
    responses::server::healthcheck_response::ServerHealthcheckResponse,
};
use crate::errors::code_error::CodeErrorResp;

/// Central OpenAPI document for Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        // --- server ---
        root::root_handler,
        healthcheck::healthcheck,

        // --- photoz ---
        get_photoz::get_photoz,
        get_photo::get_photo,
        upload_photo::upload_photo,
        delete_photo::delete_photo,
        download_photo::download_photo,
    ),
    components(
        schemas(
            // shared error response
            CodeErrorResp,

            Photo,
            UploadPhotoRequest,
            ServerHealthcheckResponse,
        )
    ),
    tags(
        (name = "server", description = "Server status endpoints"),
        (name = "photoz", description = "Photo upload, listing, download and deletion")
    )
)]
pub struct ApiDoc;
