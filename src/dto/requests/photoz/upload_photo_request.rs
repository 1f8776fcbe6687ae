use utoipa::ToSchema;

/// Multipart form accepted by `POST /photoz`. Documentation only; the handler
/// reads the parts straight off the request stream.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadPhotoRequest {
    /// The file; its filename and content type are stored with the record.
    #[schema(value_type = String, format = Binary)]
    pub data: Vec<u8>,
}
