use axum::Json;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
    // not-found on a photo is answered with a bare status line
    pub has_body: bool,
}

impl CodeError {
    pub const PHOTO_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Photo not found!",
        log_level: Level::INFO,
        has_body: false,
    };
    pub const MISSING_UPLOAD_PART: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Required multipart part is missing!",
        log_level: Level::WARN,
        has_body: true,
    };
    pub const FILE_UPLOAD_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not read uploaded file!",
        log_level: Level::ERROR,
        has_body: true,
    };
    pub const STORAGE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Photo storage operation failed!",
        log_level: Level::ERROR,
        has_body: true,
    };
    pub const INVALID_PATH: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Invalid path!",
        log_level: Level::DEBUG,
        has_body: true,
    };
    pub const PAYLOAD_TOO_LARGE: CodeError = CodeError {
        success: false,
        error_code: 5,
        http_status_code: StatusCode::PAYLOAD_TOO_LARGE,
        message: "Upload exceeds the size limit!",
        log_level: Level::WARN,
        has_body: true,
    };
}

pub fn code_err(cerr: CodeError, e: impl ToString) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message.to_string(),
        error_message: e.to_string(),
        log_level: cerr.log_level,
        has_body: cerr.has_body,
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        let message = cerr.message;
        code_err(cerr, message)
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    pub message: String,
    pub error_message: String,
    #[serde(skip)]
    pub log_level: Level,
    #[serde(skip)]
    pub has_body: bool,
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

// The x-error-* headers are read and stripped again by the logging middleware.
impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let mut response = if self.has_body {
            (self.http_status_code, Json(&self)).into_response()
        } else {
            self.http_status_code.into_response()
        };

        let headers = response.headers_mut();
        let error_headers = [
            ("x-error-log-level", self.log_level.to_string()),
            ("x-error-status-code", self.http_status_code.as_u16().to_string()),
            ("x-error-code", self.error_code.to_string()),
            ("x-error-message", self.message),
            ("x-error-detail", self.error_message),
        ];
        for (name, value) in error_headers {
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(name, value);
            }
        }

        response
    }
}
