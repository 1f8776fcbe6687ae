use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, Response},
    middleware::Next,
};
use tokio::time::Instant;
use tracing::Level;

use crate::init::state::ServerState;

const ERROR_HEADERS: [&str; 5] = [
    "x-error-log-level",
    "x-error-status-code",
    "x-error-code",
    "x-error-message",
    "x-error-detail",
];

// by default, debug and below not logged at all; hence why
macro_rules! log_codeerror {
    ($level:expr, $kind:expr, response.method = $method:expr, response.path = $path:expr, response.client_ip = $client_ip:expr, response.status_code = $status_code:expr, response.duration = $duration:expr, response.error_code = $error_code:expr, response.message = $message:expr, response.detail = $detail:expr) => {
        match $level {
            Level::ERROR => tracing::error!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = ?$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::WARN => tracing::warn!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = ?$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::INFO => tracing::info!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = ?$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::DEBUG => tracing::debug!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = ?$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::TRACE => tracing::trace!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = ?$duration, error_code = %$error_code, message = %$message, detail = %$detail),
        }
    };
}

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    // Not present when the router is driven without a socket (tests).
    let peer: Option<SocketAddr> = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let client_ip: Option<String> = match request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        Some(val) => Some(val.to_owned()),
        None => peer.map(|addr| addr.ip().to_string()),
    };

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);

    let mut response = next.run(request).await;
    let duration = start.elapsed();

    if response.status().is_success() {
        tracing::info!(kind = %"RESP", method = %method, path = %path, client_ip = ?client_ip, status_code = %response.status().as_u16(), duration = ?duration);
    } else {
        let headers = response.headers_mut();

        let log_level = header_value_to_str(headers.get("x-error-log-level")).unwrap_or("INFO");
        let status_code = header_value_to_str(headers.get("x-error-status-code")).unwrap_or("");
        let error_code = header_value_to_str(headers.get("x-error-code")).unwrap_or("");
        let message = header_value_to_str(headers.get("x-error-message")).unwrap_or("");
        let detail = header_value_to_str(headers.get("x-error-detail")).unwrap_or("");

        log_codeerror!(
            log_level.parse::<Level>().unwrap_or(Level::ERROR),
            "ERSP",
            response.method = method,
            response.path = path,
            response.client_ip = client_ip,
            response.status_code = status_code,
            response.duration = duration,
            response.error_code = error_code,
            response.message = message,
            response.detail = detail
        );

        for name in ERROR_HEADERS {
            headers.remove(name);
        }
    }

    if let Ok(server_name) = HeaderValue::from_str(&state.get_app_name_version()) {
        response.headers_mut().insert("x-server-name", server_name);
    }

    response
}

fn header_value_to_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::create_test_server;

    #[tokio::test]
    async fn stamps_server_name_and_strips_error_headers() {
        let server = create_test_server();

        let ok = server.get("/").await;
        assert_eq!(ok.headers().get("x-server-name").unwrap(), "photoz test");

        let missing = server.get("/photoz/never-created").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(missing.headers().get("x-server-name").unwrap(), "photoz test");
        for name in super::ERROR_HEADERS {
            assert!(missing.headers().get(name).is_none(), "{name} leaked");
        }
    }
}
