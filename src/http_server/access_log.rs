//! Per-request access logging
//!
//! Every response gets an `x-request-id` header; the same id is logged
//! with method, path, status and elapsed time.

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::observability::{Event, Logger, Timer};

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware body for `axum::middleware::from_fn`
pub async fn access_log(request: Request, next: Next) -> Response {
    let timer = Timer::new();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    Logger::event(
        event_for(status),
        &[
            ("elapsed_ms", timer.elapsed_ms().as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
            ("status", status.as_str()),
        ],
    );

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn event_for(status: StatusCode) -> Event {
    if status.is_server_error() {
        Event::RequestFailed
    } else if status.is_client_error() {
        Event::RequestRejected
    } else {
        Event::RequestComplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_for_status() {
        assert_eq!(event_for(StatusCode::OK), Event::RequestComplete);
        assert_eq!(event_for(StatusCode::CREATED), Event::RequestComplete);
        assert_eq!(event_for(StatusCode::NOT_FOUND), Event::RequestRejected);
        assert_eq!(
            event_for(StatusCode::INTERNAL_SERVER_ERROR),
            Event::RequestFailed
        );
    }
}
