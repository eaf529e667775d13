//! Request/response logging for REST calls.
//!
//! Events are emitted with the `tracing` crate inside the `http_request` span
//! opened by [`RestClient`](crate::RestClient). Request events carry an
//! `event_id` derived from the method, response events the status code.

use tracing::{debug, error, warn};

use crate::{Error, JsonContent, Method, Response};

/// Logs a request about to be dispatched, with its body text when present.
pub(crate) fn log_request(method: Method, uri: &str, content: Option<&JsonContent>) {
    let event_id = method.event_id();

    match content {
        Some(content) => {
            let body = content
                .as_text()
                .unwrap_or_else(|err| format!("<{err}>"));
            debug!(
                event_id,
                method = %method,
                uri,
                content_type = "JsonContent",
                media_type = content.media_type(),
                content = %body,
                "sending request"
            );
        }
        None => {
            debug!(event_id, method = %method, uri, "sending request");
        }
    }
}

/// Logs a 2xx response.
pub(crate) fn log_success(method: Method, path_and_query: &str, response: &Response) {
    let status = response.status().as_u16();
    debug!(
        event_id = status,
        method = %method,
        path_and_query,
        status,
        reason = response.reason_phrase().unwrap_or_default(),
        "request completed"
    );
}

/// Logs a non-2xx response with its payload, or why the payload could not be read.
pub(crate) fn log_failure(
    method: Method,
    path_and_query: &str,
    response: &Response,
    payload: Result<&str, &Error>,
) {
    let status = response.status().as_u16();
    let reason = response.reason_phrase().unwrap_or_default();

    match payload {
        Ok(payload) => {
            error!(
                event_id = status,
                method = %method,
                path_and_query,
                status,
                reason,
                payload,
                "request failed with HTTP error"
            );
        }
        Err(err) => {
            error!(
                event_id = status,
                method = %method,
                path_and_query,
                status,
                reason,
                error = %err,
                "request failed with HTTP error, payload unreadable"
            );
        }
    }
}

/// Logs a transport failure (no response received).
pub(crate) fn log_transport_error(method: Method, path_and_query: &str, err: &Error) {
    warn!(method = %method, path_and_query, error = %err, "request failed");
}
