// src/responses/errors.rs
use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into a JSON error response.
/// Server-side failures are logged here and reported generically.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Not Found".to_string(),
        ServerError::BadRequest(msg) => {
            tracing::warn!("bad request: {msg}");
            msg.clone()
        }
        ServerError::DbError(msg) => {
            tracing::error!("database error: {msg}");
            "Internal Server Error".to_string()
        }
        ServerError::InternalError => {
            tracing::error!("internal error");
            "Internal Server Error".to_string()
        }
    };
    json_error_response(status, &message)
}

/// Build `{"error": message}` with the given status.
pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
