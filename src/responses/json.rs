// src/responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize `value` as the JSON body of a response with `status`.
pub fn json_with_status<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| {
        tracing::error!("failed to serialize response body: {e}");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

pub fn json_response<T: Serialize + ?Sized>(value: &T) -> ResultResp {
    json_with_status(200, value)
}

/// 201 with the id of the row that was created.
pub fn json_created(id: i64) -> ResultResp {
    json_with_status(201, &serde_json::json!({ "id": id }))
}
