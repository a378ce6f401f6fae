use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{AppContext, error::ApiError};

/// Serializes `body` honouring the configured JSON formatting.
pub fn json_response<T: Serialize>(
    ctx: &AppContext,
    status: StatusCode,
    body: &T,
) -> Result<Response, ApiError> {
    let body = if ctx.config().pretty_json {
        serde_json::to_vec_pretty(body)?
    } else {
        serde_json::to_vec(body)?
    };

    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
