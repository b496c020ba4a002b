//! Success response helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Plain acknowledgement body, e.g. after update or delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct Detail {
    pub detail: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn detail(message: &str) -> (StatusCode, Json<Detail>) {
    ok(Detail {
        detail: message.to_string(),
    })
}
