//! Standard response envelope helpers.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Failed,
}

/// `{status, data}` wrapper shared by every `/api/v1` response.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub status: Status,
    pub data: T,
}

#[derive(Serialize, Debug)]
pub struct ErrorData {
    pub error: Value,
}

/// Success envelope; the status code is left at 200.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: Status::Ok,
        data,
    })
}

pub fn failed(error: Value) -> Json<Envelope<ErrorData>> {
    Json(Envelope {
        status: Status::Failed,
        data: ErrorData { error },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_shape() {
        let Json(env) = ok(vec![1, 2]);
        let v = serde_json::to_value(env).unwrap();
        assert_eq!(v, serde_json::json!({"status": "OK", "data": [1, 2]}));
    }

    #[test]
    fn failed_envelope_shape() {
        let Json(env) = failed(Value::String("boom".into()));
        let v = serde_json::to_value(env).unwrap();
        assert_eq!(v, serde_json::json!({"status": "FAILED", "data": {"error": "boom"}}));
    }
}
