//! JSON response envelope shared by every endpoint.
//!
//! ```json
//! { "status": true,  "message": "Checkout successful", "data": { ... } }
//! { "status": false, "message": "Product not found: 99" }
//! ```

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Response envelope. `data` is omitted when there is none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Envelope {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            status: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed response.
    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            status: false,
            message: message.into(),
            data: None,
        }
    }
}

/// `200 OK` with data.
pub fn ok<T: Serialize>(message: &str, data: T) -> Json<Envelope<T>> {
    Json(Envelope::ok(message, data))
}

/// `201 Created` with data.
pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope::ok(message, data)))
}
