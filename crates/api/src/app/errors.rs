use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use storefront_core::DomainError;

use crate::app::dto::{ErrorEnvelope, ValidationEnvelope};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const INVALID_PRODUCT_ID: &str = "invalid product id";

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            Json(ValidationEnvelope {
                status: StatusCode::BAD_REQUEST.as_u16(),
                errors,
            }),
        )
            .into_response(),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND),
    }
}

/// Unparsable or wrongly-typed bodies are 400s; other rejections (missing
/// content type, unreadable body) keep axum's status. All use our envelope.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    let status = match &rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => rejection.status(),
    };
    json_error(status, rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorEnvelope {
            status: status.as_u16(),
            error: message.into(),
        }),
    )
        .into_response()
}
