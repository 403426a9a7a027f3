use axum::{Json, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::FieldViolation;
use storefront_products::ProductDraft;

// -------------------------
// Request DTOs
// -------------------------

/// Product body for create, update and patch.
///
/// Both fields are optional on the wire; a missing or `null` field becomes an
/// empty name / zero price. Any client-supplied `id` is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,
}

impl From<ProductRequest> for ProductDraft {
    fn from(body: ProductRequest) -> Self {
        ProductDraft::new(body.name.unwrap_or_default(), body.price.unwrap_or_default())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub name: Option<String>,
}

// -------------------------
// Response envelopes
// -------------------------

/// `{status, data}`
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub status: u16,
    pub data: T,
}

/// `{status, error}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub error: String,
}

/// `{status, errors}`
#[derive(Debug, Serialize)]
pub struct ValidationEnvelope {
    pub status: u16,
    pub errors: Vec<FieldViolation>,
}

/// Wrap `data` in the success envelope with a matching HTTP status.
pub fn data_response<T: Serialize>(status: StatusCode, data: T) -> axum::response::Response {
    (
        status,
        Json(DataEnvelope {
            status: status.as_u16(),
            data,
        }),
    )
        .into_response()
}
