//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; these
//! wrappers mirror their structure and register them with utoipa.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or the cart is empty.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The cart store is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The grocery fulfilment service failed.
    #[schema(rename = "bad_gateway")]
    BadGateway,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "bad_gateway")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "transport error: timed out")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::AggregatedItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AggregatedItem)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AggregatedItemSchema {
    /// Ingredient name, case-sensitive.
    #[schema(example = "Milk")]
    name: String,
    /// Summed amount across all recipes in the cart.
    #[schema(example = 3, minimum = 0)]
    quantity: u32,
    /// Measurement unit of the first occurrence.
    #[schema(example = "l")]
    unit: String,
}
