//! Request handling for the fulfilment mock.

use actix_web::{HttpResponse, web};
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

/// Route served by the mock.
pub const SHOPPING_CART_ROUTE: &str = "/api/shopping-cart";

const SUCCESS_MESSAGE: &str = "Shopping list created successfully";

/// Largest request body the mock buffers. Well above any realistic order so
/// valid lists are never turned away before the body is inspected.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Rejections returned as `400 {"error": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The body is not parseable JSON.
    #[error("Invalid JSON format")]
    InvalidJson,
    /// The body is JSON but has no top-level `items` field.
    #[error("Missing 'items' field in request")]
    MissingItems,
}

impl ProtocolError {
    fn into_response(self) -> HttpResponse {
        HttpResponse::BadRequest().json(json!({ "error": self.to_string() }))
    }
}

/// Pull the `items` value out of a raw request body.
///
/// Any JSON value is accepted for `items`; the mock echoes it untouched.
fn extract_items(body: &[u8]) -> Result<Value, ProtocolError> {
    let document: Value = serde_json::from_slice(body).map_err(|_| ProtocolError::InvalidJson)?;
    match document {
        Value::Object(mut fields) => fields.remove("items").ok_or(ProtocolError::MissingItems),
        _ => Err(ProtocolError::MissingItems),
    }
}

async fn create_shopping_list(body: web::Bytes) -> HttpResponse {
    let items = match extract_items(&body) {
        Ok(items) => items,
        Err(error) => {
            warn!(%error, bytes = body.len(), "rejected shopping list");
            return error.into_response();
        }
    };

    let order_uuid = Uuid::new_v4();
    info!(%order_uuid, "shopping list accepted");
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": SUCCESS_MESSAGE,
        "order_uuid": order_uuid.to_string(),
        "items": items,
    }))
}

/// Register the mock's routes.
///
/// Only `POST` is routed; other methods on the path get `405` and every other
/// path falls through to actix's empty `404`. Bodies up to
/// [`MAX_BODY_BYTES`] are accepted.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(SHOPPING_CART_ROUTE)
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .route(web::post().to(create_shopping_list)),
    );
}
