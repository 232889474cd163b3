//! Checkout HTTP handler.
//!
//! ```text
//! POST /api/v1/users/{user_id}/checkout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::CheckoutConfirmation;
use crate::domain::{AggregatedItem, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AggregatedItemSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Response payload for a placed order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Identifier minted by the grocery fulfilment service.
    #[schema(example = "6c1a2f0e-4a1b-4d0c-9e55-0f6f3b0b2a11")]
    pub order_id: String,
    /// Confirmation message from the fulfilment service.
    #[schema(example = "Shopping list created successfully")]
    pub message: String,
    /// Items the fulfilment service accepted.
    #[schema(value_type = Vec<AggregatedItemSchema>)]
    pub items: Vec<AggregatedItem>,
}

impl From<CheckoutConfirmation> for CheckoutResponse {
    fn from(value: CheckoutConfirmation) -> Self {
        Self {
            order_id: value.order_id,
            message: value.message,
            items: value.items,
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::invalid_request("user id must be a valid UUID").with_details(json!({
            "field": "userId",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

/// Aggregate the user's cart and submit it to the grocery service.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/checkout",
    description = "Aggregate every recipe in the cart into one shopping list and place it as a single order. The cart is not cleared.",
    params(("user_id" = String, Path, description = "Cart owner (UUID)")),
    responses(
        (status = 200, description = "Order placed", body = CheckoutResponse),
        (status = 400, description = "Invalid user id or empty cart", body = ErrorSchema),
        (status = 502, description = "Grocery fulfilment failed", body = ErrorSchema),
        (status = 503, description = "Cart store unavailable", body = ErrorSchema)
    ),
    tags = ["checkout"],
    operation_id = "checkoutCart"
)]
#[post("/users/{user_id}/checkout")]
pub async fn checkout(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path.into_inner())?;
    let confirmation = state.checkout.checkout(&user_id).await?;
    info!(%user_id, order_id = %confirmation.order_id, "checkout completed");
    Ok(HttpResponse::Ok().json(CheckoutResponse::from(confirmation)))
}
