//! Reqwest-backed grocery fulfilment adapter.
//!
//! This adapter owns transport details only: payload serialisation, the
//! request timeout, HTTP status mapping and JSON decoding of the order
//! confirmation. It never retries; wrap it in
//! [`crate::domain::RetryingGroceryFulfilment`] for that.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info, warn};

use super::dto::{ShoppingCartRequestDto, ShoppingCartResponseDto};
use crate::domain::AggregatedItem;
use crate::domain::ports::{
    CheckoutResult, GroceryFulfilment, GroceryFulfilmentError, PlacedOrder,
};

/// Path of the shopping cart endpoint relative to the service base URL.
pub const SHOPPING_CART_PATH: &str = "api/shopping-cart";

/// Errors raised while constructing a [`GroceryHttpClient`].
#[derive(Debug, thiserror::Error)]
pub enum GroceryClientBuildError {
    /// The base URL cannot have paths appended (e.g. `mailto:`).
    #[error("grocery base URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),
    /// The underlying reqwest client failed to build.
    #[error("failed to build grocery HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Grocery fulfilment adapter posting shopping lists to one endpoint.
///
/// Cheap to construct; configuration is passed in rather than read globally
/// so tests can aim it at a local server.
#[derive(Debug, Clone)]
pub struct GroceryHttpClient {
    client: Client,
    endpoint: Url,
}

impl GroceryHttpClient {
    /// Build an adapter for `base_url` with an explicit request timeout.
    ///
    /// ```rust,ignore
    /// let base = Url::parse("http://grocery:8080/")?;
    /// let client = GroceryHttpClient::new(&base, Duration::from_secs(10))?;
    /// assert_eq!(client.endpoint().as_str(), "http://grocery:8080/api/shopping-cart");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, GroceryClientBuildError> {
        let endpoint = shopping_cart_endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Fully resolved shopping cart endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn submit(&self, items: &[AggregatedItem]) -> CheckoutResult {
        let payload = ShoppingCartRequestDto { items };
        info!(url = %self.endpoint, items = items.len(), "sending shopping list to grocery service");
        debug!(payload = ?payload, "grocery request payload");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_body_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_order(body.as_ref())
    }
}

#[async_trait]
impl GroceryFulfilment for GroceryHttpClient {
    async fn place_order(&self, items: &[AggregatedItem]) -> CheckoutResult {
        let outcome = self.submit(items).await;
        match &outcome {
            Ok(order) => info!(
                order_id = %order.order_id,
                items = order.items.len(),
                message = %order.message,
                "grocery service accepted shopping list"
            ),
            Err(GroceryFulfilmentError::MalformedResponse { message }) => {
                warn!(detail = %message, "grocery service returned a malformed response");
            }
            Err(error) => warn!(%error, "grocery service request failed"),
        }
        outcome
    }
}

fn shopping_cart_endpoint(base_url: &Url) -> Result<Url, GroceryClientBuildError> {
    if base_url.cannot_be_a_base() {
        return Err(GroceryClientBuildError::InvalidBaseUrl(base_url.to_string()));
    }
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SHOPPING_CART_PATH)
        .map_err(|error| GroceryClientBuildError::InvalidBaseUrl(format!("{base_url}: {error}")))
}

fn parse_order(body: &[u8]) -> Result<PlacedOrder, GroceryFulfilmentError> {
    let decoded: ShoppingCartResponseDto = serde_json::from_slice(body).map_err(|error| {
        GroceryFulfilmentError::malformed_response(format!("invalid order JSON: {error}"))
    })?;
    decoded
        .into_placed_order()
        .map_err(GroceryFulfilmentError::malformed_response)
}

fn map_transport_error(error: reqwest::Error) -> GroceryFulfilmentError {
    if error.is_timeout() {
        GroceryFulfilmentError::timeout(error.to_string())
    } else {
        GroceryFulfilmentError::transport(error.to_string())
    }
}

/// Body read failures happen after the service answered, so they must not be
/// classified as retryable even when the cause is a timeout.
fn map_body_error(error: reqwest::Error) -> GroceryFulfilmentError {
    GroceryFulfilmentError::interrupted(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GroceryFulfilmentError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    GroceryFulfilmentError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
        format!("{preview}...")
    } else {
        compact
    }
}
