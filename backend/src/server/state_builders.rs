//! Builders wiring settings into the checkout use-case.

use std::sync::Arc;

use tracing::info;

use crate::domain::{CheckoutService, RetryingGroceryFulfilment};
use crate::inbound::http::state::HttpState;
use crate::outbound::grocery::{GroceryClientBuildError, GroceryHttpClient};
use crate::outbound::memory::{CartFixture, CartFixtureError, InMemoryCartRepository};
use crate::settings::{CheckoutSettings, SettingsError};

/// Failures assembling the checkout pipeline at start-up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A configuration value is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The cart fixture could not be loaded.
    #[error(transparent)]
    CartFixture(#[from] CartFixtureError),
    /// The grocery HTTP client could not be built.
    #[error(transparent)]
    GroceryClient(#[from] GroceryClientBuildError),
}

fn build_cart_store(settings: &CheckoutSettings) -> Result<InMemoryCartRepository, StartupError> {
    match settings.cart_fixture() {
        Some(path) => {
            let fixture = CartFixture::from_file(path)?;
            info!(
                path = %path.display(),
                recipes = fixture.recipes.len(),
                cart_entries = fixture.carts.len(),
                "seeding cart store from fixture"
            );
            Ok(InMemoryCartRepository::from_fixture(fixture)?)
        }
        None => {
            info!("no cart fixture configured; starting with an empty cart store");
            Ok(InMemoryCartRepository::new())
        }
    }
}

/// Build HTTP state backed by the in-memory cart store and the grocery
/// HTTP client wrapped in the retry decorator.
///
/// # Errors
/// Returns [`StartupError`] for invalid settings, an unreadable fixture or a
/// client that cannot be constructed.
pub fn build_http_state(settings: &CheckoutSettings) -> Result<HttpState, StartupError> {
    let base_url = settings.grocery_base_url()?;
    let timeout = settings.grocery_timeout()?;
    let policy = settings.retry_policy()?;

    let carts = Arc::new(build_cart_store(settings)?);
    let client = GroceryHttpClient::new(&base_url, timeout)?;
    info!(
        endpoint = %client.endpoint(),
        timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        max_attempts = policy.max_attempts,
        "grocery fulfilment client configured"
    );
    let fulfilment = Arc::new(RetryingGroceryFulfilment::new(Arc::new(client), policy));

    Ok(HttpState::new(Arc::new(CheckoutService::new(carts, fulfilment))))
}
