//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CheckoutCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub checkout: Arc<dyn CheckoutCommand>,
}

impl HttpState {
    /// Construct state from the checkout use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use checkout_backend::domain::CheckoutService;
    /// use checkout_backend::domain::ports::FixtureGroceryFulfilment;
    /// use checkout_backend::inbound::http::state::HttpState;
    /// use checkout_backend::outbound::memory::InMemoryCartRepository;
    ///
    /// let service = CheckoutService::new(
    ///     Arc::new(InMemoryCartRepository::new()),
    ///     Arc::new(FixtureGroceryFulfilment),
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _checkout = state.checkout.clone();
    /// ```
    pub fn new(checkout: Arc<dyn CheckoutCommand>) -> Self {
        Self { checkout }
    }
}
