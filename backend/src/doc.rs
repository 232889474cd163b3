//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the checkout and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`]. Exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::checkout::CheckoutResponse;
use crate::inbound::http::schemas::{AggregatedItemSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the checkout REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Checkout backend API",
        description = "Turns a user's recipe cart into one grocery order.",
        license(
            name = "ISC",
            url = "https://opensource.org/licenses/ISC"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::checkout::checkout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CheckoutResponse,
        AggregatedItemSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "checkout", description = "Cart checkout and order placement"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
