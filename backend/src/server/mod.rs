//! Server construction and middleware wiring for the checkout backend.

mod state_builders;

pub use state_builders::{StartupError, build_http_state};

use std::net::TcpListener;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::inbound::http::checkout::checkout;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(checkout);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct the checkout HTTP server on an already-bound listener.
///
/// The health state is marked ready once the server is built; the returned
/// [`Server`] must be awaited (or spawned) to accept connections.
///
/// # Errors
/// Propagates [`std::io::Error`] when the listener cannot be adopted.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    listener: TcpListener,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .listen(listener)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
