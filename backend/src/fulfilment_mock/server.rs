//! HTTP server wiring for the fulfilment mock.

use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer};

use super::configure;
use crate::Trace;

/// Build a mock server bound to an already-open listener.
///
/// Callers drive the returned [`Server`]; tests typically bind
/// `127.0.0.1:0` and spawn it on the current runtime.
///
/// # Errors
/// Propagates [`std::io::Error`] when the listener cannot be adopted.
pub fn build_server(listener: TcpListener, workers: usize) -> std::io::Result<Server> {
    let server = HttpServer::new(|| App::new().wrap(Trace).configure(configure))
        .workers(workers.max(1))
        .listen(listener)?
        .run();
    Ok(server)
}
