//! Checkout backend entry-point: loads settings, wires the checkout pipeline
//! and serves the REST API.

use std::net::TcpListener;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use checkout_backend::inbound::http::health::HealthState;
use checkout_backend::server::{build_http_state, create_server};
use checkout_backend::settings::CheckoutSettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CheckoutSettings::load().wrap_err("failed to load checkout settings")?;
    let bind_addr = settings.bind_addr()?;
    let http_state = build_http_state(&settings).wrap_err("failed to build checkout pipeline")?;

    let listener =
        TcpListener::bind(bind_addr).wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, listener)?;
    info!(%bind_addr, "checkout backend listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested; failing liveness while draining");
            health_state.mark_unhealthy();
            handle.stop(true).await;
        }
    });

    server.await?;
    Ok(())
}
