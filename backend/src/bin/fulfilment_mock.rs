//! Run the grocery fulfilment mock service.

use std::net::TcpListener;

use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use checkout_backend::fulfilment_mock::{SHOPPING_CART_ROUTE, build_server};
use checkout_backend::settings::FulfilmentSettings;

const WORKERS: usize = 2;

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

    let settings = FulfilmentSettings::load().wrap_err("failed to load fulfilment settings")?;
    let bind_addr = settings.bind_addr()?;
    let listener =
        TcpListener::bind(bind_addr).wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, route = SHOPPING_CART_ROUTE, "fulfilment mock listening");
    build_server(listener, WORKERS)?.await?;
    Ok(())
}
