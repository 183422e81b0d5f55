use actix_web::{middleware, App, HttpServer};
use color_eyre::Result;
use dotenvy::dotenv;
use log::{info, warn};

use veil_rpc::api::routes::configure_routes;
use veil_rpc::config::{backend_rpc_endpoint, ServerConfig};
use veil_rpc::logging::setup_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    color_eyre::install()?;

    setup_logging();

    let config = ServerConfig::from_env();

    // The backend endpoint is read per request, so a missing value is not
    // fatal here. Warn early anyway so misconfiguration is visible at boot.
    if backend_rpc_endpoint().is_err() {
        warn!("BACKEND_RPC_ENDPOINT is not set; RPC forwarding will fail until it is");
    }

    info!("Starting server on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(5);

    info!("Server running at http://{}:{}", config.host, config.port);

    server.run().await?;
    Ok(())
}
