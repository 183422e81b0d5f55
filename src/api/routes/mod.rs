//! # API Routes Module
//!
//! Configures HTTP routes for the proxy service.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/api/rpc` - JSON-RPC forwarding proxy

pub mod health;
pub mod rpc;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init).configure(rpc::init);
}
