//! # API Module
//!
//! HTTP surface of the proxy: route configuration and handlers.

pub mod routes;

pub use routes::configure_routes;
