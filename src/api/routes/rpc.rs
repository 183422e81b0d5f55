//! JSON-RPC forwarding proxy endpoint.
//!
//! `POST /api/rpc` validates the envelope, forwards the body verbatim to the
//! backend endpoint configured at request time, and returns the backend's
//! JSON verbatim with the proxy's marker headers and a measured latency
//! header. `OPTIONS` answers CORS preflights; `GET` serves a static service
//! descriptor.

use actix_web::{
    http::{Method, StatusCode},
    web, HttpResponse, HttpResponseBuilder,
};
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::{backend_rpc_endpoint, ConfigError};
use crate::constants::{FORWARD_TIMEOUT_SECONDS, MARKER_HEADERS, RESPONSE_TIME_HEADER, RPC_PROXY_PATH};
use crate::models::{is_valid_request, JsonRpcErrorCode, JsonRpcResponse};

#[derive(Error, Debug)]
enum ForwardError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Backend RPC request failed: {0}")]
    UpstreamStatus(u16),
    #[error("Backend RPC request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Resolves the backend endpoint and forwards the request body verbatim.
/// The endpoint is read from the environment on every call so operators can
/// repoint the backend without a restart.
async fn forward(client: &Client, body: &Value) -> Result<Value, ForwardError> {
    let endpoint = backend_rpc_endpoint()?;
    let response = client.post(&endpoint).json(body).send().await?;
    if !response.status().is_success() {
        return Err(ForwardError::UpstreamStatus(response.status().as_u16()));
    }
    Ok(response.json().await?)
}

fn with_marker_headers(status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    for (name, value) in MARKER_HEADERS {
        builder.insert_header((name, value));
    }
    builder
}

async fn rpc_proxy(body: web::Bytes, client: web::Data<Client>) -> HttpResponse {
    let started = Instant::now();

    let request: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(error) => {
            warn!("Unparseable RPC request body: {}", error);
            return with_marker_headers(StatusCode::INTERNAL_SERVER_ERROR).json(
                JsonRpcResponse::error(
                    JsonRpcErrorCode::InternalError,
                    error.to_string(),
                    Value::Null,
                ),
            );
        }
    };

    if !is_valid_request(&request) {
        let id = request.get("id").cloned().unwrap_or(Value::Null);
        return with_marker_headers(StatusCode::BAD_REQUEST).json(JsonRpcResponse::error(
            JsonRpcErrorCode::InvalidRequest,
            "Invalid Request",
            id,
        ));
    }

    match forward(&client, &request).await {
        Ok(upstream) => {
            let elapsed = started.elapsed().as_millis();
            debug!(
                "Forwarded {} in {}ms",
                request.get("method").and_then(Value::as_str).unwrap_or("?"),
                elapsed
            );
            with_marker_headers(StatusCode::OK)
                .insert_header((RESPONSE_TIME_HEADER, format!("{elapsed}ms")))
                .json(upstream)
        }
        Err(error) => {
            warn!("RPC forwarding failed: {}", error);
            with_marker_headers(StatusCode::INTERNAL_SERVER_ERROR).json(JsonRpcResponse::error(
                JsonRpcErrorCode::InternalError,
                error.to_string(),
                Value::Null,
            ))
        }
    }
}

/// CORS preflight: empty 200 carrying the marker headers.
async fn rpc_preflight() -> HttpResponse {
    with_marker_headers(StatusCode::OK).finish()
}

/// Static service descriptor for browsers poking the endpoint directly.
async fn rpc_descriptor() -> HttpResponse {
    with_marker_headers(StatusCode::OK).json(json!({
        "name": "VEIL RPC",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "features": [
            "Private transaction routing",
            "MEV protection",
            "JSON-RPC 2.0 forwarding"
        ],
        "usage": {
            "method": "POST",
            "contentType": "application/json",
            "example": {
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getHealth",
                "params": []
            }
        }
    }))
}

fn forward_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(FORWARD_TIMEOUT_SECONDS))
        .build()
        .unwrap_or_default()
}

/// Registers the proxy endpoint with the provided service configuration.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(forward_client())).service(
        web::resource(RPC_PROXY_PATH)
            .route(web::post().to(rpc_proxy))
            .route(web::get().to(rpc_descriptor))
            .route(web::method(Method::OPTIONS).to(rpc_preflight)),
    );
}
