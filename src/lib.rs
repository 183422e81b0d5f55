//! Veil RPC: a privacy-first Solana RPC forwarding proxy with a thin swap SDK.
//!
//! The binary target runs the HTTP proxy that relays JSON-RPC 2.0 requests to a
//! backend endpoint configured at request time. The library exposes the client
//! side: a relay client speaking JSON-RPC through the proxy, a Jupiter
//! aggregator client for quotes and swap instructions, and the swap executor
//! that stitches quote, build, sign, submit and confirmation together.

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
