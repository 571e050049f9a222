//! Static-content HTTP server
//!
//! Serves files from a fixed root directory over HTTP/1.1 with conditional
//! requests, byte ranges, and streaming bodies. All protocol and security
//! logic lives in [`handler`]; [`http`] holds the protocol-level building
//! blocks; [`server`] is the tokio/hyper transport around them.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
