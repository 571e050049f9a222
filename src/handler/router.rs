//! Request dispatch module
//!
//! Entry point for HTTP request processing: extracts the request context,
//! hands the path to the directory responder, and emits the access log
//! entry. Every outcome is a fully-formed response; this layer adds no
//! status codes of its own.

use crate::config::AppState;
use crate::http::range::ByteRange;
use crate::http::{conditional, ResponseBody};
use crate::logger;
use crate::logger::AccessLogEntry;
use chrono::{DateTime, Utc};
use hyper::body::Incoming;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Conditional and range fields of one request, read-only for responders.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub if_modified_since: Option<DateTime<Utc>>,
    pub range: Option<ByteRange>,
}

impl RequestContext {
    /// Extract the context from request headers
    ///
    /// Malformed conditional or range headers are treated as absent.
    pub fn from_request(req: &Request<Incoming>) -> Self {
        Self {
            method: req.method().clone(),
            if_modified_since: header_str(req, "if-modified-since")
                .and_then(conditional::parse_http_date),
            range: header_str(req, "range").and_then(ByteRange::parse),
        }
    }
}

fn header_str<'a>(req: &'a Request<Incoming>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);
    let path = req.uri().path().to_string();

    let response = state.responder.respond(&path, ctx).await;

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: req.method().to_string(),
            path,
            status: response.status().as_u16(),
            body_bytes: content_length_of(&response),
            user_agent: header_str(&req, "user-agent").map(ToString::to_string),
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Bytes the response will carry, taken from its own Content-Length
fn content_length_of(response: &Response<ResponseBody>) -> u64 {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
