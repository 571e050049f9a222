//! HTTP response building module
//!
//! Builders for every status this server produces. All failures are
//! materialized here as fully-formed responses; nothing above this layer
//! ever sees a bare error.

use crate::http::body::{self, ResponseBody};
use crate::logger;
use hyper::Response;

/// Build 200 OK response streaming a whole file
pub fn build_file_response(
    resp_body: ResponseBody,
    content_type: &str,
    content_encoding: Option<&str>,
    last_modified: &str,
    size: u64,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", size)
        .header("Last-Modified", last_modified)
        .header("Accept-Ranges", "bytes");

    if let Some(encoding) = content_encoding {
        builder = builder.header("Content-Encoding", encoding);
    }

    builder.body(resp_body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(body::empty())
    })
}

/// Build 206 Partial Content response for an inclusive byte span
pub fn build_partial_response(
    resp_body: ResponseBody,
    content_type: &str,
    content_encoding: Option<&str>,
    last_modified: &str,
    start: u64,
    end: u64,
    total_size: u64,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", end - start + 1)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Last-Modified", last_modified)
        .header("Accept-Ranges", "bytes");

    if let Some(encoding) = content_encoding {
        builder = builder.header("Content-Encoding", encoding);
    }

    builder.body(resp_body).unwrap_or_else(|e| {
        log_build_error("206", &e);
        Response::new(body::empty())
    })
}

/// Build 304 Not Modified response
///
/// Carries no body but still reports the file's Last-Modified time.
pub fn build_304_response(last_modified: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(304)
        .header("Last-Modified", last_modified)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(body::empty())
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<ResponseBody> {
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .body(body::full("403 Forbidden"))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(body::full("403 Forbidden"))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(body::full("404 Not Found"))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(body::full("404 Not Found"))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(body::full("405 Method Not Allowed"))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(body::full("405 Method Not Allowed"))
        })
}

/// Build 416 Range Not Satisfiable response
///
/// Content-Range reports the true size so the client can retry with a
/// valid range.
pub fn build_416_response(file_size: u64) -> Response<ResponseBody> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(body::empty())
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
