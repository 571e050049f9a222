//! Single-file responder module
//!
//! Produces a complete HTTP response for one filesystem path: method
//! validation, conditional and range handling, and a streaming body. Each
//! call opens its own file handle and holds no state across requests.

use crate::handler::router::RequestContext;
use crate::http::range::RangeResolution;
use crate::http::{self, body, conditional, mime, ResponseBody};
use hyper::{Method, Response};
use std::io::{self, SeekFrom};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

/// Respond with the file at `path`
///
/// `content_type` overrides extension-based detection when set. Open and
/// stat failures are collapsed to two outcomes so filesystem details never
/// leak: a missing entry is 404, everything else is 403.
pub async fn respond(
    path: &Path,
    ctx: &RequestContext,
    content_type: Option<&str>,
) -> Response<ResponseBody> {
    if ctx.method != Method::GET && ctx.method != Method::HEAD {
        return http::build_405_response();
    }
    let is_head = ctx.method == Method::HEAD;

    let mut file = match File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return http::build_404_response(),
        Err(_) => return http::build_403_response(),
    };
    let (size, modified) = match stat(&file).await {
        Ok(meta) => meta,
        Err(_) => return http::build_403_response(),
    };
    let last_modified = conditional::http_date(modified);

    let file_type = mime::detect(path);
    let content_type = content_type.unwrap_or(file_type.content_type);

    if let Some(since) = ctx.if_modified_since {
        if conditional::not_modified(since, modified) {
            return http::build_304_response(&last_modified);
        }
    }

    // Range applies to GET only; HEAD answers with full-size headers
    if let Some(range) = ctx.range {
        if !is_head {
            return match range.resolve(size) {
                RangeResolution::Satisfiable { start, end } => {
                    if start > 0 && file.seek(SeekFrom::Start(start)).await.is_err() {
                        return http::build_403_response();
                    }
                    http::build_partial_response(
                        body::range_body(file, end - start + 1),
                        content_type,
                        file_type.content_encoding,
                        &last_modified,
                        start,
                        end,
                        size,
                    )
                }
                RangeResolution::Unsatisfiable => http::build_416_response(size),
            };
        }
    }

    let resp_body = if is_head {
        body::empty()
    } else {
        body::range_body(file, size)
    };
    http::build_file_response(
        resp_body,
        content_type,
        file_type.content_encoding,
        &last_modified,
        size,
    )
}

/// Size and second-precision modification time of an open file
///
/// Anything that is not a regular file is reported as an error so the
/// caller lands in the 403 class.
async fn stat(file: &File) -> io::Result<(u64, chrono::DateTime<chrono::Utc>)> {
    let meta = file.metadata().await?;
    if !meta.is_file() {
        return Err(io::Error::other("not a regular file"));
    }
    Ok((meta.len(), conditional::modified_at(meta.modified()?)))
}
