//! Conditional request support
//!
//! HTTP-date parsing and formatting for `If-Modified-Since` and
//! `Last-Modified`. Comparisons are made at whole-second precision, matching
//! the resolution of the wire format.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a timestamp as an RFC 7231 IMF-fixdate, e.g.
/// `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date header value
///
/// Accepts the RFC 2822 family of date formats, which covers IMF-fixdate and
/// the obsolete zone names clients still send. Malformed values are treated
/// as an absent header.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Truncate a filesystem modification time to whole seconds
pub fn modified_at(time: SystemTime) -> DateTime<Utc> {
    let time = DateTime::<Utc>::from(time);
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or(time)
}

/// Whether a request carrying `if_modified_since` may be answered 304
///
/// True when the client's timestamp is at or after the file's modification
/// time. Both sides are second-precision.
pub fn not_modified(if_modified_since: DateTime<Utc>, last_modified: DateTime<Utc>) -> bool {
    if_modified_since >= last_modified
}
