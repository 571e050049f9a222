//! MIME type detection module
//!
//! Derives Content-Type and Content-Encoding from a file path's extension.
//! Detection never looks at file content.

use std::path::Path;

/// Content type and optional content encoding for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    pub content_type: &'static str,
    pub content_encoding: Option<&'static str>,
}

/// Detect content type and encoding from a file path
///
/// A recognized compression suffix sets the encoding and the next inner
/// extension drives the type, so `app.tar.gz` maps to `application/x-tar`
/// with `gzip` encoding.
///
/// # Examples
/// ```
/// use staticd::http::mime::detect;
/// use std::path::Path;
///
/// assert_eq!(detect(Path::new("index.html")).content_type, "text/html; charset=utf-8");
/// assert_eq!(detect(Path::new("site.tar.gz")).content_encoding, Some("gzip"));
/// ```
pub fn detect(path: &Path) -> FileType {
    let (path, content_encoding) = match content_encoding_for(extension_of(path)) {
        Some(enc) => (path.with_extension(""), Some(enc)),
        None => (path.to_path_buf(), None),
    };

    FileType {
        content_type: content_type_for(extension_of(&path)),
        content_encoding,
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Map a compression suffix to its Content-Encoding token
fn content_encoding_for(extension: Option<&str>) -> Option<&'static str> {
    match extension {
        Some("gz" | "gzip") => Some("gzip"),
        Some("bz2") => Some("bzip2"),
        Some("xz") => Some("xz"),
        Some("br") => Some("br"),
        Some("zst") => Some("zstd"),
        _ => None,
    }
}

/// Get MIME Content-Type based on file extension
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg" | "ogv") => "video/ogg",
        Some("mov") => "video/quicktime",

        // Audio
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents and archives
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("tar") => "application/x-tar",

        // Default
        _ => "application/octet-stream",
    }
}
