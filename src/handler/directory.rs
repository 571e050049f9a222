//! Directory responder module
//!
//! Serves files beneath a fixed root directory. Path resolution is
//! delegated to [`resolve`](crate::handler::resolve); everything that
//! resolves to a regular file is handed to a responder factory, which
//! defaults to the single-file responder and can be swapped for testing or
//! customization. Configured once at startup and shared read-only across
//! requests.

use crate::handler::router::RequestContext;
use crate::handler::{file, resolve};
use crate::http::{self, ResponseBody};
use hyper::Response;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a responder factory.
pub type ResponderFuture = Pin<Box<dyn Future<Output = Response<ResponseBody>> + Send>>;

/// Strategy producing a response for a resolved file path.
///
/// Receives the canonical path, the request context, and the configured
/// content-type override.
pub type ResponderFactory =
    Arc<dyn Fn(PathBuf, RequestContext, Option<String>) -> ResponderFuture + Send + Sync>;

/// Maps URL paths onto files beneath a root directory.
pub struct DirectoryResponder {
    root: PathBuf,
    content_type: Option<String>,
    factory: ResponderFactory,
}

impl DirectoryResponder {
    /// Create a responder over an existing directory
    ///
    /// The root is canonicalized once here. A root that is missing or not a
    /// directory is a configuration error and fails construction; it is
    /// never reported per request.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("serve root is not a directory: {}", root.display()),
            ));
        }

        Ok(Self {
            root,
            content_type: None,
            factory: Arc::new(|path, ctx, content_type| {
                Box::pin(async move { file::respond(&path, &ctx, content_type.as_deref()).await })
            }),
        })
    }

    /// Set a fixed content type, short-circuiting per-file detection
    #[must_use]
    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    /// Replace the file-responder factory
    #[must_use]
    pub fn with_factory(mut self, factory: ResponderFactory) -> Self {
        self.factory = factory;
        self
    }

    /// The canonical root being served
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Respond to a request for `request_path` beneath the root
    pub async fn respond(&self, request_path: &str, ctx: RequestContext) -> Response<ResponseBody> {
        let path = match resolve::resolve(&self.root, request_path) {
            Ok(p) => p,
            Err(resolve::ResolveError::NotFound) => return http::build_404_response(),
            Err(resolve::ResolveError::Escapes | resolve::ResolveError::Denied) => {
                return http::build_403_response()
            }
        };

        // Only regular files are served: the root itself, the empty path,
        // and subdirectories all answer 404 since listings are out of scope
        if !path.is_file() {
            return http::build_404_response();
        }

        (self.factory)(path, ctx, self.content_type.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::Method;
    use std::fs;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn ctx(method: Method) -> RequestContext {
        RequestContext {
            method,
            if_modified_since: None,
            range: None,
        }
    }

    async fn body_of(resp: Response<ResponseBody>) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_serves_contained_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bar"), b"abcde").unwrap();
        let responder = DirectoryResponder::new(dir.path()).unwrap();

        let resp = responder.respond("/bar", ctx(Method::GET)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await, b"abcde");
    }

    #[tokio::test]
    async fn test_escape_to_sibling_is_403() {
        // /TEST_DIR/bar exists, /TEST_DIR/foo is served; the file is real
        // but outside the root
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bar"), b"abcde").unwrap();
        let serve_path = dir.path().join("foo");
        fs::create_dir(&serve_path).unwrap();
        let responder = DirectoryResponder::new(&serve_path).unwrap();

        let resp = responder.respond("/../bar", ctx(Method::GET)).await;
        assert_eq!(resp.status(), 403);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let responder = DirectoryResponder::new(dir.path()).unwrap();

        let resp = responder.respond("/foo", ctx(Method::GET)).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_root_and_empty_path_are_404() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bar"), b"abcde").unwrap();
        let responder = DirectoryResponder::new(dir.path()).unwrap();

        assert_eq!(responder.respond("/", ctx(Method::GET)).await.status(), 404);
        assert_eq!(responder.respond("", ctx(Method::GET)).await.status(), 404);
    }

    #[tokio::test]
    async fn test_subdirectory_is_404() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let responder = DirectoryResponder::new(dir.path()).unwrap();

        let resp = responder.respond("/sub", ctx(Method::GET)).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_content_type_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bar"), b"abcde").unwrap();
        let responder = DirectoryResponder::new(dir.path())
            .unwrap()
            .with_content_type(Some("xxx/yyy".to_string()));

        let resp = responder.respond("/bar", ctx(Method::GET)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
            "xxx/yyy"
        );
    }

    #[tokio::test]
    async fn test_custom_factory_is_invoked() {
        static CALLED: AtomicBool = AtomicBool::new(false);

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bar"), b"abcde").unwrap();
        let responder = DirectoryResponder::new(dir.path())
            .unwrap()
            .with_factory(Arc::new(|_path, _ctx, _ct| {
                CALLED.store(true, Ordering::SeqCst);
                Box::pin(async { Response::new(crate::http::body::empty()) })
            }));

        responder.respond("/bar", ctx(Method::GET)).await;
        assert!(CALLED.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_root_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("bar");
        fs::write(&file_path, b"abcde").unwrap();

        assert!(DirectoryResponder::new(&file_path).is_err());
        assert!(DirectoryResponder::new(dir.path().join("missing")).is_err());
    }
}
