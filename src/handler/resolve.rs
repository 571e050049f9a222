//! Safe path resolution module
//!
//! Maps a requested URL path onto a filesystem path beneath a fixed root.
//! Escapes are rejected twice: lexically, so `..` can never climb above the
//! root, and again after canonicalization, so symlinks cannot point outside
//! it. Any resolution ambiguity denies the request.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Why a requested path could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The path climbs above or points outside the root
    Escapes,
    /// No filesystem entry at the resolved location
    NotFound,
    /// Resolution failed for any other reason
    Denied,
}

/// Resolve a requested URL path against a canonical root
///
/// `root` must already be canonical. The returned path is canonical and
/// guaranteed to be the root or a descendant of it; existence of the entry
/// is required but its kind (file vs directory) is the caller's concern.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, ResolveError> {
    let relative = normalize(request_path)?;

    let joined = root.join(relative);
    let canonical = match joined.canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ResolveError::NotFound),
        Err(_) => return Err(ResolveError::Denied),
    };

    // Canonicalization followed a symlink out of the root
    if !canonical.starts_with(root) {
        return Err(ResolveError::Escapes);
    }

    Ok(canonical)
}

/// Lexically normalize a URL path into a relative path
///
/// `.` segments are dropped and `..` pops the previous segment; popping past
/// the top is an escape. Absolute-path injection is an escape as well.
fn normalize(request_path: &str) -> Result<PathBuf, ResolveError> {
    let mut relative = PathBuf::new();
    let mut depth: usize = 0;

    for component in Path::new(request_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => {
                relative.push(segment);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(ResolveError::Escapes);
                }
                relative.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(ResolveError::Escapes),
        }
    }

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn root_with_file(name: &str, content: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(name), content).unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    #[test]
    fn test_resolves_contained_file() {
        let (_dir, root) = root_with_file("bar", b"abcde");
        let resolved = resolve(&root, "/bar").unwrap();
        assert_eq!(resolved, root.join("bar"));
    }

    #[test]
    fn test_dotdot_escape_rejected() {
        let (_dir, root) = root_with_file("bar", b"abcde");
        assert_eq!(resolve(&root, "/../bar"), Err(ResolveError::Escapes));
        assert_eq!(resolve(&root, "/a/../../bar"), Err(ResolveError::Escapes));
    }

    #[test]
    fn test_dotdot_within_root_allowed() {
        let (_dir, root) = root_with_file("bar", b"abcde");
        let resolved = resolve(&root, "/sub/../bar").unwrap();
        assert_eq!(resolved, root.join("bar"));
    }

    #[test]
    fn test_missing_entry() {
        let (_dir, root) = root_with_file("bar", b"abcde");
        assert_eq!(resolve(&root, "/missing"), Err(ResolveError::NotFound));
    }

    #[test]
    fn test_empty_path_resolves_to_root() {
        let (_dir, root) = root_with_file("bar", b"abcde");
        assert_eq!(resolve(&root, "").unwrap(), root);
        assert_eq!(resolve(&root, "/").unwrap(), root);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret"), b"top").unwrap();

        let (_dir, root) = root_with_file("bar", b"abcde");
        std::os::unix::fs::symlink(outside.path().join("secret"), root.join("link")).unwrap();

        assert_eq!(resolve(&root, "/link"), Err(ResolveError::Escapes));
    }
}
