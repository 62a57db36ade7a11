//! Path resolution: request path segments to a terminal directory.
//!
//! # Responsibilities
//! - Split the request path into segments
//! - Descend one directory per intermediate segment
//! - Stop with the leaf segment and the directory expected to hold it
//!
//! # Design Decisions
//! - Segments are compared byte-exact against the directory listing, never
//!   joined blindly, so `.` and `..` (absent from listings) cannot match
//! - The filesystem is read on every call; nothing is cached

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::resolver::error::LookupError;

/// Output of a successful walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    /// Directory that should contain the answer file(s).
    pub dir: PathBuf,
    /// Final path segment, matched against candidate stripped names.
    pub leaf: String,
}

/// Split a request path into segments, dropping a single leading `/`.
///
/// Always yields at least one segment; an empty path gives `[""]`.
pub fn segments(request_path: &str) -> Vec<&str> {
    request_path
        .strip_prefix('/')
        .unwrap_or(request_path)
        .split('/')
        .collect()
}

/// Walk `request_path` beneath `root`.
pub async fn walk(root: &Path, request_path: &str) -> Result<Terminal, LookupError> {
    let mut segments = segments(request_path);
    let leaf = segments.pop().unwrap_or_default().to_string();

    let mut position = root.to_path_buf();
    for segment in segments {
        if !has_entry(&position, segment).await? {
            return Err(LookupError::NoSuchSegment {
                segment: segment.to_string(),
                dir: position,
            });
        }
        position.push(segment);

        let metadata = fs::metadata(&position)
            .await
            .map_err(|source| LookupError::Io {
                path: position.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(LookupError::NotADirectory { path: position });
        }
    }

    Ok(Terminal {
        dir: position,
        leaf,
    })
}

/// Whether `dir` lists an entry named exactly `name`.
async fn has_entry(dir: &Path, name: &str) -> Result<bool, LookupError> {
    let io_err = |source| LookupError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(io_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        if entry.file_name().as_os_str() == OsStr::new(name) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("path1/path2")).unwrap();
        std::fs::write(root.path().join("path1/path2/resource.json"), "{}").unwrap();
        std::fs::write(root.path().join("path1/file.json"), "{}").unwrap();
        root
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("/a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(segments("a/b"), vec!["a", "b"]);
        assert_eq!(segments("/"), vec![""]);
        assert_eq!(segments(""), vec![""]);
        assert_eq!(segments("/a/"), vec!["a", ""]);
    }

    #[tokio::test]
    async fn test_walk_nested() {
        let root = tree();
        let terminal = walk(root.path(), "/path1/path2/resource").await.unwrap();
        assert_eq!(terminal.dir, root.path().join("path1").join("path2"));
        assert_eq!(terminal.leaf, "resource");
    }

    #[tokio::test]
    async fn test_walk_leaf_only_stays_at_root() {
        let root = tree();
        let terminal = walk(root.path(), "/anything").await.unwrap();
        assert_eq!(terminal.dir, root.path());
        assert_eq!(terminal.leaf, "anything");
    }

    #[tokio::test]
    async fn test_walk_missing_segment() {
        let root = tree();
        let err = walk(root.path(), "/path1/missing/resource").await.unwrap_err();
        match err {
            LookupError::NoSuchSegment { segment, dir } => {
                assert_eq!(segment, "missing");
                assert_eq!(dir, root.path().join("path1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_walk_segment_is_a_file() {
        let root = tree();
        std::fs::write(root.path().join("path1/plain"), "x").unwrap();
        let err = walk(root.path(), "/path1/plain/resource").await.unwrap_err();
        assert!(matches!(err, LookupError::NotADirectory { .. }));
    }

    #[tokio::test]
    async fn test_walk_is_case_sensitive() {
        let root = tree();
        let err = walk(root.path(), "/PATH1/path2/resource").await.unwrap_err();
        assert!(matches!(err, LookupError::NoSuchSegment { .. }));
    }

    #[tokio::test]
    async fn test_walk_rejects_dot_segments() {
        let root = tree();
        let err = walk(&root.path().join("path1"), "/../path1/file").await.unwrap_err();
        assert!(matches!(err, LookupError::NoSuchSegment { ref segment, .. } if segment == ".."));

        let err = walk(root.path(), "/./path1/file").await.unwrap_err();
        assert!(matches!(err, LookupError::NoSuchSegment { .. }));
    }
}
