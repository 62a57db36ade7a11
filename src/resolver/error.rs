//! Resolver error definitions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural failure while walking a request path through the mock tree.
///
/// Kept apart from [`Resolution::NoMatch`](crate::resolver::Resolution) so
/// callers can tell a bad path from a valid path without a response file.
#[derive(Debug, Error)]
pub enum LookupError {
    /// An intermediate segment has no entry of that exact name.
    #[error("no such path segment '{segment}' in {}", .dir.display())]
    NoSuchSegment { segment: String, dir: PathBuf },

    /// An intermediate segment names something that is not a directory.
    #[error("expected directory at {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// A directory on the way could not be listed or inspected.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Every way a mock lookup can fail to produce a response.
///
/// The HTTP adapter treats all of these the same way (fall through to the
/// next handler), but they stay distinct for logging and metrics.
#[derive(Debug, Error)]
pub enum MockError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("no mock file matches the request")]
    NoMatch,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MockError {
    /// Short label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            MockError::Lookup(_) => "lookup_error",
            MockError::NoMatch => "no_match",
            MockError::Read { .. } => "read_error",
            MockError::Parse { .. } => "parse_error",
        }
    }
}
