//! Candidate response files and their encoded queries.
//!
//! A candidate file is named `<leaf>[?k1=v1&k2=v2...].<ext>`, e.g.
//! `resource?foo=bar.json`.

use std::path::{Path, PathBuf};

use crate::resolver::query::{parse_query, QueryParams};

/// Names starting with this are never candidates.
pub const HIDDEN_MARKER: char = '.';

/// One directory entry interpreted as a possible response file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Entry name as listed, e.g. `resource?foo=bar.json`.
    pub file_name: String,
    /// Name without extension and query, e.g. `resource`.
    pub stripped_name: String,
    /// Extension including its dot, e.g. `.json`; empty if none.
    pub extension: String,
    /// Query decoded from the `?...` suffix; empty if there is none.
    pub query: QueryParams,
}

impl Candidate {
    /// Interpret a file name. Returns `None` for hidden entries.
    pub fn parse(file_name: &str) -> Option<Self> {
        if file_name.starts_with(HIDDEN_MARKER) {
            return None;
        }

        let (stem, extension) = match file_name.rfind('.') {
            Some(idx) => file_name.split_at(idx),
            None => (file_name, ""),
        };

        let (stripped_name, query) = match stem.split_once('?') {
            Some((name, raw)) => (name, parse_query(raw)),
            None => (stem, QueryParams::new()),
        };

        Some(Self {
            file_name: file_name.to_string(),
            stripped_name: stripped_name.to_string(),
            extension: extension.to_string(),
            query,
        })
    }

    /// Full path of this candidate inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}
