//! Candidate matching and scoring.
//!
//! # Responsibilities
//! - List plain, non-hidden files in the terminal directory
//! - Keep those whose stripped name equals the leaf segment
//! - Score each candidate's encoded query against the request query
//! - Pick the single best candidate, or report `NoMatch`
//!
//! # Scoring
//! - Request without query: a query-less candidate scores `0`, any other is excluded
//! - A request key the candidate lacks contributes nothing
//! - A request key the candidate has with another value excludes it outright
//! - A request key with the same value adds `1`
//! - A matching candidate with more keys than the request loses one point per
//!   extra key, floored at `0.5`
//!
//! # Design Decisions
//! - Exclusion is `None`, not a negative score, so it can never be selected
//! - Candidates are sorted by file name first; on a tie the first one wins

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::resolver::candidate::Candidate;
use crate::resolver::query::QueryParams;

/// Lowest score an over-specific but matching candidate can fall to.
pub const SPECIFICITY_FLOOR: f64 = 0.5;

/// Outcome of matching within a terminal directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Path of the winning response file.
    Found(PathBuf),
    /// The path was valid but no file answers this request.
    NoMatch,
}

/// Fuzzy match score of a candidate query against the request query.
///
/// Returns `None` when the candidate is excluded.
pub fn score(candidate: &QueryParams, request: &QueryParams) -> Option<f64> {
    if request.is_empty() {
        return candidate.is_empty().then_some(0.0);
    }

    let mut matched = 0usize;
    for (key, value) in request {
        match candidate.get(key) {
            None => {}
            Some(recorded) if recorded == value => matched += 1,
            Some(_) => return None,
        }
    }

    let mut score = matched as f64;
    if matched > 0 && candidate.len() > request.len() {
        let excess = (candidate.len() - request.len()) as f64;
        score = (score - excess).max(SPECIFICITY_FLOOR);
    }
    Some(score)
}

/// Candidates named `leaf`, each paired with its score (`None` when excluded).
pub fn scored<'a, 'q>(
    candidates: &'a [Candidate],
    leaf: &'q str,
    request: &'q QueryParams,
) -> impl Iterator<Item = (&'a Candidate, Option<f64>)> + 'q
where
    'a: 'q,
{
    candidates
        .iter()
        .filter(move |c| c.stripped_name == leaf)
        .map(move |c| (c, score(&c.query, request)))
}

/// Best candidate for `leaf` among `candidates`, in iteration order on ties.
pub fn best<'a>(
    candidates: &'a [Candidate],
    leaf: &str,
    request: &QueryParams,
) -> Option<&'a Candidate> {
    let mut winner: Option<(&Candidate, f64)> = None;
    for (candidate, points) in scored(candidates, leaf, request) {
        let Some(points) = points else {
            continue;
        };
        if winner.map_or(true, |(_, top)| points > top) {
            winner = Some((candidate, points));
        }
    }
    winner.map(|(candidate, _)| candidate)
}

/// Plain, non-hidden files directly inside `dir` whose stripped name is
/// `leaf`, sorted by file name.
///
/// Names are checked before the entry is stat'ed, so unrelated files cost
/// no `metadata` call. Symlinks are followed; entries whose names are not
/// UTF-8 are skipped.
pub async fn list_candidates(dir: &Path, leaf: &str) -> io::Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(candidate) = Candidate::parse(&name) else {
            continue;
        };
        if candidate.stripped_name != leaf {
            continue;
        }
        match fs::metadata(entry.path()).await {
            Ok(metadata) if metadata.is_file() => candidates.push(candidate),
            _ => {}
        }
    }
    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}

/// Select the response file for `leaf` inside `dir`.
pub async fn select(dir: &Path, leaf: &str, request: &QueryParams) -> io::Result<Resolution> {
    if leaf.is_empty() {
        return Ok(Resolution::NoMatch);
    }

    let candidates = list_candidates(dir, leaf).await?;
    Ok(match best(&candidates, leaf, request) {
        Some(candidate) => Resolution::Found(candidate.path_in(dir)),
        None => Resolution::NoMatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::query::parse_query;

    use tempfile::TempDir;

    fn q(raw: &str) -> QueryParams {
        parse_query(raw)
    }

    fn names(files: &[&str]) -> Vec<Candidate> {
        let mut list: Vec<Candidate> = files.iter().filter_map(|f| Candidate::parse(f)).collect();
        list.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        list
    }

    #[test]
    fn test_score_without_request_query() {
        assert_eq!(score(&q(""), &q("")), Some(0.0));
        assert_eq!(score(&q("x=1"), &q("")), None);
    }

    #[test]
    fn test_score_counts_matching_keys() {
        assert_eq!(score(&q("a=1"), &q("a=1&b=2")), Some(1.0));
        assert_eq!(score(&q("a=1&b=2"), &q("a=1&b=2")), Some(2.0));
        assert_eq!(score(&q(""), &q("a=1")), Some(0.0));
    }

    #[test]
    fn test_score_excludes_mismatched_value() {
        assert_eq!(score(&q("a=1&b=not2"), &q("a=1&b=2")), None);
        assert_eq!(score(&q("a=2"), &q("a=1")), None);
    }

    #[test]
    fn test_score_specificity_penalty() {
        // one match, two extra keys: 1 - 2 floors at 0.5
        assert_eq!(score(&q("a=1&x=1&y=1"), &q("a=1")), Some(0.5));
        // two matches, one extra key
        assert_eq!(score(&q("a=1&b=2&x=1"), &q("a=1&b=2")), Some(1.0));
        // three matches, one extra key
        assert_eq!(score(&q("a=1&b=2&c=3&x=1"), &q("a=1&b=2&c=3")), Some(2.0));
    }

    #[test]
    fn test_score_no_penalty_without_matches() {
        assert_eq!(score(&q("x=1&y=2"), &q("a=1")), Some(0.0));
    }

    #[test]
    fn test_over_specific_outranks_query_less() {
        let list = names(&["resource.json", "resource?a=1&x=1&y=1.json"]);
        let winner = best(&list, "resource", &q("a=1")).unwrap();
        assert_eq!(winner.file_name, "resource?a=1&x=1&y=1.json");
    }

    #[test]
    fn test_best_prefers_exact_query() {
        let list = names(&["resource.json", "resource?foo=bar.json"]);
        let winner = best(&list, "resource", &q("foo=bar")).unwrap();
        assert_eq!(winner.file_name, "resource?foo=bar.json");
    }

    #[test]
    fn test_best_ignores_other_leaves() {
        let list = names(&["other?foo=bar.json", "resource.json"]);
        let winner = best(&list, "resource", &q("foo=bar")).unwrap();
        assert_eq!(winner.file_name, "resource.json");
        assert!(best(&list, "missing", &q("")).is_none());
    }

    #[test]
    fn test_best_tie_goes_to_first_name() {
        let list = names(&["resource?x=1.json", "resource.json"]);
        let winner = best(&list, "resource", &q("a=1")).unwrap();
        assert_eq!(winner.file_name, "resource.json");
    }

    #[test]
    fn test_best_never_returns_excluded_sole_candidate() {
        let list = names(&["resource?a=2.json"]);
        assert!(best(&list, "resource", &q("a=1")).is_none());
    }

    #[test]
    fn test_scored_reports_exclusions() {
        let list = names(&["item.json", "item?a=2.json", "item?a=1.json", "other.json"]);
        let request = q("a=1");
        let scores: Vec<(&str, Option<f64>)> = scored(&list, "item", &request)
            .map(|(c, points)| (c.file_name.as_str(), points))
            .collect();
        assert_eq!(
            scores,
            vec![
                ("item.json", Some(0.0)),
                ("item?a=1.json", Some(1.0)),
                ("item?a=2.json", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_candidates_keeps_only_leaf_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("item.json"), "{}").unwrap();
        std::fs::write(dir.path().join("item?a=1.json"), "{}").unwrap();
        std::fs::write(dir.path().join("other.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".item.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("item")).unwrap();

        let listed: Vec<String> = list_candidates(dir.path(), "item")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.file_name)
            .collect();
        assert_eq!(listed, vec!["item.json", "item?a=1.json"]);
    }
}
