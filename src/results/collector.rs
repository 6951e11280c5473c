use crate::dataset::rebasing::Rebasing;

/// Verdict of the collector on an emerging candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmergingStatus {
    /// Not related to anything reported so far; recorded.
    NewEmerging,
    /// A reported pattern is a strict subsequence of the candidate. Recorded,
    /// but the branch is not expanded.
    EmergingWithExpansion,
    /// The exact pattern (or a dominating ancestor) is already known; the
    /// branch is redundant.
    EmergingWithoutExpansion,
    NotEmerging,
}

/// Sink for emerging patterns found by the expansion engine.
///
/// Setup methods run once before the search starts; `collect` and
/// `dead_end` are called concurrently from every worker thread.
///
/// Patterns are passed in rebased ids as `(current pattern, extension)`,
/// where the candidate is `extension` followed by `pattern`.
pub trait ResultsCollector: Send + Sync {
    fn set_rebasing(&mut self, rebasing: Rebasing);

    /// Items emerging as length-1 patterns, in original ids.
    fn set_emerging_items(&mut self, items: Vec<u32>);

    fn collect(&self, pattern: &[u32], extension: u32) -> EmergingStatus;

    /// A frequent, non-emerging pattern with nothing left to extend.
    fn dead_end(&self, _pattern: &[u32], _extension: u32) {}
}

/// Returns `true` when `needle` occurs in `haystack` in order, gaps allowed.
///
/// # Examples
///
/// ```
/// # use gapmine::results::collector::is_subsequence;
/// assert!(is_subsequence(&[1, 3], &[1, 2, 3]));
/// assert!(!is_subsequence(&[3, 1], &[1, 2, 3]));
/// ```
pub fn is_subsequence(needle: &[u32], haystack: &[u32]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}
