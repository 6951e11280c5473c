pub mod collector;
pub mod post_filtering;

pub use collector::{EmergingStatus, ResultsCollector};
pub use post_filtering::{CollectedPatterns, PostFilteringCollector};

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
