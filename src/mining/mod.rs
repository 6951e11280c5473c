pub mod expansion;
pub mod scheduler;
pub mod search_node;
pub mod search_state;
pub mod stats;

pub use expansion::{ExpansionEngine, Outcome, Thresholds};
pub use scheduler::WorkStealingScheduler;
pub use search_node::{NextStep, SearchNode};
pub use search_state::{Pattern, SearchState, SideIndex};
pub use stats::{MiningReport, MiningStats, OutcomeCounts, WorkerStats};

// Link to test module (only compiled during tests)
#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
