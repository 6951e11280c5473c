pub mod loader;
pub mod parser;
pub mod position_index;
pub mod rebasing;

pub use loader::{load_transactions, DatasetInfo, LoadedDataset};
pub use position_index::{PositionList, PresenceMap, TransactionLists};
pub use rebasing::Rebasing;

// Link to test module (only compiled during tests)
#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
