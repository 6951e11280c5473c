//! Gapmine - Minimal Emerging Sequential Patterns under a Gap Constraint
//!
//! Discovers the sequences of items that are frequent in a positive
//! collection of transactions and rare (or absent) in a negative one, where
//! consecutive pattern items may be separated by at most `max_gap` other
//! positions. Only minimal patterns are reported: no reported pattern
//! contains another reported pattern as a subsequence.
//!
//! # Overview
//!
//! - **Loading**: two whitespace-delimited files (local or `s3://`), one
//!   transaction per line, are turned into per-item position lists over a
//!   dense, rebased item universe
//! - **Expansion**: patterns grow by prepending one item at a time; each
//!   extension is matched, pruned and classified in a single pass
//! - **Scheduling**: the implicit search tree is explored depth-first by a
//!   fixed pool of threads that steal pending candidates from each other
//!
//! # Quick Start
//!
//! ```no_run
//! use gapmine::{mine, MiningParams, TransactionSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let params = MiningParams::new(2, 0, 1).with_threads(4);
//!     let result = mine(
//!         TransactionSource::Path("positive.txt".to_string()),
//!         TransactionSource::Path("negative.txt".to_string()),
//!         params,
//!     ).await?;
//!
//!     for pattern in &result.patterns {
//!         println!("{:?}", pattern);
//!     }
//!     Ok(())
//! }
//! ```
pub mod dataset;
pub mod mining;
pub mod results;
pub mod utils;

use bytes::Bytes;
use std::time::Instant;

use crate::dataset::parser::parse_transaction_bytes;
use crate::dataset::{load_transactions, LoadedDataset};
use crate::mining::{
    ExpansionEngine, MiningReport, SearchNode, SearchState, Thresholds, WorkStealingScheduler,
};
use crate::results::{PostFilteringCollector, ResultsCollector};
use crate::utils::file_interaction_local_and_cloud::read_all;

pub use crate::dataset::DatasetInfo;

// ============================================================================
// Public Types
// ============================================================================

/// Source of a transaction collection.
///
/// Either a path (local or `s3://bucket/key`) or the file contents already in
/// memory.
///
/// # Examples
///
/// ```
/// use gapmine::TransactionSource;
///
/// let source = TransactionSource::Path("positive.txt".to_string());
/// let source = TransactionSource::from(b"1 2 3\n2 3\n".to_vec());
/// assert_eq!(source.name(), "<memory>");
/// ```
#[derive(Debug, Clone)]
pub enum TransactionSource {
    /// Path to a transaction file (local or remote like s3://)
    Path(String),
    /// In-memory file contents
    Bytes(Bytes),
}

impl From<Vec<u8>> for TransactionSource {
    fn from(vec: Vec<u8>) -> Self {
        TransactionSource::Bytes(Bytes::from(vec))
    }
}

impl TransactionSource {
    /// Name used in messages.
    pub fn name(&self) -> &str {
        match self {
            TransactionSource::Path(path) => path,
            TransactionSource::Bytes(_) => "<memory>",
        }
    }
}

/// Run parameters.
///
/// # Examples
///
/// ```
/// use gapmine::MiningParams;
///
/// let params = MiningParams::new(10, 2, 3).with_threads(8).with_verbose(true);
/// assert!(params.validate().is_ok());
/// assert!(MiningParams::new(0, 2, 3).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningParams {
    /// Minimum positive support of a reported pattern (`>=`, at least 1).
    pub pos_min_support: usize,
    /// Maximum negative support of a reported pattern (`<=`).
    pub neg_max_support: usize,
    /// Maximum number of positions skipped between consecutive items.
    pub max_gap: u32,
    /// Worker threads (at least 1).
    pub threads: usize,
    /// Exclude items found emerging from the subtrees of their siblings.
    pub deny_emerging_siblings: bool,
    /// Keep frequent terminal patterns in the result. Turns sibling denial
    /// off for the run, since a denied item can still extend a pattern.
    pub keep_dead_ends: bool,
    /// Print progress to stdout.
    pub verbose: bool,
}

impl MiningParams {
    /// Parameters with default threading (all available cores), sibling
    /// denial on, no dead-end recording and no progress output.
    pub fn new(pos_min_support: usize, neg_max_support: usize, max_gap: u32) -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            pos_min_support,
            neg_max_support,
            max_gap,
            threads,
            deny_emerging_siblings: true,
            keep_dead_ends: false,
            verbose: false,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_sibling_denial(mut self, enabled: bool) -> Self {
        self.deny_emerging_siblings = enabled;
        self
    }

    pub fn with_dead_ends(mut self, keep: bool) -> Self {
        self.keep_dead_ends = keep;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks the parameters before any input is read.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.pos_min_support == 0 {
            return Err("pos_min_support must be at least 1, got 0".into());
        }
        if self.threads == 0 {
            return Err("threads must be at least 1, got 0".into());
        }
        Ok(())
    }

    /// Whether the search prunes with sibling denial. Dead-end recording
    /// needs complete candidate lists, so it wins over `deny_emerging_siblings`.
    pub fn sibling_denial(&self) -> bool {
        self.deny_emerging_siblings && !self.keep_dead_ends
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            pos_min_support: self.pos_min_support,
            neg_max_support: self.neg_max_support,
            max_gap: self.max_gap,
        }
    }
}

/// Outcome of a mining run.
#[derive(Debug, Clone)]
pub struct MiningResult {
    /// Minimal emerging patterns in original item ids, left to right,
    /// sorted by length then ids.
    pub patterns: Vec<Vec<u32>>,
    /// Frequent, non-emerging patterns that no retained item extends into a
    /// frequent pattern (only with `keep_dead_ends`).
    pub dead_ends: Vec<Vec<u32>>,
    pub report: MiningReport,
    pub info: DatasetInfo,
}

// ============================================================================
// Loading
// ============================================================================

async fn read_transactions(
    source: &TransactionSource,
) -> Result<Vec<Vec<u32>>, Box<dyn std::error::Error + Send + Sync>> {
    let bytes = match source {
        TransactionSource::Path(path) => read_all(path).await?,
        TransactionSource::Bytes(bytes) => bytes.clone(),
    };
    parse_transaction_bytes(&bytes, source.name())
}

/// Reads both collections (concurrently) and runs the initial load.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, either source cannot be
/// read, or a token is not an item id. Nothing is mined on error.
pub async fn load_dataset(
    positive: &TransactionSource,
    negative: &TransactionSource,
    params: &MiningParams,
) -> Result<LoadedDataset, Box<dyn std::error::Error + Send + Sync>> {
    params.validate()?;
    if params.verbose {
        println!("Loading {} and {}...", positive.name(), negative.name());
    }
    let (pos_transactions, neg_transactions) =
        futures::try_join!(read_transactions(positive), read_transactions(negative))?;

    let loaded = load_transactions(
        &pos_transactions,
        &neg_transactions,
        params.pos_min_support,
        params.neg_max_support,
    );
    if params.verbose {
        println!("{}", loaded.info);
    }
    Ok(loaded)
}

/// Load statistics without mining.
pub async fn dataset_info(
    positive: &TransactionSource,
    negative: &TransactionSource,
    params: &MiningParams,
) -> Result<DatasetInfo, Box<dyn std::error::Error + Send + Sync>> {
    Ok(load_dataset(positive, negative, params).await?.info)
}

// ============================================================================
// Mining
// ============================================================================

/// Mines a loaded dataset with `params.threads` worker threads.
///
/// Blocks until the search is over; from async code go through [`mine`].
///
/// # Errors
///
/// Returns an error if the parameters are invalid or a worker thread cannot
/// be spawned or panics.
pub fn mine_loaded(
    dataset: LoadedDataset,
    params: &MiningParams,
) -> Result<MiningResult, Box<dyn std::error::Error + Send + Sync>> {
    params.validate()?;
    let start = Instant::now();
    let LoadedDataset {
        positive,
        negative,
        rebasing,
        emerging_items,
        info,
    } = dataset;

    let mut collector = PostFilteringCollector::new().with_dead_ends(params.keep_dead_ends);
    collector.set_rebasing(rebasing);
    collector.set_emerging_items(emerging_items);

    let engine = ExpansionEngine::new(params.thresholds(), &collector);
    let root = SearchNode::new(SearchState::root(positive, negative))
        .with_sibling_denial(params.sibling_denial());
    let scheduler = WorkStealingScheduler::new(params.threads);
    if params.verbose {
        println!("Mining with {} threads...", scheduler.threads());
    }
    let workers = scheduler.run(root, &engine)?;
    let outcomes = engine.stats().snapshot();
    drop(engine);

    let collected = collector.finish();
    let report = MiningReport {
        threads: scheduler.threads(),
        outcomes,
        workers,
        recorded_candidates: collected.recorded,
        elapsed: start.elapsed(),
    };
    if params.verbose {
        println!("Found {} minimal emerging patterns", collected.minimal.len());
        println!("{}", report);
    }

    Ok(MiningResult {
        patterns: collected.minimal,
        dead_ends: collected.dead_ends,
        report,
        info,
    })
}

/// Loads and mines in memory, for already parsed transactions.
///
/// # Examples
///
/// ```
/// use gapmine::{mine_transactions, MiningParams};
///
/// let positive = vec![vec![1, 2, 3], vec![1, 3], vec![2, 3]];
/// let negative = vec![vec![2]];
/// let result = mine_transactions(&positive, &negative, &MiningParams::new(2, 0, 0)).unwrap();
/// assert_eq!(result.patterns, vec![vec![1], vec![3]]);
/// ```
pub fn mine_transactions(
    positive: &[Vec<u32>],
    negative: &[Vec<u32>],
    params: &MiningParams,
) -> Result<MiningResult, Box<dyn std::error::Error + Send + Sync>> {
    params.validate()?;
    let loaded = load_transactions(positive, negative, params.pos_min_support, params.neg_max_support);
    mine_loaded(loaded, params)
}

/// Loads both collections and mines them.
///
/// Loading is async I/O; the search itself runs on a blocking thread.
///
/// # Errors
///
/// See [`load_dataset`] and [`mine_loaded`].
pub async fn mine(
    positive: TransactionSource,
    negative: TransactionSource,
    params: MiningParams,
) -> Result<MiningResult, Box<dyn std::error::Error + Send + Sync>> {
    let loaded = load_dataset(&positive, &negative, &params).await?;
    tokio::task::spawn_blocking(move || mine_loaded(loaded, &params)).await?
}
