use hashbrown::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::mining::expansion::{ExpansionEngine, Outcome};
use crate::mining::search_state::SearchState;

/// Result of one [`SearchNode::try_next`] call.
#[derive(Debug)]
pub enum NextStep {
    /// A frequent extension; push it.
    Child(SearchNode),
    /// The claimed candidate produced no child; call again.
    NoChild,
    /// Every candidate has been claimed.
    Exhausted,
}

/// A schedulable node: an immutable state, its sorted candidates and a
/// shared forward-only cursor.
///
/// Any number of threads may call [`SearchNode::try_next`] concurrently;
/// each candidate index is handed out exactly once.
#[derive(Debug)]
pub struct SearchNode {
    state: SearchState,
    extensions: Box<[u32]>,
    cursor: AtomicUsize,
    /// Extensions that turned out emerging, excluded from later siblings'
    /// subtrees.
    denied_siblings: Mutex<HashSet<u32>>,
    deny_emerging: bool,
}

impl SearchNode {
    pub fn new(state: SearchState) -> Self {
        let extensions = state.extensions().into_boxed_slice();
        Self {
            state,
            extensions,
            cursor: AtomicUsize::new(0),
            denied_siblings: Mutex::new(HashSet::new()),
            deny_emerging: true,
        }
    }

    /// Enables or disables sibling denial for this node and its children.
    pub fn with_sibling_denial(mut self, enabled: bool) -> Self {
        self.deny_emerging = enabled;
        self
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Candidate items, ascending.
    pub fn extensions(&self) -> &[u32] {
        &self.extensions
    }

    pub fn level(&self) -> usize {
        self.state.level()
    }

    /// Claims the next untried candidate.
    ///
    /// Returns `None` once all candidates are claimed; from then on it never
    /// returns `Some` again.
    pub fn claim(&self) -> Option<u32> {
        // fetch_add hands every index to exactly one caller. Once past the
        // end the cursor only grows, so exhaustion is permanent.
        let index = self.cursor.fetch_add(1, Ordering::AcqRel);
        self.extensions.get(index).copied()
    }

    /// Whether every candidate has been claimed (not necessarily finished).
    pub fn is_exhausted(&self) -> bool {
        self.cursor.load(Ordering::Acquire) >= self.extensions.len()
    }

    /// Expands a candidate previously returned by [`SearchNode::claim`].
    pub fn expand_claimed(&self, item: u32, engine: &ExpansionEngine<'_>) -> NextStep {
        match engine.expand(&self.state, item, &self.denied_siblings) {
            Outcome::Frequent(child) => NextStep::Child(
                SearchNode::new(child).with_sibling_denial(self.deny_emerging),
            ),
            outcome if outcome.is_emerging() => {
                if self.deny_emerging {
                    self.denied_siblings
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .insert(item);
                }
                NextStep::NoChild
            }
            _ => NextStep::NoChild,
        }
    }

    /// Claims and expands the next candidate.
    pub fn try_next(&self, engine: &ExpansionEngine<'_>) -> NextStep {
        match self.claim() {
            Some(item) => self.expand_claimed(item, engine),
            None => NextStep::Exhausted,
        }
    }
}

impl std::fmt::Display for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let claimed = self.cursor.load(Ordering::Relaxed).min(self.extensions.len());
        write!(
            f,
            "{:?} {}/{}",
            self.state.pattern(),
            claimed,
            self.extensions.len()
        )
    }
}
