use indexmap::IndexSet;

/// Dense renumbering of the retained item universe.
///
/// Stores each retained original item id once; its position in the set is
/// its rebased id. Both directions are constant-time lookups.
///
/// The order is decided by the loader (ascending negative support, then
/// positive support, then original id). Search code only ever sees rebased
/// ids; results are translated back with [`Rebasing::unrebase`] just before
/// they leave the crate.
///
/// # Limitations
///
/// * Rebased ids are `u32`, so at most `u32::MAX` distinct items are retained
/// * Unknown ids are reported as `None`, never remapped
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rebasing {
    items: IndexSet<u32>,
}

impl Rebasing {
    /// Creates a rebasing where `ordered[i]` becomes rebased id `i`.
    ///
    /// Duplicate entries keep their first position.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gapmine::dataset::rebasing::Rebasing;
    /// let rebasing = Rebasing::from_ordered(vec![40, 7, 12]);
    /// assert_eq!(rebasing.rebased(7), Some(1));
    /// assert_eq!(rebasing.original(2), Some(12));
    /// ```
    pub fn from_ordered(ordered: Vec<u32>) -> Self {
        Self {
            items: ordered.into_iter().collect(),
        }
    }

    /// Original id of a rebased id.
    pub fn original(&self, rebased: u32) -> Option<u32> {
        self.items.get_index(rebased as usize).copied()
    }

    /// Rebased id of an original id, if the item was retained.
    pub fn rebased(&self, original: u32) -> Option<u32> {
        self.items.get_index_of(&original).map(|i| i as u32)
    }

    /// Translates a rebased pattern back to original ids, keeping its order.
    ///
    /// # Returns
    ///
    /// `None` if any id in `pattern` is outside the universe.
    pub fn unrebase(&self, pattern: &[u32]) -> Option<Vec<u32>> {
        pattern.iter().map(|&item| self.original(item)).collect()
    }

    /// Size of the retained universe (`U`).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
