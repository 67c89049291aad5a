use std::collections::BTreeSet;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Selector: which images of the collection to load
// ---------------------------------------------------------------------------

/// Subset of the collection requested by a load call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// Every image, i.e. `[0, count)`.
    #[default]
    All,
    /// Half-open range `[start, end)`.
    Range { start: usize, end: usize },
    /// Explicit set of indices; input order and duplicates are irrelevant.
    Indices(BTreeSet<usize>),
}

impl Selector {
    pub fn range(start: usize, end: usize) -> Self {
        Selector::Range { start, end }
    }

    pub fn indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Selector::Indices(indices.into_iter().collect())
    }

    /// Check the selector against a collection of `count` images.
    ///
    /// * A range needs `start < end <= count`.
    /// * Every explicit index must be `< count`.
    pub fn validate(&self, count: usize) -> Result<()> {
        match self {
            Selector::All => Ok(()),
            Selector::Range { start, end } => {
                if start >= end || *end > count {
                    return Err(Error::Range {
                        start: *start,
                        end: *end,
                        count,
                    });
                }
                Ok(())
            }
            Selector::Indices(set) => match set.iter().find(|&&i| i >= count) {
                Some(&index) => Err(Error::IndexOutOfBounds { index, count }),
                None => Ok(()),
            },
        }
    }

    /// Whether index `i` is a member of the expanded selector.
    pub fn contains(&self, i: usize) -> bool {
        match self {
            Selector::All => true,
            Selector::Range { start, end } => (*start..*end).contains(&i),
            Selector::Indices(set) => set.contains(&i),
        }
    }
}

/// Return the indices of `0..count` that `selector` picks, ascending.
///
/// The whole index space is walked in order and filtered by membership, so
/// the result never depends on the order indices were supplied in.
pub fn selected_indices(selector: &Selector, count: usize) -> Result<Vec<usize>> {
    selector.validate(count)?;
    Ok((0..count).filter(|&i| selector.contains(i)).collect())
}
