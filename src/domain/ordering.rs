//! Display-order rules for links.
//!
//! Two rules live here:
//!
//! - a new link without an explicit position goes after the current last one
//! - a reorder request must be a permutation of the stored ids

use std::collections::{BTreeSet, HashSet};

/// Position for a link created without an explicit `ordem`.
///
/// `current_max` is `MAX(ordem)` over stored links, `None` when there are none.
pub fn next_ordem(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

/// Reasons a reorder request is not a permutation of the stored ids.
///
/// All lists are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMismatch {
    /// Stored ids absent from the request.
    pub missing: Vec<i32>,
    /// Requested ids that are not stored.
    pub unknown: Vec<i32>,
    /// Ids that appear more than once in the request.
    pub duplicates: Vec<i32>,
}

/// Checks that `requested` lists every id in `existing` exactly once.
pub fn check_permutation(requested: &[i32], existing: &[i32]) -> Result<(), OrderMismatch> {
    let existing: BTreeSet<i32> = existing.iter().copied().collect();

    let mut seen = HashSet::with_capacity(requested.len());
    let mut duplicates = BTreeSet::new();
    for id in requested {
        if !seen.insert(*id) {
            duplicates.insert(*id);
        }
    }

    let requested: BTreeSet<i32> = seen.into_iter().collect();

    let mismatch = OrderMismatch {
        missing: existing.difference(&requested).copied().collect(),
        unknown: requested.difference(&existing).copied().collect(),
        duplicates: duplicates.into_iter().collect(),
    };

    if mismatch == OrderMismatch::default() {
        Ok(())
    } else {
        Err(mismatch)
    }
}
