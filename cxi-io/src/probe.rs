//! Discovery of sequentially suffixed sibling groups.
//!
//! Repeatable schema nodes are stored as `base_1`, `base_2`, … directly
//! under their parent group. Discovery scans forward from suffix 1 and
//! stops at the first missing link; suffixes are 1-based and absences are
//! assumed contiguous from the first gap onward. The scan is a read-only
//! probe via the engine's link check, isolated here so a different
//! discovery strategy (e.g. a directory listing) could be substituted
//! without touching the tree model.

use hdf5::Group;

/// Formats the on-disk name of the `index`-th sibling of `base`.
#[must_use]
pub fn suffixed_name(base: &str, index: usize) -> String {
    format!("{base}_{index}")
}

/// Counts the sibling groups `base_1 … base_n` present under `parent`.
///
/// Returns the largest `n` such that every suffix `1..=n` exists and
/// `base_{n+1}` does not; 0 when `base_1` is absent.
#[must_use]
pub fn count_suffixed(parent: &Group, base: &str) -> usize {
    let mut count = 0;
    while parent.link_exists(&suffixed_name(base, count + 1)) {
        count += 1;
    }
    count
}

/// Name for the next free suffix under `parent`, used when creating nodes.
#[must_use]
pub fn next_suffixed_name(parent: &Group, base: &str) -> String {
    suffixed_name(base, count_suffixed(parent, base) + 1)
}
