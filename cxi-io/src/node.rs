//! The reference/entity model shared by every schema node.
//!
//! A [`NodeRef`] identifies a not-yet-opened child group: a handle to the
//! parent group plus the child's relative name. Opening a reference yields
//! the typed entity, which owns its own group handle and carries unopened
//! references to its children; it never opens the children themselves, so
//! handle usage stays proportional to the actively walked subtree.
//!
//! Entities release their handles on drop. Children are owned by whoever
//! opened them, and the engine's handle refcounting keeps a parent group
//! alive until the last child handle into it is gone, which preserves the
//! children-before-parent release order the container requires.

use std::fmt;
use std::marker::PhantomData;

use hdf5::Group;
use log::debug;

use crate::error::Result;
use crate::probe;

/// A typed schema node that can be opened from a container group.
pub trait NodeKind: Sized {
    /// Base name of the repeated sibling groups holding this kind
    /// (`entry` for `entry_1`, `entry_2`, …).
    const BASE: &'static str;

    /// Populates the entity from its already-opened group.
    ///
    /// # Errors
    /// Returns an error if child discovery or field decoding fails at the
    /// engine level. Absent optional fields are not errors.
    fn from_group(group: Group) -> Result<Self>;
}

/// Unopened handle to a child node: parent group + relative name.
pub struct NodeRef<T> {
    parent: Group,
    name: String,
    _kind: PhantomData<T>,
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            name: self.name.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: NodeKind> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("kind", &T::BASE)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: NodeKind> NodeRef<T> {
    pub(crate) fn new(parent: Group, name: String) -> Self {
        Self {
            parent,
            name,
            _kind: PhantomData,
        }
    }

    /// Relative name of the referenced group (e.g. `entry_1`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens the referenced group and populates the typed entity.
    ///
    /// On failure the node stays unopened and no entity exists; the
    /// reference itself remains usable for a retry.
    ///
    /// # Errors
    /// Returns an error if the group cannot be opened or decoding fails.
    pub fn open(&self) -> Result<T> {
        debug!("opening {} {}", T::BASE, self.name);
        let group = self.parent.group(&self.name)?;
        T::from_group(group)
    }
}

/// Discovers the suffixed children of kind `T` directly under `parent`.
///
/// The returned references are exhaustive and ordered by increasing
/// suffix; none of them is opened.
pub(crate) fn child_refs<T: NodeKind>(parent: &Group) -> Vec<NodeRef<T>> {
    let count = probe::count_suffixed(parent, T::BASE);
    (1..=count)
        .map(|i| NodeRef::new(parent.clone(), probe::suffixed_name(T::BASE, i)))
        .collect()
}

/// Creates the next free suffixed group for kind `T` under `parent`.
///
/// Returns the opened group (for writing the node's fields) together with
/// an unopened reference to it.
pub(crate) fn create_child_group<T: NodeKind>(parent: &Group) -> Result<(Group, NodeRef<T>)> {
    let name = probe::next_suffixed_name(parent, T::BASE);
    debug!("creating {} {}", T::BASE, name);
    let group = parent.create_group(&name)?;
    Ok((group, NodeRef::new(parent.clone(), name)))
}
