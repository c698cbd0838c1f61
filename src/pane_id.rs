// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    fmt,
    hash::Hash,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Content referenced by a leaf of the split tree.
///
/// The tree never owns, mutates or renders the content. Leaves are
/// compared solely by [`Pane::pane_id()`], i.e. two leaves are equal
/// if and only if they reference the same content instance.
pub trait Pane: Clone + fmt::Debug {
    /// Stable, opaque identity of the content.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// The identity used for comparing leaves and for lookup.
    #[must_use]
    fn pane_id(&self) -> Self::Id;
}

impl<T> Pane for Arc<T>
where
    T: Pane,
{
    type Id = T::Id;

    fn pane_id(&self) -> Self::Id {
        T::pane_id(self)
    }
}

const ZERO_PANE_ID_VALUE: usize = 0;

static LAST_PANE_ID_VALUE: AtomicUsize = AtomicUsize::new(ZERO_PANE_ID_VALUE);

/// Fast, ephemeral pane identifier.
///
/// Unique across all panes within a single process. Identifiers
/// are re-generated when the process is restarted and must not be
/// stored permanently!
///
/// Could be used directly as leaf content if the actual content lives
/// in an external registry keyed by this identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct PaneId(NonZeroUsize);

impl PaneId {
    /// Generate a new, unique identifier.
    ///
    /// Only the first [`usize::MAX`] identifiers are guaranteed to be unique.
    ///
    /// ```
    /// # use im_splittree::PaneId;
    /// let foo_id = PaneId::new();
    /// let bar_id = PaneId::new();
    /// assert_ne!(foo_id, bar_id);
    /// ```
    #[allow(clippy::new_without_default)] // Prevent unintended generation of new identifiers
    pub fn new() -> Self {
        loop {
            // No memory ordering guarantees needed, only uniqueness.
            let last_value = LAST_PANE_ID_VALUE.fetch_add(1, Ordering::Relaxed);
            // fetch_add() wraps around on overflow
            let next_value = last_value.wrapping_add(1);
            if let Some(next_value) = NonZeroUsize::new(next_value) {
                return Self(next_value);
            }
        }
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Pane for PaneId {
    type Id = Self;

    fn pane_id(&self) -> Self::Id {
        *self
    }
}
