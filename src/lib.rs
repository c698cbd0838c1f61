// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

//! Immutable binary split tree for nested pane layouts.
//!
//! Leaves reference pane content by identity, splits divide their area
//! horizontally or vertically by a ratio. All operations are pure and
//! return a new [`Tree`]. Nodes are addressed by a [`Path`] that is
//! computed on demand, nodes never link to their parent.

mod identity;
pub use self::identity::{StructuralIdentity, TreeStructuralIdentity};

mod node;
pub use self::node::{
    DepthFirstLeavesIter, DepthFirstNodesIter, Node, Orientation, SplitNode, DEFAULT_RATIO,
};

mod pane_id;
pub use self::pane_id::{Pane, PaneId};

mod path;
pub use self::path::{Path, Step};

mod spatial;
pub use self::spatial::{Direction, Rect, Slot, Spatial};

mod tree;
pub use self::tree::{
    FocusDirection, SplitTreeError, Tree, MAX_RESIZE_RATIO, MIN_RESIZE_RATIO,
};
