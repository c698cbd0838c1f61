// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

use thiserror::Error;

use crate::{DepthFirstLeavesIter, Direction, Node, Pane, Path, Rect, Spatial, SplitNode};

/// Lower bound of ratios after resizing.
pub const MIN_RESIZE_RATIO: f64 = 0.1;

/// Upper bound of ratios after resizing.
pub const MAX_RESIZE_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitTreeError {
    /// The requested node, anchor or resizable split does not exist.
    #[error("view not found")]
    ViewNotFound,
}

/// How focus should move between panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// The preceding leaf in depth-first order, wrapping around.
    Previous,
    /// The following leaf in depth-first order, wrapping around.
    Next,
    /// The nearest leaf in the given direction.
    Spatial(Direction),
}

/// Immutable split tree with an optional zoomed node.
///
/// Every operation returns a new tree. Unaffected subtrees are shared.
#[derive(Debug, Clone)]
pub struct Tree<V> {
    root: Option<Node<V>>,
    zoomed: Option<Node<V>>,
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Pane> PartialEq for Tree<V> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.zoomed == other.zoomed
    }
}

impl<V> Tree<V> {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            zoomed: None,
        }
    }

    /// Create a tree with a single pane.
    #[must_use]
    pub const fn with_pane(pane: V) -> Self {
        Self::from_root(Node::Leaf(pane))
    }

    #[must_use]
    pub const fn from_root(root: Node<V>) -> Self {
        Self {
            root: Some(root),
            zoomed: None,
        }
    }

    #[must_use]
    pub const fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    /// The node that should occupy the whole area instead of its split bounds.
    #[must_use]
    pub const fn zoomed(&self) -> Option<&Node<V>> {
        self.zoomed.as_ref()
    }

    #[must_use]
    pub const fn is_zoomed(&self) -> bool {
        self.zoomed.is_some()
    }

    /// The node that should be rendered, i.e. the zoomed node if any or the root.
    #[must_use]
    pub fn visible_root(&self) -> Option<&Node<V>> {
        self.zoomed.as_ref().or(self.root.as_ref())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Check if the root is a split, i.e. if the tree contains more than one pane.
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.root.as_ref().is_some_and(Node::is_split)
    }

    /// All panes from left to right.
    pub fn leaves(&self) -> DepthFirstLeavesIter<'_, V> {
        DepthFirstLeavesIter::new(self.root.as_ref())
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Subdivide `bounds` into the slots of all nodes.
    ///
    /// Without bounds the unit-grid dimensions of the tree are used.
    #[must_use]
    pub fn spatial(&self, bounds: Option<Rect>) -> Spatial<'_, V> {
        self.root
            .as_ref()
            .map_or_else(Spatial::empty, |root| root.spatial(bounds))
    }
}

impl<V: Pane> Tree<V> {
    #[must_use]
    pub fn contains(&self, node: &Node<V>) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains(node))
    }

    #[must_use]
    pub fn contains_pane(&self, pane: &V) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains_pane(pane))
    }

    /// Find the leaf that references the content with the given identity.
    #[must_use]
    pub fn find(&self, id: &V::Id) -> Option<&Node<V>> {
        self.root.as_ref().and_then(|root| root.find(id))
    }

    #[must_use]
    pub fn path(&self, to: &Node<V>) -> Option<Path> {
        self.root.as_ref().and_then(|root| root.path(to))
    }

    #[must_use]
    pub fn node_at(&self, path: &Path) -> Option<&Node<V>> {
        self.root.as_ref().and_then(|root| root.node_at(path))
    }

    /// Split the pane `anchor` and place `pane` next to it in `direction`.
    ///
    /// Zooming is reset to reveal the new pane.
    pub fn inserting(
        &self,
        pane: V,
        anchor: &V,
        direction: Direction,
    ) -> Result<Self, SplitTreeError> {
        let root = self.root.as_ref().ok_or(SplitTreeError::ViewNotFound)?;
        log::debug!(
            "Inserting pane {pane_id:?} {direction} of {anchor_id:?}",
            pane_id = pane.pane_id(),
            anchor_id = anchor.pane_id(),
        );
        let root = root
            .inserting(pane, anchor, direction)
            .ok_or(SplitTreeError::ViewNotFound)?;
        Ok(Self {
            root: Some(root),
            zoomed: None,
        })
    }

    /// Substitute the subtree `node` with `with`.
    ///
    /// If `node` is zoomed then `with` becomes zoomed. A zoomed ancestor of
    /// `node` is updated accordingly. A zoomed descendant of `node` stays
    /// zoomed only if it is still part of the tree afterwards.
    pub fn replacing(&self, node: &Node<V>, with: Node<V>) -> Result<Self, SplitTreeError> {
        let path = self.path(node).ok_or(SplitTreeError::ViewNotFound)?;
        self.replacing_at(&path, node, with)
    }

    fn replacing_at(
        &self,
        path: &Path,
        node: &Node<V>,
        with: Node<V>,
    ) -> Result<Self, SplitTreeError> {
        let root = self.root.as_ref().ok_or(SplitTreeError::ViewNotFound)?;
        log::debug!("Replacing node at {path}");
        let zoom_update = self.zoomed.as_ref().map(|zoomed| {
            if zoomed == node {
                return ZoomUpdate::Replaced(with.clone());
            }
            match root.path(zoomed) {
                Some(zoomed_path) if !zoomed_path.starts_with(path) => {
                    ZoomUpdate::Relocated(zoomed_path)
                }
                _ => ZoomUpdate::Retained,
            }
        });
        let root = root
            .replacing_at(path, with)
            .ok_or(SplitTreeError::ViewNotFound)?;
        let zoomed = zoom_update.and_then(|zoom_update| match zoom_update {
            ZoomUpdate::Replaced(zoomed) => Some(zoomed),
            ZoomUpdate::Relocated(zoomed_path) => root.node_at(&zoomed_path).cloned(),
            ZoomUpdate::Retained => self.zoomed.clone().filter(|zoomed| root.contains(zoomed)),
        });
        Ok(Self {
            root: Some(root),
            zoomed,
        })
    }

    /// Remove the subtree `target`.
    ///
    /// Removing the root empties the tree. Removing a node that is not
    /// part of the tree returns the tree unchanged. The zoomed node is
    /// reset if it is removed or affected by the removal.
    #[must_use]
    pub fn removing(&self, target: &Node<V>) -> Self {
        let Some(root) = &self.root else {
            return self.clone();
        };
        if root == target {
            log::debug!("Removing root node");
            return Self::new();
        }
        let root = root.removing(target);
        let zoomed = self
            .zoomed
            .as_ref()
            .filter(|zoomed| {
                *zoomed != target && root.as_ref().is_some_and(|root| root.contains(zoomed))
            })
            .cloned();
        if self.zoomed.is_some() && zoomed.is_none() {
            log::debug!("Resetting zoom after removing node");
        }
        Self { root, zoomed }
    }

    /// Balance the ratios of all splits by the weights of their children.
    ///
    /// See [`Node::weight()`].
    #[must_use]
    pub fn equalized(&self) -> Self {
        let Some(root) = &self.root else {
            return self.clone();
        };
        log::debug!("Equalizing {leaf_count} panes", leaf_count = root.leaf_count());
        let zoomed_path = self.zoomed.as_ref().and_then(|zoomed| root.path(zoomed));
        let root = root.equalized();
        // The shape is unchanged
        let zoomed = zoomed_path.and_then(|path| root.node_at(&path).cloned());
        Self {
            root: Some(root),
            zoomed,
        }
    }

    /// Move the edge of the nearest enclosing split in `direction` by `by_pixels`.
    ///
    /// Only splits that are proper ancestors of `node` and whose orientation
    /// matches `direction` are considered. The pixel delta is converted into
    /// a ratio delta relative to the extent of the split within `bounds`.
    /// The resulting ratio is clamped to [`MIN_RESIZE_RATIO`]..=[`MAX_RESIZE_RATIO`].
    /// A non-finite offset leaves the ratio unchanged.
    pub fn resizing(
        &self,
        node: &Node<V>,
        by_pixels: f64,
        direction: Direction,
        bounds: Rect,
    ) -> Result<Self, SplitTreeError> {
        let root = self.root.as_ref().ok_or(SplitTreeError::ViewNotFound)?;
        let orientation = direction.orientation();
        let path = root.path(node).ok_or(SplitTreeError::ViewNotFound)?;
        let (split_path, split_node, split) = path
            .ancestors()
            .find_map(|ancestor_path| {
                let ancestor = root.node_at(&ancestor_path)?;
                let split = ancestor.as_split()?;
                (split.orientation == orientation).then_some((ancestor_path, ancestor, split))
            })
            .ok_or(SplitTreeError::ViewNotFound)?;
        let slot = root
            .slot_at(&split_path, bounds)
            .ok_or(SplitTreeError::ViewNotFound)?;
        let extent = slot.bounds.extent(orientation);
        let delta = if extent > 0.0 {
            by_pixels / extent
        } else {
            0.0
        };
        // Non-finite deltas would escape the clamp below.
        let delta = if delta.is_finite() { delta } else { 0.0 };
        let ratio = if direction.is_toward_start() {
            split.ratio - delta
        } else {
            split.ratio + delta
        };
        let ratio = ratio.clamp(MIN_RESIZE_RATIO, MAX_RESIZE_RATIO);
        log::debug!(
            "Resizing {orientation} split at {split_path} from {old_ratio} to {ratio}",
            old_ratio = split.ratio,
        );
        let resized = Node::Split(SplitNode::with_ratio(split, ratio));
        self.replacing_at(&split_path, split_node, resized)
    }

    /// Zoom into `node` or reset zooming with `None`.
    pub fn zooming(&self, node: Option<&Node<V>>) -> Result<Self, SplitTreeError> {
        if let Some(node) = node {
            if !self.contains(node) {
                return Err(SplitTreeError::ViewNotFound);
            }
        }
        log::debug!("Zooming: {zoomed}", zoomed = node.is_some());
        Ok(Self {
            root: self.root.clone(),
            zoomed: node.cloned(),
        })
    }

    /// The pane that should receive focus when moving from `from`.
    ///
    /// [`FocusDirection::Previous`] starts at the leftmost leaf of `from`
    /// and [`FocusDirection::Next`] at the rightmost leaf, so that moving away
    /// from a split always leaves it. Spatial navigation works on the
    /// unit-grid layout of the tree and prefers the nearest leaf. If only a
    /// split is found, its leftmost leaf is entered when moving left or up
    /// and its rightmost leaf otherwise.
    ///
    /// Returns `None` if the tree is empty, if `from` is not found, or if
    /// there is nothing in the requested direction.
    #[must_use]
    pub fn focus_target(&self, direction: FocusDirection, from: &Node<V>) -> Option<&V> {
        let root = self.root.as_ref()?;
        match direction {
            FocusDirection::Previous => {
                let current = from.leftmost_leaf().pane_id();
                let leaves = root.leaves().collect::<Vec<_>>();
                let index = leaves
                    .iter()
                    .position(|pane| pane.pane_id() == current)?;
                let index = index.checked_sub(1).unwrap_or(leaves.len() - 1);
                leaves.get(index).copied()
            }
            FocusDirection::Next => {
                let current = from.rightmost_leaf().pane_id();
                let leaves = root.leaves().collect::<Vec<_>>();
                let index = leaves
                    .iter()
                    .position(|pane| pane.pane_id() == current)?;
                leaves.get((index + 1) % leaves.len()).copied()
            }
            FocusDirection::Spatial(direction) => {
                let spatial = root.spatial(None);
                let candidates = spatial.slots_in(direction, from);
                let best = candidates
                    .iter()
                    .find(|slot| slot.node.is_leaf())
                    .or_else(|| candidates.first())?;
                let node: &Node<V> = best.node;
                log::trace!(
                    "Nearest of {count} candidates {direction}: {bounds:?}",
                    count = candidates.len(),
                    bounds = best.bounds,
                );
                let pane = match node {
                    Node::Leaf(pane) => pane,
                    Node::Split(_) if direction.is_toward_start() => node.leftmost_leaf(),
                    Node::Split(_) => node.rightmost_leaf(),
                };
                Some(pane)
            }
        }
    }
}

/// What happens to the zoomed node when replacing a subtree.
enum ZoomUpdate<V> {
    /// The zoomed node itself is replaced.
    Replaced(Node<V>),
    /// The zoomed node is an ancestor of or disjoint from the replaced subtree.
    Relocated(Path),
    /// The zoomed node is part of the replaced subtree.
    Retained,
}

impl<'a, V> IntoIterator for &'a Tree<V> {
    type Item = &'a V;
    type IntoIter = DepthFirstLeavesIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves()
    }
}
