// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::Arc;

use crate::{Direction, Pane, Path, Step};

/// Ratio of newly created splits.
pub const DEFAULT_RATIO: f64 = 0.5;

/// Axis along which a split divides its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Orientation {
    /// Children are laid out side by side, left and right.
    Horizontal,
    /// Children are stacked, top and bottom.
    Vertical,
}

/// Immutable node of a split tree.
///
/// Children of splits are reference counted and shared between all
/// trees that have been derived from each other.
///
/// Value equality is ratio-sensitive and compares leaves by the identity
/// of their content. See [`crate::StructuralIdentity`] for a comparison
/// that ignores ratios.
#[derive(Debug, Clone)]
pub enum Node<V> {
    Leaf(V),
    Split(SplitNode<V>),
}

/// Intrinsic data of a split node.
#[derive(Debug, Clone)]
pub struct SplitNode<V> {
    pub orientation: Orientation,

    /// Fraction of the primary axis that is allocated to the left/top child.
    pub ratio: f64,

    /// The left or top child.
    pub left: Arc<Node<V>>,

    /// The right or bottom child.
    pub right: Arc<Node<V>>,
}

impl<V> SplitNode<V> {
    #[must_use]
    pub fn new(orientation: Orientation, ratio: f64, left: Node<V>, right: Node<V>) -> Self {
        Self {
            orientation,
            ratio,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }

    #[must_use]
    pub fn child(&self, step: Step) -> &Arc<Node<V>> {
        match step {
            Step::Left => &self.left,
            Step::Right => &self.right,
        }
    }

    /// Clone the split with a different ratio.
    ///
    /// The children are shared.
    #[must_use]
    pub fn with_ratio(&self, ratio: f64) -> Self {
        Self {
            orientation: self.orientation,
            ratio,
            left: Arc::clone(&self.left),
            right: Arc::clone(&self.right),
        }
    }
}

impl<V: Pane> PartialEq for SplitNode<V> {
    #[allow(clippy::float_cmp)] // Exact value equality
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation
            && self.ratio == other.ratio
            && (Arc::ptr_eq(&self.left, &other.left) || self.left == other.left)
            && (Arc::ptr_eq(&self.right, &other.right) || self.right == other.right)
    }
}

impl<V: Pane> PartialEq for Node<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(lhs), Self::Leaf(rhs)) => lhs.pane_id() == rhs.pane_id(),
            (Self::Split(lhs), Self::Split(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl<V> From<SplitNode<V>> for Node<V> {
    fn from(split: SplitNode<V>) -> Self {
        Self::Split(split)
    }
}

impl<V> Node<V> {
    #[must_use]
    pub const fn leaf(pane: V) -> Self {
        Self::Leaf(pane)
    }

    #[must_use]
    pub fn split(orientation: Orientation, ratio: f64, left: Self, right: Self) -> Self {
        Self::Split(SplitNode::new(orientation, ratio, left, right))
    }

    #[must_use]
    pub const fn pane(&self) -> Option<&V> {
        match self {
            Self::Leaf(pane) => Some(pane),
            Self::Split(_) => None,
        }
    }

    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode<V>> {
        match self {
            Self::Split(split) => Some(split),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Direct child of a split node.
    ///
    /// Returns `None` for leaf nodes.
    #[must_use]
    pub fn child(&self, step: Step) -> Option<&Self> {
        self.as_split().map(|split| split.child(step).as_ref())
    }

    /// All leaf contents from left to right.
    pub fn leaves(&self) -> DepthFirstLeavesIter<'_, V> {
        DepthFirstLeavesIter::new(Some(self))
    }

    /// All nodes including `self` in depth-first pre-order.
    pub fn nodes(&self) -> DepthFirstNodesIter<'_, V> {
        DepthFirstNodesIter::new(Some(self))
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Length of the longest path from this node down to a leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Split(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }

    /// The first leaf in depth-first order.
    #[must_use]
    pub fn leftmost_leaf(&self) -> &V {
        let mut node = self;
        loop {
            match node {
                Self::Leaf(pane) => return pane,
                Self::Split(split) => node = split.left.as_ref(),
            }
        }
    }

    /// The last leaf in depth-first order.
    #[must_use]
    pub fn rightmost_leaf(&self) -> &V {
        let mut node = self;
        loop {
            match node {
                Self::Leaf(pane) => return pane,
                Self::Split(split) => node = split.right.as_ref(),
            }
        }
    }

    /// Resolve a path starting at this node.
    ///
    /// Returns `None` if the path descends into a leaf, i.e. if it
    /// doesn't match the shape of the tree.
    #[must_use]
    pub fn node_at(&self, path: &Path) -> Option<&Self> {
        path.segments().try_fold(self, |node, step| node.child(step))
    }

    /// Unit-grid size of the subtree.
    ///
    /// Every leaf counts as 1×1. Horizontal splits add widths and take the
    /// maximum height, vertical splits add heights and take the maximum width.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Self::Leaf(_) => (1, 1),
            Self::Split(split) => {
                let (left_width, left_height) = split.left.dimensions();
                let (right_width, right_height) = split.right.dimensions();
                match split.orientation {
                    Orientation::Horizontal => {
                        (left_width + right_width, left_height.max(right_height))
                    }
                    Orientation::Vertical => {
                        (left_width.max(right_width), left_height + right_height)
                    }
                }
            }
        }
    }

    /// Weight of the subtree when balancing siblings along `orientation`.
    ///
    /// Leaves are only counted while descending through splits of the same
    /// orientation. A split of the perpendicular orientation counts as a
    /// single unit.
    #[must_use]
    pub fn weight(&self, orientation: Orientation) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split(split) if split.orientation == orientation => {
                split.left.weight(orientation) + split.right.weight(orientation)
            }
            Self::Split(_) => 1,
        }
    }
}

impl<V: Pane> Node<V> {
    /// Find the first leaf that references content with the given identity.
    #[must_use]
    pub fn find(&self, id: &V::Id) -> Option<&Self> {
        self.nodes()
            .find(|node| node.pane().is_some_and(|pane| pane.pane_id() == *id))
    }

    /// Check if this node or any descendant equals `node`.
    #[must_use]
    pub fn contains(&self, node: &Self) -> bool {
        self.nodes().any(|candidate| candidate == node)
    }

    /// Check if any leaf references the given content.
    #[must_use]
    pub fn contains_pane(&self, pane: &V) -> bool {
        self.find(&pane.pane_id()).is_some()
    }

    /// Path to the first node that equals `to`, searching depth-first
    /// and left-first.
    #[must_use]
    pub fn path(&self, to: &Self) -> Option<Path> {
        fn search<V: Pane>(node: &Node<V>, target: &Node<V>, path: &Path) -> Option<Path> {
            if node == target {
                return Some(path.clone());
            }
            let Node::Split(split) = node else {
                return None;
            };
            search(&split.left, target, &path.child(Step::Left))
                .or_else(|| search(&split.right, target, &path.child(Step::Right)))
        }
        search(self, to, &Path::root())
    }

    /// Rebuild the spine from this node down to `path` with the subtree
    /// at `path` substituted by `with`.
    ///
    /// All siblings along the spine are shared with the original.
    ///
    /// Returns `None` if the path doesn't match the shape of the tree.
    #[must_use]
    pub fn replacing_at(&self, path: &Path, with: Self) -> Option<Self> {
        fn replace_along<V>(
            node: &Node<V>,
            mut steps: impl Iterator<Item = Step>,
            with: Node<V>,
        ) -> Option<Node<V>> {
            let Some(step) = steps.next() else {
                return Some(with);
            };
            let Node::Split(split) = node else {
                // Path is too long
                return None;
            };
            let replaced = Arc::new(replace_along(split.child(step), steps, with)?);
            let mut split = split.with_ratio(split.ratio);
            match step {
                Step::Left => split.left = replaced,
                Step::Right => split.right = replaced,
            }
            Some(Node::Split(split))
        }
        replace_along(self, path.segments(), with)
    }

    /// Split the leaf that references `anchor` and place `pane` next to it.
    ///
    /// The new split is oriented according to `direction` and divided evenly.
    /// For [`Direction::Left`] and [`Direction::Up`] the new pane becomes the
    /// first child, otherwise the second.
    ///
    /// Returns `None` if `anchor` is not found.
    #[must_use]
    pub fn inserting(&self, pane: V, anchor: &V, direction: Direction) -> Option<Self> {
        let anchor_node = self.find(&anchor.pane_id())?;
        let path = self.path(anchor_node)?;
        let new_node = Self::Leaf(pane);
        let (left, right) = if direction.is_toward_start() {
            (new_node, anchor_node.clone())
        } else {
            (anchor_node.clone(), new_node)
        };
        self.replacing_at(
            &path,
            Self::split(direction.orientation(), DEFAULT_RATIO, left, right),
        )
    }

    /// Remove every subtree that equals `target`.
    ///
    /// Splits that lose one child collapse into the surviving child.
    /// Returns `None` if nothing is left. If `target` is not found an
    /// equal node that shares all children with `self` is returned.
    #[must_use]
    pub fn removing(&self, target: &Self) -> Option<Self> {
        match self.remove(target) {
            Removal::Unchanged => Some(self.clone()),
            Removal::Removed => None,
            Removal::Replaced(node) => Some(node),
        }
    }

    fn remove(&self, target: &Self) -> Removal<V> {
        if self == target {
            return Removal::Removed;
        }
        let Self::Split(split) = self else {
            return Removal::Unchanged;
        };
        match (split.left.remove(target), split.right.remove(target)) {
            (Removal::Unchanged, Removal::Unchanged) => Removal::Unchanged,
            (Removal::Removed, Removal::Removed) => Removal::Removed,
            (Removal::Removed, Removal::Unchanged) => {
                Removal::Replaced(split.right.as_ref().clone())
            }
            (Removal::Unchanged, Removal::Removed) => {
                Removal::Replaced(split.left.as_ref().clone())
            }
            (Removal::Removed, Removal::Replaced(node))
            | (Removal::Replaced(node), Removal::Removed) => Removal::Replaced(node),
            (left, right) => {
                let mut split = split.with_ratio(split.ratio);
                if let Removal::Replaced(node) = left {
                    split.left = Arc::new(node);
                }
                if let Removal::Replaced(node) = right {
                    split.right = Arc::new(node);
                }
                Removal::Replaced(Self::Split(split))
            }
        }
    }

    /// Recompute the ratios of all splits from the weights of their children.
    ///
    /// See [`Node::weight()`] for how perpendicular sub-layouts are counted.
    #[must_use]
    pub fn equalized(&self) -> Self {
        match self {
            Self::Leaf(_) => self.clone(),
            Self::Split(split) => {
                let left_weight = split.left.weight(split.orientation);
                let right_weight = split.right.weight(split.orientation);
                #[allow(clippy::cast_precision_loss)]
                let ratio = left_weight as f64 / (left_weight + right_weight) as f64;
                Self::split(
                    split.orientation,
                    ratio,
                    split.left.equalized(),
                    split.right.equalized(),
                )
            }
        }
    }
}

/// Outcome of removing a subtree from a node.
enum Removal<V> {
    /// Target not found, reuse the node as is.
    Unchanged,
    /// The whole node is gone.
    Removed,
    Replaced(Node<V>),
}

/// Iterator over the leaf contents of a subtree from left to right.
#[derive(Debug, Clone)]
pub struct DepthFirstLeavesIter<'a, V> {
    nodes: DepthFirstNodesIter<'a, V>,
}

impl<'a, V> DepthFirstLeavesIter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>) -> Self {
        Self {
            nodes: DepthFirstNodesIter::new(root),
        }
    }
}

impl<'a, V> Iterator for DepthFirstLeavesIter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.by_ref().find_map(Node::pane)
    }
}

/// Iterator over all nodes of a subtree in depth-first pre-order.
///
/// Splits are visited before their children, left children before
/// right children.
#[derive(Debug, Clone)]
pub struct DepthFirstNodesIter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> DepthFirstNodesIter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, V> Iterator for DepthFirstNodesIter<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Split(split) = node {
            self.stack.push(&split.right);
            self.stack.push(&split.left);
        }
        Some(node)
    }
}

impl<'a, V> IntoIterator for &'a Node<V> {
    type Item = &'a V;
    type IntoIter = DepthFirstLeavesIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves()
    }
}
