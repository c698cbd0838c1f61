// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    hash::{Hash, Hasher},
    mem,
};

use crate::{Node, Pane, Tree};

/// Shape of a node, ignoring the ratios of all splits.
///
/// Two nodes are structurally identical if they have the same shape,
/// the same orientations and reference the same content in corresponding
/// leaves. Could be used for keying or caching state that only depends
/// on the arrangement of panes but not on their sizes.
#[derive(Debug)]
pub struct StructuralIdentity<'a, V> {
    node: &'a Node<V>,
}

impl<V> Clone for StructuralIdentity<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for StructuralIdentity<'_, V> {}

impl<V: Pane> PartialEq for StructuralIdentity<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        is_structurally_equal(self.node, other.node)
    }
}

impl<V: Pane> Eq for StructuralIdentity<'_, V> {}

impl<V: Pane> Hash for StructuralIdentity<'_, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_structure(self.node, state);
    }
}

fn is_structurally_equal<V: Pane>(lhs: &Node<V>, rhs: &Node<V>) -> bool {
    match (lhs, rhs) {
        (Node::Leaf(lhs), Node::Leaf(rhs)) => lhs.pane_id() == rhs.pane_id(),
        (Node::Split(lhs), Node::Split(rhs)) => {
            lhs.orientation == rhs.orientation
                && is_structurally_equal(&lhs.left, &rhs.left)
                && is_structurally_equal(&lhs.right, &rhs.right)
        }
        _ => false,
    }
}

fn hash_structure<V: Pane, H: Hasher>(node: &Node<V>, state: &mut H) {
    mem::discriminant(node).hash(state);
    match node {
        Node::Leaf(pane) => pane.pane_id().hash(state),
        Node::Split(split) => {
            split.orientation.hash(state);
            hash_structure(&split.left, state);
            hash_structure(&split.right, state);
        }
    }
}

/// Shape of a tree, including the shape of the zoomed node.
#[derive(Debug)]
pub struct TreeStructuralIdentity<'a, V> {
    root: Option<StructuralIdentity<'a, V>>,
    zoomed: Option<StructuralIdentity<'a, V>>,
}

impl<V> Clone for TreeStructuralIdentity<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for TreeStructuralIdentity<'_, V> {}

impl<V: Pane> PartialEq for TreeStructuralIdentity<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.zoomed == other.zoomed
    }
}

impl<V: Pane> Eq for TreeStructuralIdentity<'_, V> {}

impl<V: Pane> Hash for TreeStructuralIdentity<'_, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.zoomed.hash(state);
    }
}

impl<V> Node<V> {
    #[must_use]
    pub const fn structural_identity(&self) -> StructuralIdentity<'_, V> {
        StructuralIdentity { node: self }
    }
}

impl<V> Tree<V> {
    #[must_use]
    pub fn structural_identity(&self) -> TreeStructuralIdentity<'_, V> {
        TreeStructuralIdentity {
            root: self.root().map(Node::structural_identity),
            zoomed: self.zoomed().map(Node::structural_identity),
        }
    }
}
