// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

use std::fmt;

#[cfg(feature = "im")]
type Steps = im::Vector<Step>;

#[cfg(not(feature = "im"))]
type Steps = Vec<Step>;

/// Single step from a split node into one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Step {
    /// The first child, i.e. left or top.
    Left,
    /// The second child, i.e. right or bottom.
    Right,
}

/// Address of a node relative to the root of a tree.
///
/// Paths are computed on demand by searching the tree. Nodes never
/// store their own path or a link to their parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Steps,
}

impl Path {
    /// The empty path that addresses the root node.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps, i.e. the depth of the addressed node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Iterate over all steps, starting at the root.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = Step> + '_ {
        self.steps.iter().copied()
    }

    /// Split the path into the path of the parent and the last step.
    ///
    /// Returns `None` for the root path.
    #[must_use]
    pub fn parent_child_segments(&self) -> Option<(Self, Step)> {
        let last = self.segments().next_back()?;
        Some((self.prefix(self.len() - 1), last))
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.parent_child_segments().map(|(parent, _)| parent)
    }

    /// Extend the path by one step.
    #[must_use]
    pub fn child(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(std::iter::once(step));
        Self { steps }
    }

    /// The first `len` steps of this path.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            steps: self.steps.iter().take(len).copied().collect(),
        }
    }

    /// All proper ancestor paths, starting with the parent and ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.len()).rev().map(|len| self.prefix(len))
    }

    /// Check if `prefix` addresses this node or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        prefix.len() <= self.len()
            && prefix
                .segments()
                .zip(self.segments())
                .all(|(lhs, rhs)| lhs == rhs)
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (index, step) in self.segments().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
