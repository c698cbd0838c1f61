// SPDX-FileCopyrightText: The im-splittree authors
// SPDX-License-Identifier: MPL-2.0

use crate::{Node, Orientation, Pane, Path, Step};

/// Axis-aligned rectangle in the caller's coordinate units.
///
/// The origin is the top-left corner, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn min_x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub const fn min_y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Extent along the primary axis of `orientation`.
    #[must_use]
    pub const fn extent(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Euclidean distance between the origins of both rectangles.
    #[must_use]
    pub fn origin_distance(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Divide the rectangle into a left/top and a right/bottom part.
    #[must_use]
    pub fn split(self, orientation: Orientation, ratio: f64) -> (Self, Self) {
        match orientation {
            Orientation::Horizontal => {
                let left_width = self.width * ratio;
                let right_width = self.width - left_width;
                (
                    Self::new(self.x, self.y, left_width, self.height),
                    Self::new(self.x + left_width, self.y, right_width, self.height),
                )
            }
            Orientation::Vertical => {
                let top_height = self.height * ratio;
                let bottom_height = self.height - top_height;
                (
                    Self::new(self.x, self.y, self.width, top_height),
                    Self::new(self.x, self.y + top_height, self.width, bottom_height),
                )
            }
        }
    }
}

/// Spatial direction for inserting, resizing and navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Orientation of the splits that are affected by moving in this direction.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Up | Self::Down => Orientation::Vertical,
        }
    }

    /// Check if the direction points towards the left/top child.
    #[must_use]
    pub const fn is_toward_start(self) -> bool {
        matches!(self, Self::Left | Self::Up)
    }
}

/// A node together with the rectangle it occupies.
#[derive(Debug)]
pub struct Slot<'a, V> {
    pub node: &'a Node<V>,
    pub bounds: Rect,
}

// Manual impls avoid the `V: Clone` bound of the derive
impl<V> Clone for Slot<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Slot<'_, V> {}

/// Subdivision of an area into the slots of all nodes of a tree.
#[derive(Debug, Clone)]
pub struct Spatial<'a, V> {
    slots: Vec<Slot<'a, V>>,
}

impl<'a, V> Spatial<'a, V> {
    pub(crate) const fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    /// The slots of all nodes, including splits, in depth-first pre-order.
    ///
    /// The slot of a split covers both of its children and precedes them.
    #[must_use]
    pub fn slots(&self) -> &[Slot<'a, V>] {
        &self.slots
    }
}

impl<'a, V: Pane> Spatial<'a, V> {
    /// The slot of the first node that equals `node`.
    #[must_use]
    pub fn slot_of(&self, node: &Node<V>) -> Option<&Slot<'a, V>> {
        self.slots.iter().find(|slot| slot.node == node)
    }

    /// All slots that lie entirely on the `direction` side of `from`.
    ///
    /// The half-plane test is inclusive, i.e. slots that share an edge with
    /// the reference slot are candidates. The result is ordered by the
    /// distance between the origins of the candidate and the reference
    /// slot. Equidistant candidates retain their depth-first pre-order,
    /// i.e. a split precedes its own children.
    ///
    /// Returns an empty vector if `from` is not found.
    #[must_use]
    pub fn slots_in(&self, direction: Direction, from: &Node<V>) -> Vec<&Slot<'a, V>> {
        let Some(reference) = self.slot_of(from) else {
            return Vec::new();
        };
        let reference = reference.bounds;
        let mut candidates = self
            .slots
            .iter()
            .filter(|slot| slot.node != from)
            .filter(|slot| match direction {
                Direction::Left => slot.bounds.max_x() <= reference.min_x(),
                Direction::Right => slot.bounds.min_x() >= reference.max_x(),
                Direction::Up => slot.bounds.max_y() <= reference.min_y(),
                Direction::Down => slot.bounds.min_y() >= reference.max_y(),
            })
            .collect::<Vec<_>>();
        // Stable sort
        candidates.sort_by(|lhs, rhs| {
            reference
                .origin_distance(&lhs.bounds)
                .total_cmp(&reference.origin_distance(&rhs.bounds))
        });
        candidates
    }
}

impl<V> Node<V> {
    /// Subdivide `bounds` according to the orientations and ratios of all splits.
    ///
    /// Without bounds the unit-grid [`Node::dimensions()`] are used.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spatial(&self, bounds: Option<Rect>) -> Spatial<'_, V> {
        let bounds = bounds.unwrap_or_else(|| {
            let (width, height) = self.dimensions();
            Rect::new(0.0, 0.0, width as f64, height as f64)
        });
        let mut slots = Vec::with_capacity(self.node_count());
        self.collect_slots(bounds, &mut slots);
        Spatial { slots }
    }

    fn collect_slots<'a>(&'a self, bounds: Rect, slots: &mut Vec<Slot<'a, V>>) {
        slots.push(Slot { node: self, bounds });
        if let Self::Split(split) = self {
            let (left_bounds, right_bounds) = bounds.split(split.orientation, split.ratio);
            split.left.collect_slots(left_bounds, slots);
            split.right.collect_slots(right_bounds, slots);
        }
    }

    /// The slot of the node at `path` when subdividing `bounds`.
    ///
    /// Returns `None` if the path doesn't match the shape of the tree.
    #[must_use]
    pub fn slot_at(&self, path: &Path, bounds: Rect) -> Option<Slot<'_, V>> {
        path.segments()
            .try_fold(Slot { node: self, bounds }, |slot, step| {
                let split = slot.node.as_split()?;
                let (left_bounds, right_bounds) = slot.bounds.split(split.orientation, split.ratio);
                let bounds = match step {
                    Step::Left => left_bounds,
                    Step::Right => right_bounds,
                };
                Some(Slot {
                    node: split.child(step).as_ref(),
                    bounds,
                })
            })
    }
}
