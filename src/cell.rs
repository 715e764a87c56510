use crate::types::{Aabb, CellKey, Point, Value};

/// An axis-aligned cell ready for intersection sampling.
///
/// Holds the field value at each of its `2^D` corners, ordered by the bit
/// convention of [`Aabb::corner`]: bit `i` of the corner index selects the max
/// side along axis `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<const D: usize> {
    pub key: CellKey<D>,
    pub bounds: Aabb<D>,
    pub corner_values: Vec<Value>,
}

impl<const D: usize> Cell<D> {
    /// Number of corners of a `D`-dimensional box.
    pub const CORNERS: usize = 1 << D;

    pub fn new(key: CellKey<D>, bounds: Aabb<D>, corner_values: Vec<Value>) -> Self {
        debug_assert_eq!(corner_values.len(), Self::CORNERS);
        Self {
            key,
            bounds,
            corner_values,
        }
    }

    /// Position of corner `corner`.
    #[inline]
    pub fn corner_position(&self, corner: usize) -> Point<D> {
        self.bounds.corner(corner)
    }

    /// True if some corners are inside and some are not.
    ///
    /// A cell whose corners agree may still be crossed by a thin feature; the
    /// test only looks at corners.
    pub fn has_sign_change(&self) -> bool {
        has_sign_change(&self.corner_values)
    }
}

/// Inside means strictly negative; a zero value counts as outside.
#[inline]
pub fn is_inside(value: Value) -> bool {
    value < 0.0
}

pub fn has_sign_change(values: &[Value]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().any(|v| is_inside(*v) != is_inside(*first)),
        None => false,
    }
}

/// Returns the `D · 2^(D-1)` edges of a `D`-dimensional box as
/// `(start corner, end corner, axis)`.
///
/// Each edge runs from a corner with bit `axis` clear to the corner with that
/// bit set. In 3D:
///
/// ```text
///     6----7          Y
///    /|   /|          |
///   2----3 |          *-- X
///   | 4--|-5         /
///   |/   |/         Z
///   0----1
/// ```
pub fn cell_edges<const D: usize>() -> Vec<(usize, usize, usize)> {
    let mut edges = Vec::with_capacity(D << D.saturating_sub(1));
    for axis in 0..D {
        let bit = 1 << axis;
        for corner in 0..(1usize << D) {
            if corner & bit == 0 {
                edges.push((corner, corner | bit, axis));
            }
        }
    }
    edges
}
