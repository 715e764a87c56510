use nalgebra::{OPoint, SMatrix, SVector, Const};

use crate::error::{DualContourError, Result};

/// Scalar field value at a point in space.
///
/// `f64` so that the QEF regularization (`1e-8`) is still meaningful next to
/// unit-scale normal products.
pub type Value = f64;

/// A `D`-dimensional point with [`Value`] components.
pub type Point<const D: usize> = OPoint<Value, Const<D>>;

/// A `D`-dimensional vector with [`Value`] components.
pub type Vector<const D: usize> = SVector<Value, D>;

/// A `D × D` matrix with [`Value`] components.
pub type Matrix<const D: usize> = SMatrix<Value, D, D>;

pub type Point2 = Point<2>;
pub type Point3 = Point<3>;

/// Axis-aligned box given by its `min` and `max` corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<const D: usize> {
    pub min: Point<D>,
    pub max: Point<D>,
}

impl<const D: usize> Aabb<D> {
    /// Creates a box, rejecting non-finite or empty extents.
    pub fn new(min: Point<D>, max: Point<D>) -> Result<Self> {
        let aabb = Self { min, max };
        aabb.validate()?;
        Ok(aabb)
    }

    /// Returns the box of size `dims` centred on `center`.
    ///
    /// ```text
    ///  min = center - dims/2
    ///  max = center + dims/2
    /// ```
    pub fn centered(center: Point<D>, dims: Vector<D>) -> Result<Self> {
        let half = dims / 2.0;
        Self::new(center - half, center + half)
    }

    /// A cube `[min, max]^D`.
    pub fn cube(min: Value, max: Value) -> Result<Self> {
        Self::new(
            Point::from(Vector::repeat(min)),
            Point::from(Vector::repeat(max)),
        )
    }

    pub fn validate(&self) -> Result<()> {
        for axis in 0..D {
            let (min, max) = (self.min[axis], self.max[axis]);
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(DualContourError::InvalidBounds { axis, min, max });
            }
        }
        Ok(())
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> Vector<D> {
        self.max - self.min
    }

    /// Returns corner `corner` of the box.
    ///
    /// Bit `i` of `corner` selects `max` (set) or `min` (clear) along axis `i`,
    /// so in 2D the corners are ordered:
    ///
    /// ```text
    ///   2----3        Y
    ///   |    |        |
    ///   0----1        *-- X
    /// ```
    #[inline]
    pub fn corner(&self, corner: usize) -> Point<D> {
        let mut p = self.min;
        for axis in 0..D {
            if corner & (1 << axis) != 0 {
                p[axis] = self.max[axis];
            }
        }
        p
    }

    /// Returns child `child` of an even split into `2^D` boxes, using the same
    /// bit convention as [`corner`](Aabb::corner).
    pub fn child(&self, child: usize) -> Self {
        let mid = nalgebra::center(&self.min, &self.max);
        let mut min = self.min;
        let mut max = mid;
        for axis in 0..D {
            if child & (1 << axis) != 0 {
                min[axis] = mid[axis];
                max[axis] = self.max[axis];
            }
        }
        Self { min, max }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Point<D>) -> bool {
        (0..D).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }
}

/// Identity of a cell: its subdivision depth and its integer coordinates on the
/// `2^depth` lattice of that depth.
///
/// Uniform-grid cells all have depth `0` and use the grid index directly.
/// Ordering is lexicographic on `(depth, index)`, which keeps the vertex map
/// iteration deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey<const D: usize> {
    pub depth: u32,
    pub index: [usize; D],
}

impl<const D: usize> CellKey<D> {
    pub fn new(depth: u32, index: [usize; D]) -> Self {
        Self { depth, index }
    }

    /// The same-depth neighbour one step along `+axis`.
    ///
    /// Returns `None` if the index would overflow.
    #[inline]
    pub fn neighbor(&self, axis: usize) -> Option<Self> {
        let mut index = self.index;
        index[axis] = index[axis].checked_add(1)?;
        Some(Self {
            depth: self.depth,
            index,
        })
    }

    /// True when `other` differs from `self` by exactly one step along exactly
    /// one axis, at the same depth.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        if self.depth != other.depth {
            return false;
        }
        let steps: usize = self
            .index
            .iter()
            .zip(other.index.iter())
            .map(|(a, b)| a.abs_diff(*b))
            .sum();
        steps == 1
    }
}
