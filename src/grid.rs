use ndarray::{ArrayD, IxDyn};

use crate::{
    cell::Cell,
    field::ScalarField,
    interp::remap,
    types::{Aabb, CellKey, Point, Value},
};

/// Field values sampled at every corner of a uniform lattice.
///
/// The lattice has `resolution + 1` corners and `resolution` cells per axis;
/// each corner is evaluated once and shared by the up to `2^D` cells touching
/// it.
pub struct CornerLattice<const D: usize> {
    pub bounds: Aabb<D>,
    pub resolution: usize,
    pub values: ArrayD<Value>,
}

impl<const D: usize> CornerLattice<D> {
    /// Evaluates `field` at every lattice corner.
    pub fn sample<F: ScalarField<D> + ?Sized>(field: &F, bounds: Aabb<D>, resolution: usize) -> Self {
        let shape = [resolution + 1; D];
        let values = ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
            let corner: [usize; D] = std::array::from_fn(|axis| idx[axis]);
            field.value(&lattice_point(&bounds, resolution, &corner))
        });
        Self {
            bounds,
            resolution,
            values,
        }
    }

    /// Value at lattice corner `corner`.
    #[inline]
    pub fn get(&self, corner: &[usize; D]) -> Value {
        self.values[IxDyn(corner)]
    }

    /// Builds the cell at grid index `index`, reading its corners from the
    /// lattice.
    pub fn cell(&self, index: [usize; D]) -> Cell<D> {
        let min = lattice_point(&self.bounds, self.resolution, &index);
        let far: [usize; D] = std::array::from_fn(|axis| index[axis] + 1);
        let max = lattice_point(&self.bounds, self.resolution, &far);

        let corner_values = (0..Cell::<D>::CORNERS)
            .map(|corner| {
                let at: [usize; D] =
                    std::array::from_fn(|axis| index[axis] + (corner >> axis & 1));
                self.get(&at)
            })
            .collect();

        Cell::new(CellKey::new(0, index), Aabb { min, max }, corner_values)
    }

    /// Every cell of the lattice, last axis varying fastest.
    pub fn cells(&self) -> Vec<Cell<D>> {
        let count = self.resolution.pow(D as u32);
        (0..count)
            .map(|flat| {
                let mut rest = flat;
                let mut index = [0; D];
                for axis in (0..D).rev() {
                    index[axis] = rest % self.resolution;
                    rest /= self.resolution;
                }
                self.cell(index)
            })
            .collect()
    }
}

/// World-space position of lattice corner `corner`.
///
/// Uses [`remap`] per axis so that the last corner lands exactly on `bounds.max`.
#[inline]
pub fn lattice_point<const D: usize>(bounds: &Aabb<D>, resolution: usize, corner: &[usize; D]) -> Point<D> {
    let mut p = bounds.min;
    for axis in 0..D {
        p[axis] = remap(
            corner[axis] as Value,
            [0.0, resolution as Value],
            [bounds.min[axis], bounds.max[axis]],
        );
    }
    p
}

/// Enumerates all cells of a uniform lattice over `bounds`.
pub fn uniform_cells<const D: usize, F: ScalarField<D> + ?Sized>(
    field: &F,
    bounds: Aabb<D>,
    resolution: usize,
) -> Vec<Cell<D>> {
    CornerLattice::sample(field, bounds, resolution).cells()
}
