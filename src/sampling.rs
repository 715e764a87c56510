use tracing::debug;

use crate::{
    cell::{Cell, cell_edges, is_inside},
    config::ExtractorConfig,
    field::{EdgeRoot, ScalarField, unit_normal},
    interp::{find_t, interpolate_points},
    types::{Point, Vector},
};

/// A surface crossing on a cell edge together with the unit surface normal
/// there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hermite<const D: usize> {
    pub point: Point<D>,
    pub normal: Vector<D>,
}

/// Finds every surface crossing on the edges of `cell`.
///
/// An edge is crossed when exactly one of its endpoints is inside. The crossing
/// point comes from the field's closed form when it has one, otherwise from
/// linear interpolation of the corner values:
///
/// ```text
/// t = f(p1) / (f(p1) - f(p2))
/// ```
///
/// Crossings whose closed form is degenerate, or whose normal is not finite,
/// are skipped. The result may be empty.
pub fn sample_cell<const D: usize, F: ScalarField<D> + ?Sized>(
    field: &F,
    cell: &Cell<D>,
    config: &ExtractorConfig,
) -> Vec<Hermite<D>> {
    let mut samples = Vec::new();

    for (start, end, axis) in cell_edges::<D>() {
        let v0 = cell.corner_values[start];
        let v1 = cell.corner_values[end];
        if is_inside(v0) == is_inside(v1) {
            continue;
        }

        let p0 = cell.corner_position(start);
        let p1 = cell.corner_position(end);

        let point = match field.edge_root(&p0, &p1, axis, config.intersection_epsilon) {
            EdgeRoot::Root(p) => p,
            EdgeRoot::Unsupported => interpolate_points(&p0, &p1, find_t(v0, v1, 0.0)),
            EdgeRoot::Degenerate => {
                debug!(key = ?cell.key, start, end, "skipping degenerate edge root");
                continue;
            }
        };

        match unit_normal(field.gradient(&point, config.gradient_step)) {
            Some(normal) => samples.push(Hermite { point, normal }),
            None => debug!(key = ?cell.key, start, end, "skipping non-finite normal"),
        }
    }

    samples
}
