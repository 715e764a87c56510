use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::{
    cell::Cell,
    config::{ExtractorConfig, Subdivision},
    error::Result,
    field::ScalarField,
    grid::uniform_cells,
    mesh::{DualMesh, VertexMap},
    qef::solve_qef,
    sampling::{Hermite, sample_cell},
    tree::adaptive_cells,
    types::{Aabb, Point},
};

/// Enumerates the cells to process over `bounds`: every lattice cell for
/// [`Subdivision::Uniform`], the tree leaves for [`Subdivision::Adaptive`].
///
/// Fails only on invalid bounds or configuration, before the field is
/// evaluated.
pub fn enumerate_cells<const D: usize, F: ScalarField<D> + ?Sized>(
    field: &F,
    bounds: &Aabb<D>,
    config: &ExtractorConfig,
) -> Result<Vec<Cell<D>>> {
    bounds.validate()?;
    config.validate()?;
    Ok(subdivide(field, *bounds, config.subdivision))
}

fn subdivide<const D: usize, F: ScalarField<D> + ?Sized>(
    field: &F,
    bounds: Aabb<D>,
    subdivision: Subdivision,
) -> Vec<Cell<D>> {
    match subdivision {
        Subdivision::Uniform { resolution } => uniform_cells(field, bounds, resolution),
        Subdivision::Adaptive { max_depth } => adaptive_cells(field, bounds, max_depth),
    }
}

/// A cell together with the surface crossings found on its edges.
#[derive(Clone, Debug)]
pub struct SampledCell<const D: usize> {
    pub cell: Cell<D>,
    pub samples: Vec<Hermite<D>>,
}

/// Extracts the dual graph of the zero level set of a scalar field.
///
/// ```text
/// enumerate_cells  →  cells (lattice or tree leaves)
/// sample_cell      →  per cell: edge crossings + unit normals
/// solve_qef        →  per cell with crossings: one vertex
/// emit_edges       →  edges between same-depth, axis-adjacent vertex cells
/// ```
///
/// Sampling and solving run on the rayon pool. Results are merged in cell
/// order, so the output does not depend on scheduling.
///
/// ```rust
/// use dual_contour::{
///     config::ExtractorConfig, extractor::SurfaceExtractor, field::Circle, types::Aabb,
/// };
///
/// let circle = Circle::at_origin(2.5);
/// let bounds = Aabb::cube(-3.0, 3.0).unwrap();
/// let extractor = SurfaceExtractor::new(&circle, bounds, ExtractorConfig::adaptive(4)).unwrap();
/// let mesh = extractor.extract();
/// assert!(mesh.vertex_count() > 0);
/// ```
pub struct SurfaceExtractor<'a, F: ?Sized, const D: usize> {
    field: &'a F,
    bounds: Aabb<D>,
    config: ExtractorConfig,
}

impl<'a, F: ScalarField<D> + ?Sized, const D: usize> SurfaceExtractor<'a, F, D> {
    /// Validates `bounds` and `config`; nothing is evaluated yet.
    pub fn new(field: &'a F, bounds: Aabb<D>, config: ExtractorConfig) -> Result<Self> {
        bounds.validate()?;
        config.validate()?;
        Ok(Self {
            field,
            bounds,
            config,
        })
    }

    pub fn bounds(&self) -> &Aabb<D> {
        &self.bounds
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Cells to process, see [`enumerate_cells`].
    pub fn cells(&self) -> Vec<Cell<D>> {
        subdivide(self.field, self.bounds, self.config.subdivision)
    }

    /// Enumerates the cells and samples the crossings of each one.
    pub fn sample(&self) -> Vec<SampledCell<D>> {
        self.cells()
            .into_par_iter()
            .map(|cell| {
                let samples = sample_cell(self.field, &cell, &self.config);
                SampledCell { cell, samples }
            })
            .collect()
    }

    /// Solves one vertex for every sampled cell that has crossings.
    ///
    /// Cells whose solve fails are left out of the map.
    pub fn vertices(&self, sampled: &[SampledCell<D>]) -> VertexMap<D> {
        let solved: Vec<_> = sampled
            .par_iter()
            .filter(|s| !s.samples.is_empty())
            .filter_map(|s| {
                let vertex: Option<Point<D>> =
                    solve_qef(&s.samples, self.config.regularization, self.config.qef_method);
                if vertex.is_none() {
                    debug!(key = ?s.cell.key, samples = s.samples.len(), "omitting vertex, QEF solve failed");
                }
                vertex.map(|v| (s.cell.key, v))
            })
            .collect();
        solved.into_iter().collect()
    }

    /// Runs the whole pipeline.
    pub fn extract(&self) -> DualMesh<D> {
        let span = debug_span!("extract", dims = D, subdivision = ?self.config.subdivision);
        let _guard = span.enter();

        let sampled = self.sample();
        let crossed = sampled.iter().filter(|s| !s.samples.is_empty()).count();
        debug!(cells = sampled.len(), crossed, "sampled cells");

        let vertices = self.vertices(&sampled);
        if vertices.len() < crossed {
            debug!(omitted = crossed - vertices.len(), "cells without a vertex");
        }

        let mesh = DualMesh::from_vertices(vertices);
        debug!(
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            "extracted dual mesh"
        );
        mesh
    }
}

/// Convenience wrapper: validate, then run [`SurfaceExtractor::extract`].
pub fn extract<const D: usize, F: ScalarField<D> + ?Sized>(
    field: &F,
    bounds: Aabb<D>,
    config: ExtractorConfig,
) -> Result<DualMesh<D>> {
    Ok(SurfaceExtractor::new(field, bounds, config)?.extract())
}
