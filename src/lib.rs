//! Dual contouring of implicit scalar fields.
//!
//! One vertex is placed per surface-crossing cell by minimizing a quadratic
//! error function over the cell's edge crossings and normals, and vertices of
//! same-depth, axis-adjacent cells are joined by edges. Cells come from a
//! uniform lattice or an adaptive `2^D`-tree; everything is generic over the
//! dimension (`D = 2` or `D = 3`).

pub mod cell;
pub mod config;
pub mod error;
pub mod extractor;
pub mod field;
pub mod grid;
pub mod interp;
pub mod mesh;
pub mod qef;
pub mod sampling;
pub mod tree;
pub mod types;

pub use config::{ExtractorConfig, QefMethod, Subdivision};
pub use error::{DualContourError, Result};
pub use extractor::{SurfaceExtractor, enumerate_cells, extract};
pub use mesh::{DualMesh, Edge};
