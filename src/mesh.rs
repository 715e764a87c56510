use std::collections::BTreeMap;

use crate::types::{CellKey, Point};

/// Cell identity → vertex position, iterated in [`CellKey`] order.
pub type VertexMap<const D: usize> = BTreeMap<CellKey<D>, Point<D>>;

/// An undirected connection between the vertices of two axis-adjacent cells.
///
/// `a` is always the cell on the negative side and `b` its `+axis` neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<const D: usize> {
    pub a: CellKey<D>,
    pub b: CellKey<D>,
    pub axis: usize,
}

/// The dual graph produced by dual contouring: one vertex per surface-crossing
/// cell and an edge between each pair of same-depth, axis-adjacent vertex cells.
///
/// No faces are built. The edges are meant for wireframe consumers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DualMesh<const D: usize> {
    pub vertices: VertexMap<D>,
    pub edges: Vec<Edge<D>>,
}

impl<const D: usize> DualMesh<D> {
    /// Builds the mesh from a vertex map, deriving the edges with [`emit_edges`].
    pub fn from_vertices(vertices: VertexMap<D>) -> Self {
        let edges = emit_edges(&vertices);
        Self { vertices, edges }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex of the cell `key`, if it has one.
    pub fn vertex(&self, key: &CellKey<D>) -> Option<&Point<D>> {
        self.vertices.get(key)
    }

    /// Resolves every edge to its two end points.
    pub fn segments(&self) -> Vec<[Point<D>; 2]> {
        self.edges
            .iter()
            .filter_map(|e| Some([*self.vertices.get(&e.a)?, *self.vertices.get(&e.b)?]))
            .collect()
    }
}

/// Connects each vertex cell to its `+axis` neighbour along every axis, when
/// that neighbour also has a vertex.
///
/// Neighbours are looked up at the same depth only. Where an adaptive tree
/// puts cells of different depths side by side, no edge is emitted between
/// them.
pub fn emit_edges<const D: usize>(vertices: &VertexMap<D>) -> Vec<Edge<D>> {
    let mut edges = Vec::new();
    for key in vertices.keys() {
        for axis in 0..D {
            let Some(neighbor) = key.neighbor(axis) else {
                continue;
            };
            if vertices.contains_key(&neighbor) {
                edges.push(Edge {
                    a: *key,
                    b: neighbor,
                    axis,
                });
            }
        }
    }
    edges
}
