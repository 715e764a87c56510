use std::ops::Range;

use crate::{
    cell::{Cell, has_sign_change},
    field::ScalarField,
    types::{Aabb, CellKey, Value},
};

/// A node of a [`CellTree`].
#[derive(Clone, Debug)]
pub struct Node<const D: usize> {
    pub key: CellKey<D>,
    pub bounds: Aabb<D>,
    pub corner_values: Vec<Value>,
    pub parent: Option<usize>,
    /// Arena indices of the `2^D` children, which are stored contiguously.
    pub children: Option<Range<usize>>,
}

impl<const D: usize> Node<D> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn to_cell(&self) -> Cell<D> {
        Cell::new(self.key, self.bounds, self.corner_values.clone())
    }
}

/// Adaptive `2^D`-tree (quadtree in 2D, octree in 3D) stored as an arena.
///
/// Node `0` is the root covering the whole region. The root is always split
/// once; any other node is split into `2^D` equal children while it is above
/// `max_depth` and its corner signs disagree. Nodes are never modified after
/// their children are attached.
#[derive(Clone, Debug)]
pub struct CellTree<const D: usize> {
    pub nodes: Vec<Node<D>>,
    pub max_depth: u32,
}

impl<const D: usize> CellTree<D> {
    pub fn build<F: ScalarField<D> + ?Sized>(field: &F, bounds: Aabb<D>, max_depth: u32) -> Self {
        let mut tree = Self {
            nodes: vec![Node {
                key: CellKey::new(0, [0; D]),
                bounds,
                corner_values: corner_values(field, &bounds),
                parent: None,
                children: None,
            }],
            max_depth,
        };

        if max_depth == 0 {
            return tree;
        }

        let mut stack = vec![0];
        while let Some(parent) = stack.pop() {
            let children = tree.split(field, parent);
            for child in children {
                let node = &tree.nodes[child];
                if node.key.depth < max_depth && has_sign_change(&node.corner_values) {
                    stack.push(child);
                }
            }
        }
        tree
    }

    /// Appends the children of `parent` and returns their arena range.
    fn split<F: ScalarField<D> + ?Sized>(&mut self, field: &F, parent: usize) -> Range<usize> {
        let (key, bounds) = (self.nodes[parent].key, self.nodes[parent].bounds);
        let start = self.nodes.len();

        for child in 0..(1usize << D) {
            let child_bounds = bounds.child(child);
            let index: [usize; D] = std::array::from_fn(|axis| key.index[axis] * 2 + (child >> axis & 1));
            self.nodes.push(Node {
                key: CellKey::new(key.depth + 1, index),
                bounds: child_bounds,
                corner_values: corner_values(field, &child_bounds),
                parent: Some(parent),
                children: None,
            });
        }

        let range = start..self.nodes.len();
        self.nodes[parent].children = Some(range.clone());
        range
    }

    pub fn root(&self) -> &Node<D> {
        &self.nodes[0]
    }

    /// Leaf nodes in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node<D>> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Flattens the leaves into cells for batch processing.
    pub fn leaf_cells(&self) -> Vec<Cell<D>> {
        self.leaves().map(Node::to_cell).collect()
    }
}

fn corner_values<const D: usize, F: ScalarField<D> + ?Sized>(field: &F, bounds: &Aabb<D>) -> Vec<Value> {
    (0..1usize << D).map(|c| field.value(&bounds.corner(c))).collect()
}

/// Enumerates the leaves of an adaptive tree over `bounds`.
pub fn adaptive_cells<const D: usize, F: ScalarField<D> + ?Sized>(
    field: &F,
    bounds: Aabb<D>,
    max_depth: u32,
) -> Vec<Cell<D>> {
    CellTree::build(field, bounds, max_depth).leaf_cells()
}
