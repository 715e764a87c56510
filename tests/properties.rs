use std::collections::BTreeSet;

use dual_contour::{
    DualMesh, ExtractorConfig, SurfaceExtractor, enumerate_cells, extract,
    cell::{cell_edges, is_inside},
    field::{Circle, FnField, Sphere},
    qef::solve_qef,
    sampling::{Hermite, sample_cell},
    types::{Aabb, Point2, Point3, Vector},
    QefMethod,
};

fn assert_edges_are_adjacent<const D: usize>(mesh: &DualMesh<D>) {
    for edge in &mesh.edges {
        assert!(edge.a.is_adjacent(&edge.b), "{edge:?} joins non-adjacent cells");
        assert_eq!(edge.a.depth, edge.b.depth);
        assert!(mesh.vertex(&edge.a).is_some(), "{edge:?} has no start vertex");
        assert!(mesh.vertex(&edge.b).is_some(), "{edge:?} has no end vertex");
    }
}

#[test]
fn circle_on_unit_grid_matches_crossed_cells() {
    let circle = Circle::at_origin(2.5);
    let bounds = Aabb::cube(-3.0, 3.0).unwrap();
    let config = ExtractorConfig::uniform(6);
    let cells = enumerate_cells(&circle, &bounds, &config).unwrap();
    assert_eq!(cells.len(), 36);

    for cell in &cells {
        let samples = sample_cell(&circle, cell, &config);
        if cell.has_sign_change() {
            assert!(!samples.is_empty(), "crossed cell {:?} has no intersection", cell.key);
        } else {
            assert!(samples.is_empty(), "uniform cell {:?} has intersections", cell.key);
        }

        if cell.bounds.contains(&Point2::origin()) {
            assert!(samples.is_empty());
        }
        if (0..4).all(|c| cell.corner_position(c).coords.norm() > 2.5) {
            assert!(samples.is_empty(), "exterior cell {:?} has intersections", cell.key);
        }
    }

    // cells adjacent to x = ±2.5 and y = ±2.5 are all crossed
    for index in [[5, 2], [5, 3], [0, 2], [0, 3], [2, 5], [3, 5], [2, 0], [3, 0]] {
        let cell = cells.iter().find(|c| c.key.index == index).unwrap();
        assert!(!sample_cell(&circle, cell, &config).is_empty(), "{index:?}");
    }
}

#[test]
fn sphere_vertices_lie_near_the_radius() {
    let radius = 2.5;
    let sphere = Sphere::<3>::at_origin(radius);
    let bounds = Aabb::cube(-3.0, 3.0).unwrap();
    let mesh = extract(&sphere, bounds, ExtractorConfig::uniform(6)).unwrap();

    assert!(mesh.vertex_count() > 0);
    for v in mesh.vertices.values() {
        let r = v.coords.norm();
        assert!((r - radius).abs() < 0.15, "vertex {v} at distance {r}");
    }
    assert_edges_are_adjacent(&mesh);
}

#[test]
fn interpolated_sphere_vertices_lie_near_the_radius() {
    let field = FnField::new(|p: &Point3| p.coords.norm() - 1.0);
    let bounds = Aabb::<3>::cube(-1.5, 1.5).unwrap();
    let mesh = extract(&field, bounds, ExtractorConfig::uniform(12)).unwrap();

    assert!(mesh.vertex_count() > 0);
    for v in mesh.vertices.values() {
        let r = v.coords.norm();
        assert!((r - 1.0).abs() < 0.15, "vertex {v} at distance {r}");
    }
    assert_edges_are_adjacent(&mesh);
}

#[test]
fn single_intersection_vertex_is_on_its_plane() {
    let sample = Hermite {
        point: Point3::new(0.4, -1.2, 2.0),
        normal: Vector::<3>::new(1.0, 2.0, -2.0).normalize(),
    };
    let v = solve_qef(&[sample], 1e-8, QefMethod::NormalEquations).unwrap();
    assert!(sample.normal.dot(&(v - sample.point)).abs() < 1e-6);
}

#[test]
fn adaptive_edges_connect_same_depth_neighbours() {
    let circle = Circle::at_origin(2.5);
    let bounds = Aabb::cube(-3.0, 3.0).unwrap();
    let mesh = extract(&circle, bounds, ExtractorConfig::adaptive(5)).unwrap();
    assert!(mesh.edge_count() > 0);
    assert_edges_are_adjacent(&mesh);
}

#[test]
fn cells_without_intersections_have_no_vertex() {
    let circle = Circle::at_origin(2.5);
    let bounds = Aabb::cube(-3.0, 3.0).unwrap();
    let extractor = SurfaceExtractor::new(&circle, bounds, ExtractorConfig::adaptive(4)).unwrap();
    let sampled = extractor.sample();
    let vertices = extractor.vertices(&sampled);

    for s in sampled.iter().filter(|s| s.samples.is_empty()) {
        assert!(!vertices.contains_key(&s.cell.key));
    }
}

fn assert_deterministic<const D: usize>(first: &DualMesh<D>, second: &DualMesh<D>) {
    assert_eq!(first.vertex_count(), second.vertex_count());
    for ((ka, va), (kb, vb)) in first.vertices.iter().zip(second.vertices.iter()) {
        assert_eq!(ka, kb);
        for axis in 0..D {
            assert_eq!(va[axis].to_bits(), vb[axis].to_bits(), "{ka:?}");
        }
    }
    let a: BTreeSet<_> = first.edges.iter().collect();
    let b: BTreeSet<_> = second.edges.iter().collect();
    assert_eq!(a, b);
}

#[test]
fn extraction_is_deterministic() {
    let torus = FnField::new(|p: &Point3| (p.x.hypot(p.y) - 1.0).hypot(p.z) - 0.4);
    let bounds = Aabb::<3>::cube(-1.6, 1.6).unwrap();
    let config = ExtractorConfig::uniform(10);
    let first = extract(&torus, bounds, config).unwrap();
    let second = extract(&torus, bounds, config).unwrap();
    assert!(!first.is_empty());
    assert_deterministic(&first, &second);

    let blob = FnField::new(|p: &Point2| p.x.powi(2) + 2.0 * p.y.powi(2) + 0.3 * p.x * p.y - 1.0);
    let bounds = Aabb::<2>::cube(-1.6, 1.6).unwrap();
    let config = ExtractorConfig::adaptive(5);
    let first = extract(&blob, bounds, config).unwrap();
    let second = extract(&blob, bounds, config).unwrap();
    assert!(!first.is_empty());
    assert_deterministic(&first, &second);
}

fn crossed_edges<const D: usize>(cell: &dual_contour::cell::Cell<D>) -> usize {
    cell_edges::<D>()
        .into_iter()
        .filter(|(a, b, _)| is_inside(cell.corner_values[*a]) != is_inside(cell.corner_values[*b]))
        .count()
}

#[test]
fn every_crossed_edge_of_a_sphere_is_sampled() {
    let sphere = Sphere::<3>::at_origin(1.0);
    let bounds = Aabb::cube(-1.25, 1.25).unwrap();
    let config = ExtractorConfig::uniform(5);
    for cell in enumerate_cells(&sphere, &bounds, &config).unwrap() {
        let crossed = crossed_edges(&cell);
        assert_eq!(sample_cell(&sphere, &cell, &config).len(), crossed, "cell {:?}", cell.key);
    }
}

#[test]
fn lattice_corners_on_the_surface_keep_their_crossings() {
    // unit spacing puts the poles (±1, 0, 0), (0, ±1, 0), (0, 0, ±1) on lattice corners
    let sphere = Sphere::<3>::at_origin(1.0);
    let bounds = Aabb::cube(-2.0, 2.0).unwrap();
    let config = ExtractorConfig::uniform(4);
    let mesh = extract(&sphere, bounds, config).unwrap();

    let mut crossed_cells = 0;
    for cell in enumerate_cells(&sphere, &bounds, &config).unwrap() {
        let crossed = crossed_edges(&cell);
        assert_eq!(sample_cell(&sphere, &cell, &config).len(), crossed, "cell {:?}", cell.key);
        if cell.has_sign_change() {
            crossed_cells += 1;
            assert!(mesh.vertex(&cell.key).is_some(), "crossed cell {:?} has no vertex", cell.key);
        }
    }
    assert_eq!(crossed_cells, 8);
    assert_eq!(mesh.vertex_count(), 8);

    let circle = Circle::at_origin(2.0);
    let bounds = Aabb::cube(-3.0, 3.0).unwrap();
    let config = ExtractorConfig::uniform(6);
    for cell in enumerate_cells(&circle, &bounds, &config).unwrap() {
        assert_eq!(sample_cell(&circle, &cell, &config).len(), crossed_edges(&cell), "cell {:?}", cell.key);
    }
}
