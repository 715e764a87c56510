use dual_contour::{
    ExtractorConfig, QefMethod, extract,
    field::{FnField, Sphere},
    types::{Aabb, Point3},
};

const RADIUS: f64 = 2.5;
const RESOLUTION: usize = 6;

fn main() -> dual_contour::Result<()> {
    env_logger::init();
    log::info!("Sphere Grid Example");

    let bounds = Aabb::<3>::cube(-3.0, 3.0)?;
    let config = ExtractorConfig::uniform(RESOLUTION);

    // closed-form crossings and analytic normals
    let exact = extract(&Sphere::<3>::at_origin(RADIUS), bounds, config)?;
    report("analytic sphere", &exact);

    // the same surface through linear interpolation and finite differences
    let sampled = FnField::new(|p: &Point3| p.coords.norm() - RADIUS);
    let approx = extract(&sampled, bounds, config.with_qef_method(QefMethod::MassPoint))?;
    report("sampled sphere, mass point", &approx);

    // Wavefront OBJ: one `v` per vertex, one `l` per edge
    let index: std::collections::BTreeMap<_, _> =
        exact.vertices.keys().enumerate().map(|(i, k)| (*k, i + 1)).collect();
    for v in exact.vertices.values() {
        println!("v {:.6} {:.6} {:.6}", v.x, v.y, v.z);
    }
    for edge in &exact.edges {
        println!("l {} {}", index[&edge.a], index[&edge.b]);
    }
    Ok(())
}

fn report(label: &str, mesh: &dual_contour::DualMesh<3>) {
    let (min, max) = mesh
        .vertices
        .values()
        .map(|v| v.coords.norm())
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), r| (lo.min(r), hi.max(r)));
    log::info!(
        "{label}: {} vertices, {} edges, radius range [{min:.4}, {max:.4}]",
        mesh.vertex_count(),
        mesh.edge_count()
    );
}
