use dual_contour::{
    ExtractorConfig, SurfaceExtractor,
    field::Circle,
    types::Aabb,
};

const RADIUS: f64 = 2.5;
const MAX_DEPTH: u32 = 4;

fn main() -> dual_contour::Result<()> {
    env_logger::init();
    log::info!("Circle Quadtree Example");

    let circle = Circle::at_origin(RADIUS);
    let bounds = Aabb::cube(-3.0, 3.0)?;
    let extractor = SurfaceExtractor::new(&circle, bounds, ExtractorConfig::adaptive(MAX_DEPTH))?;

    let leaves = extractor.cells();
    let mesh = extractor.extract();
    log::info!(
        "{} leaves, {} vertices, {} edges",
        leaves.len(),
        mesh.vertex_count(),
        mesh.edge_count()
    );

    let worst = mesh
        .vertices
        .values()
        .map(|v| (v.coords.norm() - RADIUS).abs())
        .fold(0.0, f64::max);
    log::info!("max radial error: {worst:.5}");

    for [a, b] in mesh.segments() {
        println!("{:.4} {:.4} {:.4} {:.4}", a.x, a.y, b.x, b.y);
    }
    Ok(())
}
