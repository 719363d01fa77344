//! Demonstration of mesh generation and a speculative incline

use voronoi_mesh::*;

fn main() -> Result<()> {
    println!("Generating mesh...");

    let config = MeshConfigBuilder::new()
        .seed(42)
        .density(MeshDensity::Normal)
        .extents(2.0, 1.0)?
        .z_extent(0.5)?
        .improvements(2)?
        .debug_level(0)
        .build()?;

    let mesh = Mesh::generate(&config)?;
    mesh.validate()?;

    println!("\nMesh statistics:");
    println!("  Sites: {}", config.points);
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Edges: {}", mesh.edge_count());

    let border = mesh.vertices().iter().filter(|v| v.is_on_edge()).count();
    println!("  Border vertices: {}", border);

    let total_length: f64 = mesh
        .edges()
        .iter()
        .filter_map(|e| Some(mesh.vertex(e.source)?.distance(mesh.vertex(e.target)?)))
        .sum();
    println!(
        "  Mean edge length: {:.4}",
        total_length / mesh.edge_count().max(1) as f64
    );

    // Preview an incline on a copy
    let incline = LinearTransform::from_slope(2.0, 0.8, config.z_extent);
    let mut session = EditSession::begin(&mesh);
    session.apply(&incline)?;

    let (low, high) = session
        .draft()
        .vertices()
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v.z), hi.max(v.z)));
    println!("\nInclined draft: z from {:.4} to {:.4}", low, high);

    let untouched = mesh.vertices().iter().all(|v| v.z == 0.0);
    println!("Source mesh still flat: {}", untouched);

    let inclined = session.commit();

    println!("Committed mesh: {} vertices", inclined.vertex_count());

    #[cfg(feature = "spatial-index")]
    {
        if let Some(i) = inclined.nearest_vertex(0.0, 0.0) {
            if let Some(v) = inclined.vertex(i) {
                println!(
                    "Vertex nearest the origin: #{} at ({:.4}, {:.4}), z={:.4}",
                    i, v.x, v.y, v.z
                );
            }
        }
    }

    // Compare densities
    println!("\n=== Testing all densities ===");
    for density in [MeshDensity::Coarse, MeshDensity::Normal, MeshDensity::Fine] {
        let config = MeshConfigBuilder::new()
            .seed(42)
            .density(density)
            .debug_level(0)
            .build()?;

        let mesh = Mesh::generate(&config)?;
        println!(
            "{}: {} sites, {} vertices, {} edges",
            density.name(),
            config.points,
            mesh.vertex_count(),
            mesh.edge_count()
        );
    }

    Ok(())
}
