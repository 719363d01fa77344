use std::collections::HashSet;

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use voronoi_mesh::*;

fn config(seed: u64, points: usize, improvements: usize) -> MeshConfig {
    MeshConfigBuilder::new()
        .seed(seed)
        .points(points)
        .unwrap()
        .extents(2.0, 1.0)
        .unwrap()
        .improvements(improvements)
        .unwrap()
        .debug_level(0)
        .build()
        .unwrap()
}

#[test]
fn test_mesh_properties() {
    let config = config(42, 600, 2);
    let mesh = Mesh::generate(&config).unwrap();
    let bounds = config.bounds();

    assert!(!mesh.is_empty());
    mesh.validate().unwrap();

    for (i, v) in mesh.vertices().iter().enumerate() {
        assert_eq!(v.index, i);
        assert!(bounds.contains(v.position()));
        assert!(v.neighbor_count() <= MAX_NEIGHBORS);
        assert_eq!(v.z, 0.0);
    }

    let mut pairs = HashSet::new();
    for (i, e) in mesh.edges().iter().enumerate() {
        assert_eq!(e.index, i);
        assert_ne!(e.source, e.target);
        assert!(pairs.insert((e.source.min(e.target), e.source.max(e.target))));
        assert!(mesh.neighbors(e.source).unwrap().contains(&e.target));
        assert!(mesh.neighbors(e.target).unwrap().contains(&e.source));
    }
}

#[test]
fn test_generate_with_matches_generate() {
    let config = config(9, 300, 1);

    let a = Mesh::generate(&config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let b = Mesh::generate_with(&config, &mut rng, &SpadeTessellator).unwrap();

    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.edges(), b.edges());
}

#[test]
fn test_relaxation_evens_out_edges() {
    // spread of edge lengths shrinks as the sites relax
    let spread = |mesh: &Mesh| {
        let lengths: Vec<f64> = mesh
            .edges()
            .iter()
            .map(|e| {
                let a = mesh.vertex(e.source).unwrap();
                let b = mesh.vertex(e.target).unwrap();
                a.distance(b)
            })
            .collect();
        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
        let var = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
        var.sqrt() / mean
    };

    let raw = Mesh::generate(&config(5, 500, 0)).unwrap();
    let relaxed = Mesh::generate(&config(5, 500, 4)).unwrap();

    assert!(spread(&relaxed) < spread(&raw));
}

#[test]
fn test_incline_on_clone_leaves_source() {
    let config = config(13, 400, 1);
    let source = Mesh::generate(&config).unwrap();

    let mut copy = source.clone();
    LinearTransform::from_slope(0.0, 1.0, config.z_extent)
        .apply(&mut copy)
        .unwrap();

    assert!(source.vertices().iter().all(|v| v.z == 0.0));
    for (orig, edited) in source.vertices().iter().zip(copy.vertices()) {
        assert_eq!((orig.x, orig.y), (edited.x, edited.y));
        assert_eq!(orig.neighbors(), edited.neighbors());
        // axis is the x axis, z_extent is 1
        assert_relative_eq!(edited.z, edited.y / 2.0, epsilon = 1e-12);
    }
    assert_eq!(source.edges(), copy.edges());
}

#[test]
fn test_edit_session_commit_and_discard() {
    let config = config(21, 200, 1);
    let mesh = Mesh::generate(&config).unwrap();

    let line = Line::new(1.0, 0.0, 0.0).unwrap();
    let incline = LinearTransform::new(line, 0.5, config.z_extent);

    let mut rejected = EditSession::begin(&mesh);
    rejected.apply(&incline).unwrap();
    rejected.discard();
    assert!(mesh.vertices().iter().all(|v| v.z == 0.0));

    let mut accepted = EditSession::begin(&mesh);
    accepted.apply(&incline).unwrap();
    let edited = accepted.commit();

    let max_z = edited.vertices().iter().map(|v| v.z).fold(f64::MIN, f64::max);
    assert!(max_z > 0.0 && max_z <= 0.25);
    edited.validate().unwrap();
}

#[test]
fn test_degenerate_incline_rejected() {
    assert_eq!(Line::new(0.0, 0.0, 0.5).unwrap_err(), MeshError::DegenerateLine);
}
