//! Site generation and relaxation
//!
//! Draws random sites in the domain rectangle and evens them out with
//! Lloyd's relaxation over a Voronoi tessellation.

mod lloyd;
mod points;
mod tessellation;

pub use lloyd::{clipped_centroid, improve, lloyd_relaxation, relax, LloydOptions};
pub use points::{centroid, generate_points, sort_by_x};
pub use tessellation::{
    circumcenter, SpadeTessellator, TessEdge, TessFace, TessVertex, Tessellation,
    TessellationAdapter, VertexKind,
};

use glam::DVec2;
use rand::Rng;

use crate::config::MeshConfig;
use crate::error::Result;

/// Generate relaxed sites from configuration
///
/// Returns the sites a mesh is built from: `config.points` uniform random
/// sites after `config.improvements` relaxation passes.
pub fn relaxed_points<R, T>(config: &MeshConfig, rng: &mut R, tessellator: &T) -> Result<Vec<DVec2>>
where
    R: Rng + ?Sized,
    T: TessellationAdapter + ?Sized,
{
    // Step 1: Generate random sites in the domain
    let points = generate_points(config.points, config.x_extent, config.y_extent, rng);

    // Step 2: Apply Lloyd's relaxation
    let options = LloydOptions {
        iterations: config.improvements,
        bounds: config.bounds(),
        debug_level: config.debug_level,
    };
    lloyd_relaxation(points, options, tessellator)
}
