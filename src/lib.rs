//! Relaxed Voronoi coordinate meshes
//!
//! A standalone library for generating the planar coordinate mesh that
//! procedural terrain is built on: evenly spread Voronoi vertices in a
//! rectangular domain, each joined to at most three neighbors.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_mesh::*;
//!
//! // Generate a mesh
//! let config = MeshConfigBuilder::new()
//!     .seed(42)
//!     .density(MeshDensity::Coarse)
//!     .improvements(2).unwrap()
//!     .build().unwrap();
//!
//! let mesh = Mesh::generate(&config).unwrap();
//! println!("{} vertices, {} edges", mesh.vertex_count(), mesh.edge_count());
//!
//! // Preview an incline on a copy, then keep it
//! let mut session = EditSession::begin(&mesh);
//! session.apply(&LinearTransform::from_slope(0.0, 0.5, config.z_extent)).unwrap();
//! let inclined = session.commit();
//! assert_eq!(inclined.edge_count(), mesh.edge_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) nearest-vertex lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, vertices and edges

// Modules
pub mod config;
pub mod edit;
pub mod error;
pub mod generation;
pub mod mesh;
pub mod registry;
pub mod vertex;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use config::{Bounds, MeshConfig, MeshConfigBuilder, MeshDensity, MAX_IMPROVEMENTS};
pub use edit::{EditSession, Line, LinearTransform, MeshEdit};
pub use error::{MeshError, Result};
pub use generation::{LloydOptions, SpadeTessellator, Tessellation, TessellationAdapter};
pub use mesh::Mesh;
pub use registry::{EdgeRegistry, VertexRegistry};
pub use vertex::{Edge, Vertex, MAX_NEIGHBORS};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mesh_is_send_sync() {
        assert_send_sync::<Mesh>();
        assert_send_sync::<EditSession>();
    }
}
