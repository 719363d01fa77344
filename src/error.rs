//! Error types for mesh generation

use thiserror::Error;

/// Errors that can occur while generating or editing a mesh
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pre-sized registry ran out of room
    ///
    /// Registries are sized from the tessellation they index, so this is a
    /// broken precondition rather than something a caller can recover from.
    #[error("{registry} registry overflow: capacity is {capacity}")]
    CapacityExceeded {
        /// Which registry overflowed ("vertex" or "edge")
        registry: &'static str,
        /// Number of entries the registry was sized for
        capacity: usize,
    },

    /// A vertex would be given more neighbors than the mesh allows
    #[error("vertex {vertex} already has {bound} neighbors")]
    NeighborOverflow {
        /// Index of the offending vertex
        vertex: usize,
        /// Neighbor bound that was hit
        bound: usize,
    },

    /// The tessellation has a site without an owning face
    #[error("no face owns the site at <{x:.5},{y:.5}>")]
    MissingFace {
        /// Site x coordinate
        x: f64,
        /// Site y coordinate
        y: f64,
    },

    /// A tessellation edge or face refers to a vertex id it does not have
    #[error("tessellation refers to missing vertex {0}")]
    DanglingVertex(usize),

    /// A line with `a == b == 0` has no direction
    #[error("degenerate line: a and b are both zero")]
    DegenerateLine,

    /// Requested vertex index does not exist
    #[error("vertex not found: {0}")]
    VertexNotFound(usize),

    /// A mesh failed its consistency check
    #[error("inconsistent mesh: {0}")]
    InvalidMesh(String),
}

/// Result type alias for mesh operations
pub type Result<T> = std::result::Result<T, MeshError>;
