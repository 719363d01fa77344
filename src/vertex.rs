//! Mesh vertex and edge records
//!
//! Vertices and edges live in arenas owned by a [`Mesh`](crate::Mesh).
//! Neighbor links and edge endpoints are indices into the vertex arena.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Maximum number of neighbors a vertex can have
///
/// Vertices of a Voronoi diagram over points in general position have
/// exactly three incident edges; vertices on the domain boundary lose the
/// edges that leave the box and have fewer.
pub const MAX_NEIGHBORS: usize = 3;

/// A single mesh vertex
///
/// # Memory Usage
///
/// - x, y, z: 24 bytes
/// - index: 8 bytes
/// - neighbors: 24 bytes header + up to 3 indices
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// X coordinate, relative to the domain centre
    pub x: f64,

    /// Y coordinate, relative to the domain centre
    pub y: f64,

    /// Elevation, 0 until an edit operation sets it
    pub z: f64,

    /// Position of this vertex in its mesh (0 = first vertex discovered)
    pub index: usize,

    neighbors: Vec<usize>,
}

impl Vertex {
    /// Create an unconnected vertex at ground level
    pub fn new(x: f64, y: f64, index: usize) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            index,
            neighbors: Vec::with_capacity(MAX_NEIGHBORS),
        }
    }

    /// The vertex position in the plane
    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Indices of adjacent vertices
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Get the number of neighbors
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if the vertex with the given index is a neighbor
    #[inline]
    pub fn is_neighbor(&self, index: usize) -> bool {
        self.neighbors.contains(&index)
    }

    /// Is this vertex on the border of the mesh
    ///
    /// Interior vertices have three neighbors; vertices whose edges were cut
    /// off by the domain boundary have fewer.
    #[inline]
    pub fn is_on_edge(&self) -> bool {
        self.neighbors.len() < MAX_NEIGHBORS
    }

    /// Note that `index` is adjacent to this vertex
    ///
    /// Adding a known neighbor again does nothing.
    ///
    /// # Errors
    ///
    /// Returns `NeighborOverflow` if a new neighbor would exceed
    /// [`MAX_NEIGHBORS`].
    pub fn add_neighbor(&mut self, index: usize) -> Result<()> {
        if self.is_neighbor(index) {
            return Ok(());
        }
        if self.neighbors.len() >= MAX_NEIGHBORS {
            return Err(MeshError::NeighborOverflow {
                vertex: self.index,
                bound: MAX_NEIGHBORS,
            });
        }
        self.neighbors.push(index);
        Ok(())
    }

    /// Euclidean distance between two vertices in the plane
    pub fn distance(&self, other: &Vertex) -> f64 {
        self.position().distance(other.position())
    }
}

/// A connection between two adjacent vertices
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Index of the first endpoint
    pub source: usize,
    /// Index of the second endpoint
    pub target: usize,
    /// Position of this edge in its mesh
    pub index: usize,
}

impl Edge {
    /// Create an edge between two vertex indices
    pub fn new(source: usize, target: usize, index: usize) -> Self {
        Self {
            source,
            target,
            index,
        }
    }

    /// Does this edge join `a` and `b`, in either order
    #[inline]
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The endpoint opposite `index`, if `index` is an endpoint
    pub fn other(&self, index: usize) -> Option<usize> {
        if self.source == index {
            Some(self.target)
        } else if self.target == index {
            Some(self.source)
        } else {
            None
        }
    }
}
