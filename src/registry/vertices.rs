use crate::error::{MeshError, Result};
use crate::vertex::Vertex;

use super::{next_slot, table_size};

/// One canonical [`Vertex`] per distinct coordinate pair
///
/// Coordinates are compared exactly: two points a rounding error apart are
/// different vertices.
///
/// # Example
///
/// ```rust
/// use voronoi_mesh::VertexRegistry;
///
/// let mut registry = VertexRegistry::new(16, 1.0, 1.0);
/// let a = registry.find_or_create(0.1, 0.2).unwrap();
/// let b = registry.find_or_create(-0.3, 0.0).unwrap();
/// assert_eq!(registry.find_or_create(0.1, 0.2).unwrap(), a);
/// assert_eq!((a, b), (0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct VertexRegistry {
    vertices: Vec<Vertex>,
    capacity: usize,
    /// slot -> index into `vertices`
    table: Vec<Option<usize>>,
    x_extent: f64,
    y_extent: f64,
}

impl VertexRegistry {
    /// Allocate a registry for at most `max_vertices` vertices
    ///
    /// The extents are those of the domain the coordinates come from; they
    /// normalize the hash so that it spreads over the whole table.
    pub fn new(max_vertices: usize, x_extent: f64, y_extent: f64) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            capacity: max_vertices,
            table: vec![None; table_size(max_vertices)],
            x_extent,
            y_extent,
        }
    }

    /// Find the vertex at `(x, y)`, creating it if it is new
    ///
    /// Returns the vertex index. New vertices get the next sequential index.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` when a new vertex would exceed the
    /// registry's capacity.
    pub fn find_or_create(&mut self, x: f64, y: f64) -> Result<usize> {
        let mut slot = self.slot_for(x, y);
        while let Some(index) = self.table[slot] {
            let known = &self.vertices[index];
            if known.x == x && known.y == y {
                return Ok(index);
            }
            slot = next_slot(slot, self.table.len());
        }

        if self.vertices.len() >= self.capacity {
            return Err(MeshError::CapacityExceeded {
                registry: "vertex",
                capacity: self.capacity,
            });
        }

        let index = self.vertices.len();
        self.vertices.push(Vertex::new(x, y, index));
        self.table[slot] = Some(index);
        Ok(index)
    }

    /// Home slot: the shifted coordinate sum scaled to the table
    fn slot_for(&self, x: f64, y: f64) -> usize {
        let size = self.table.len();
        let value = ((x + self.x_extent / 2.0) + (y + self.y_extent / 2.0)) * size as f64;
        // saturating cast; NaN lands in slot 0
        (value as i64).rem_euclid(size as i64) as usize
    }

    /// Number of distinct vertices registered
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if no vertex is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Maximum number of vertices this registry accepts
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a vertex by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Get a vertex by index, mutably
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vertex> {
        self.vertices.get_mut(index)
    }

    /// Registered vertices in insertion order
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Consume the registry, keeping only the vertices
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}
