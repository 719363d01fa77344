use crate::error::{MeshError, Result};
use crate::vertex::Edge;

use super::{next_slot, table_size};

/// One canonical [`Edge`] per unordered pair of vertex indices
///
/// `(a, b)` and `(b, a)` are the same edge; the first orientation seen is
/// the one stored.
#[derive(Debug, Clone)]
pub struct EdgeRegistry {
    edges: Vec<Edge>,
    capacity: usize,
    /// slot -> index into `edges`
    table: Vec<Option<usize>>,
}

impl EdgeRegistry {
    /// Allocate a registry for at most `max_edges` edges
    pub fn new(max_edges: usize) -> Self {
        Self {
            edges: Vec::with_capacity(max_edges),
            capacity: max_edges,
            table: vec![None; table_size(max_edges)],
        }
    }

    /// Find the edge joining `v1` and `v2`, creating it if it is new
    ///
    /// Returns the edge index.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` when a new edge would exceed the registry's
    /// capacity.
    pub fn find_or_create(&mut self, v1: usize, v2: usize) -> Result<usize> {
        // the sum is symmetric, so both orientations share a home slot
        let mut slot = v1.wrapping_add(v2) % self.table.len();
        while let Some(index) = self.table[slot] {
            if self.edges[index].connects(v1, v2) {
                return Ok(index);
            }
            slot = next_slot(slot, self.table.len());
        }

        if self.edges.len() >= self.capacity {
            return Err(MeshError::CapacityExceeded {
                registry: "edge",
                capacity: self.capacity,
            });
        }

        let index = self.edges.len();
        self.edges.push(Edge::new(v1, v2, index));
        self.table[slot] = Some(index);
        Ok(index)
    }

    /// Number of distinct edges registered
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if no edge is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Maximum number of edges this registry accepts
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get an edge by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Registered edges in insertion order
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consume the registry, keeping only the edges
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_symmetry() {
        let mut registry = EdgeRegistry::new(4);

        let forward = registry.find_or_create(2, 5).unwrap();
        let backward = registry.find_or_create(5, 2).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(registry.len(), 1);

        let edge = registry.get(forward).unwrap();
        assert_eq!((edge.source, edge.target), (2, 5));
    }

    #[test]
    fn test_same_sum_distinct_edges() {
        // (0,4), (1,3) and (2,2) share a home slot
        let mut registry = EdgeRegistry::new(6);

        let a = registry.find_or_create(0, 4).unwrap();
        let b = registry.find_or_create(1, 3).unwrap();
        let c = registry.find_or_create(3, 1).unwrap();
        let d = registry.find_or_create(4, 0).unwrap();

        assert_ne!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, d);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_sequential_indices() {
        let mut registry = EdgeRegistry::new(10);
        let pairs = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 0)];

        for (expected, &(a, b)) in pairs.iter().enumerate() {
            assert_eq!(registry.find_or_create(a, b).unwrap(), expected);
        }
        for (i, edge) in registry.edges().iter().enumerate() {
            assert_eq!(edge.index, i);
        }
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut registry = EdgeRegistry::new(1);
        registry.find_or_create(0, 1).unwrap();
        assert_eq!(registry.find_or_create(1, 0).unwrap(), 0);

        let err = registry.find_or_create(1, 2).unwrap_err();
        assert_eq!(
            err,
            MeshError::CapacityExceeded {
                registry: "edge",
                capacity: 1
            }
        );
        assert_eq!(registry.capacity(), 1);
    }

    #[test]
    fn test_into_edges() {
        let mut registry = EdgeRegistry::new(3);
        assert!(registry.is_empty());
        registry.find_or_create(7, 8).unwrap();

        let edges = registry.into_edges();
        assert_eq!(edges, vec![Edge::new(7, 8, 0)]);
    }
}
