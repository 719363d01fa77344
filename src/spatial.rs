//! Spatial indexing for fast position-to-vertex lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around KD-tree for nearest-vertex queries
///
/// Editors use this to turn a cursor position into the mesh vertex under
/// it. The tree is built once per mesh; mesh positions never change after
/// construction, so it never goes stale.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct SpatialIndex {
    // kiddo's immutable tree cannot be built from an empty slice
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
    len: usize,
}

impl SpatialIndex {
    /// Build a spatial index over planar positions
    ///
    /// # Arguments
    ///
    /// * `positions` - Vertex positions; item `i` of a query result is the
    ///   index into this slice
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_mesh::{DVec2, SpatialIndex};
    ///
    /// let positions = vec![
    ///     DVec2::new(-0.4, 0.0),
    ///     DVec2::new(0.4, 0.0),
    ///     DVec2::new(0.0, 0.4),
    /// ];
    ///
    /// let index = SpatialIndex::new(&positions);
    /// assert_eq!(index.find_nearest(DVec2::new(0.3, 0.1)), Some(1));
    /// ```
    pub fn new(positions: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();
        let tree = if points.is_empty() {
            None
        } else {
            Some(ImmutableKdTree::new_from_slice(&points))
        };

        Self {
            tree,
            len: points.len(),
        }
    }

    /// Find the indexed position closest to `position`
    ///
    /// # Returns
    ///
    /// Index of the nearest position, or `None` if the index is empty
    pub fn find_nearest(&self, position: DVec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let nearest = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        Some(nearest.item)
    }

    /// Number of indexed positions
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing is indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.len).finish()
    }
}
