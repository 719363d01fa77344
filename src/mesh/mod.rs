//! The coordinate mesh
//!
//! A [`Mesh`] is the canonical graph distilled from a Voronoi tessellation:
//! every distinct in-domain Voronoi vertex appears once, every distinct
//! in-domain Voronoi edge appears once, and each vertex lists its
//! neighbors by index.

mod validate;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use crate::config::MeshConfig;
use crate::error::{MeshError, Result};
use crate::generation::{relaxed_points, SpadeTessellator, TessellationAdapter};
use crate::registry::{EdgeRegistry, VertexRegistry};
use crate::vertex::{Edge, Vertex};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A bounded-degree planar graph over relaxed Voronoi vertices
///
/// Topology and positions are fixed once the mesh is built; edit operations
/// only change elevations. `Clone` produces an independent deep copy, which
/// is how speculative edits are made (see [`EditSession`](crate::EditSession)).
///
/// # Examples
///
/// ```
/// use voronoi_mesh::*;
///
/// let config = MeshConfigBuilder::new()
///     .seed(42)
///     .points(256)
///     .unwrap()
///     .debug_level(0)
///     .build()
///     .unwrap();
///
/// let mesh = Mesh::generate(&config).unwrap();
/// assert!(mesh.vertex_count() > 0);
///
/// for vertex in mesh.vertices() {
///     assert!(vertex.neighbor_count() <= MAX_NEIGHBORS);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    /// All vertices (indexed by vertex index)
    vertices: Vec<Vertex>,

    /// All edges (indexed by edge index)
    edges: Vec<Edge>,

    /// Nearest-vertex lookups (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Mesh {
    /// Generate a mesh from a configuration
    ///
    /// Sites come from a `ChaCha8Rng` seeded with `config.seed`, so the same
    /// configuration always yields the same mesh.
    ///
    /// # Arguments
    ///
    /// * `config` - Domain, point count, relaxation passes and verbosity
    ///
    /// # Returns
    ///
    /// `Result<Mesh>` - Generated mesh or error
    pub fn generate(config: &MeshConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::generate_with(config, &mut rng, &SpadeTessellator)
    }

    /// Generate a mesh with a caller-provided random source and tessellator
    ///
    /// Pipeline:
    /// 1. draw `config.points` uniform sites
    /// 2. run `config.improvements` relaxation passes
    /// 3. build the mesh from the tessellation of the relaxed sites
    ///
    /// # Errors
    ///
    /// Propagates relaxation and construction errors.
    pub fn generate_with<R, T>(config: &MeshConfig, rng: &mut R, tessellator: &T) -> Result<Self>
    where
        R: Rng + ?Sized,
        T: TessellationAdapter + ?Sized,
    {
        let start = Instant::now();

        let relaxed = relaxed_points(config, rng, tessellator)?;
        let mesh = Self::build(&relaxed, config, tessellator)?;

        if config.debug_level > 1 {
            tracing::debug!(
                seed = config.seed,
                elapsed = ?start.elapsed(),
                "mesh generation finished"
            );
        }

        Ok(mesh)
    }

    /// Build a mesh from the tessellation of the given points
    ///
    /// Each tessellation edge with both endpoints inside the domain becomes
    /// a mesh edge between canonical vertices. Edges reaching outside the
    /// domain are dropped, and so are zero-length edges (coincident Voronoi
    /// vertices of cocircular sites).
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` or `NeighborOverflow` if the tessellation
    /// breaks the registry sizing or degree bound, and `DanglingVertex` if
    /// an edge refers to a vertex the tessellation does not have. The
    /// partial mesh is discarded.
    ///
    /// Four or more cocircular sites (a regular lattice, say) share one
    /// circumcenter with four or more edges, which aborts the build with
    /// `NeighborOverflow`.
    pub fn build<T>(points: &[DVec2], config: &MeshConfig, tessellator: &T) -> Result<Self>
    where
        T: TessellationAdapter + ?Sized,
    {
        let tessellation = tessellator.tessellate(points);
        let bounds = config.bounds();

        let mut vertex_registry = VertexRegistry::new(
            tessellation.num_vertices(),
            config.x_extent,
            config.y_extent,
        );
        let mut edge_registry = EdgeRegistry::new(tessellation.num_edges());

        for tess_edge in tessellation.edges() {
            let source = tessellation
                .vertex(tess_edge.source)
                .ok_or(MeshError::DanglingVertex(tess_edge.source))?;
            let target = tessellation
                .vertex(tess_edge.target)
                .ok_or(MeshError::DanglingVertex(tess_edge.target))?;
            if !bounds.contains(source.position) || !bounds.contains(target.position) {
                continue;
            }
            if source.position == target.position {
                continue;
            }

            let v1 = vertex_registry.find_or_create(source.position.x, source.position.y)?;
            let v2 = vertex_registry.find_or_create(target.position.x, target.position.y)?;
            link(&mut vertex_registry, v1, v2)?;
            edge_registry.find_or_create(v1, v2)?;
        }

        if config.debug_level > 0 {
            tracing::info!(
                points = points.len(),
                vertices = vertex_registry.len(),
                tessellation_vertices = tessellation.num_vertices(),
                edges = edge_registry.len(),
                tessellation_edges = tessellation.num_edges(),
                "mesh built"
            );
        }

        Ok(Self::assemble(
            vertex_registry.into_vertices(),
            edge_registry.into_edges(),
        ))
    }

    /// Rebuild a mesh from its parts, checking its consistency
    ///
    /// # Errors
    ///
    /// Returns `InvalidMesh` naming the first broken invariant.
    pub fn from_parts(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self> {
        validate::check(&vertices, &edges)?;
        Ok(Self::assemble(vertices, edges))
    }

    fn assemble(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let positions: Vec<DVec2> = vertices.iter().map(Vertex::position).collect();
            SpatialIndex::new(&positions)
        };

        Self {
            vertices,
            edges,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Check the mesh invariants
    ///
    /// Vertex and edge indices match their positions, every edge's
    /// endpoints list each other as neighbors, every neighbor link has an
    /// edge, and no vertex exceeds the neighbor bound.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMesh` naming the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        validate::check(&self.vertices, &self.edges)
    }

    /// All vertices in discovery order
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in discovery order
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a vertex by index
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Get an edge by index
    #[inline]
    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the mesh has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Neighbor indices of a vertex
    ///
    /// # Returns
    ///
    /// `None` if the index is out of range
    pub fn neighbors(&self, index: usize) -> Option<&[usize]> {
        self.vertex(index).map(Vertex::neighbors)
    }

    /// Set the elevation of one vertex
    ///
    /// # Errors
    ///
    /// Returns `VertexNotFound` if the index is out of range.
    pub fn set_elevation(&mut self, index: usize, z: f64) -> Result<()> {
        let vertex = self
            .vertices
            .get_mut(index)
            .ok_or(MeshError::VertexNotFound(index))?;
        vertex.z = z;
        Ok(())
    }

    /// Mutable access to every elevation, in vertex order
    pub fn elevations_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.vertices.iter_mut().map(|v| &mut v.z)
    }

    /// Every vertex position with mutable access to its elevation
    pub fn elevations_with_position_mut(
        &mut self,
    ) -> impl Iterator<Item = (DVec2, &mut f64)> + '_ {
        self.vertices.iter_mut().map(|v| (DVec2::new(v.x, v.y), &mut v.z))
    }

    /// Find the vertex closest to a position (requires spatial-index feature)
    ///
    /// # Returns
    ///
    /// Index of the nearest vertex, or `None` for an empty mesh
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_mesh::*;
    /// # let config = MeshConfigBuilder::new().seed(1).points(128).unwrap().build().unwrap();
    /// let mesh = Mesh::generate(&config).unwrap();
    /// let nearest = mesh.nearest_vertex(0.0, 0.0).unwrap();
    /// assert!(mesh.vertex(nearest).is_some());
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn nearest_vertex(&self, x: f64, y: f64) -> Option<usize> {
        self.spatial_index.find_nearest(DVec2::new(x, y))
    }

    /// Consume the mesh, keeping its vertex and edge arrays
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Edge>) {
        (self.vertices, self.edges)
    }
}

/// Make `a` and `b` neighbors of each other
fn link(registry: &mut VertexRegistry, a: usize, b: usize) -> Result<()> {
    registry
        .get_mut(a)
        .ok_or(MeshError::VertexNotFound(a))?
        .add_neighbor(b)?;
    registry
        .get_mut(b)
        .ok_or(MeshError::VertexNotFound(b))?
        .add_neighbor(a)
}
