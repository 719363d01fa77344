//! Voronoi tessellation of point sites
//!
//! The rest of the crate only sees the [`Tessellation`] graph produced by a
//! [`TessellationAdapter`]. The default adapter derives the Voronoi diagram
//! as the dual of a `spade` Delaunay triangulation: one Voronoi vertex per
//! triangle (its circumcenter), one Voronoi edge per triangulation edge.
//!
//! Voronoi cells on the convex hull are unbounded. Their open rays end in
//! [`VertexKind::Far`] stand-in vertices placed far outside the sites'
//! bounding box, so callers can treat them like any other vertex outside the
//! domain.

use glam::DVec2;
use spade::handles::{DirectedEdgeHandle, FaceHandle, InnerTag};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;

/// How far beyond the sites' bounding box open rays are cut, as a multiple
/// of the box span
const FAR_DISTANCE_FACTOR: f64 = 1000.0;

type Delaunay = DelaunayTriangulation<Point2<f64>>;

/// Role of a tessellation vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// One of the input sites
    Site,
    /// A Voronoi vertex (meeting point of three or more cells)
    Internal,
    /// End of an unbounded Voronoi ray, far outside the sites
    Far,
}

/// A vertex of the tessellation graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessVertex {
    /// Position in the plane
    pub position: DVec2,
    /// What this vertex stands for
    pub kind: VertexKind,
}

impl TessVertex {
    /// Create a vertex
    pub fn new(position: DVec2, kind: VertexKind) -> Self {
        Self { position, kind }
    }
}

/// An edge between two tessellation vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessEdge {
    /// Id of the first endpoint
    pub source: usize,
    /// Id of the second endpoint
    pub target: usize,
}

impl TessEdge {
    /// Create an edge
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }
}

/// The Voronoi cell owned by one site
#[derive(Debug, Clone, PartialEq)]
pub struct TessFace {
    /// Id of the owning site vertex
    pub site: usize,
    /// Ids of the cell's boundary vertices, in order around the site
    pub boundary: Vec<usize>,
}

impl TessFace {
    /// Create a face
    pub fn new(site: usize, boundary: Vec<usize>) -> Self {
        Self { site, boundary }
    }

    /// Boundary edges as `(source, target)` pairs, closing the loop
    pub fn boundary_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.boundary.len();
        (0..n).map(move |i| (self.boundary[i], self.boundary[(i + 1) % n]))
    }
}

/// Planar graph produced by a tessellation
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    vertices: Vec<TessVertex>,
    edges: Vec<TessEdge>,
    faces: Vec<TessFace>,
    face_by_site: HashMap<usize, usize>,
}

impl Tessellation {
    /// Assemble a tessellation from its parts
    ///
    /// Faces are indexed by their site; if two faces claim the same site the
    /// first one wins.
    pub fn new(vertices: Vec<TessVertex>, edges: Vec<TessEdge>, faces: Vec<TessFace>) -> Self {
        let mut face_by_site = HashMap::with_capacity(faces.len());
        for (face_idx, face) in faces.iter().enumerate() {
            face_by_site.entry(face.site).or_insert(face_idx);
        }

        Self {
            vertices,
            edges,
            faces,
            face_by_site,
        }
    }

    /// All vertices, sites first for the spade adapter
    #[inline]
    pub fn vertices(&self) -> &[TessVertex] {
        &self.vertices
    }

    /// All edges
    #[inline]
    pub fn edges(&self) -> &[TessEdge] {
        &self.edges
    }

    /// All faces
    #[inline]
    pub fn faces(&self) -> &[TessFace] {
        &self.faces
    }

    /// Get a vertex by id
    #[inline]
    pub fn vertex(&self, id: usize) -> Option<&TessVertex> {
        self.vertices.get(id)
    }

    /// Number of vertices of every kind
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over the site vertices with their ids, in site order
    pub fn sites(&self) -> impl Iterator<Item = (usize, &TessVertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.kind == VertexKind::Site)
    }

    /// Find the face owned by a site vertex
    pub fn face_of_site(&self, site: usize) -> Option<&TessFace> {
        self.face_by_site.get(&site).map(|&idx| &self.faces[idx])
    }
}

/// A Voronoi primitive: sites in, tessellation graph out
///
/// Implementations may emit vertices far outside the sites' bounding box;
/// consumers filter by explicit bounds checks.
pub trait TessellationAdapter {
    /// Tessellate the plane around the given sites
    fn tessellate(&self, sites: &[DVec2]) -> Tessellation;
}

/// Voronoi tessellation as the dual of a `spade` Delaunay triangulation
///
/// Sites appear in the output in input order. Exact duplicate sites are
/// merged by the triangulation and appear once; sites with non-finite
/// coordinates are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeTessellator;

impl TessellationAdapter for SpadeTessellator {
    fn tessellate(&self, sites: &[DVec2]) -> Tessellation {
        let mut triangulation = Delaunay::new();
        for site in sites {
            if let Err(err) = triangulation.insert(Point2::new(site.x, site.y)) {
                tracing::warn!(x = site.x, y = site.y, ?err, "skipping unusable site");
            }
        }

        DualBuilder::new(&triangulation, far_distance(sites)).build()
    }
}

/// Length of the stand-in segment for open rays
fn far_distance(sites: &[DVec2]) -> f64 {
    let (min, max) = sites
        .iter()
        .filter(|p| p.is_finite())
        .fold((DVec2::splat(f64::MAX), DVec2::splat(f64::MIN)), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        });
    let span = (max - min).max_element().max(0.0);
    FAR_DISTANCE_FACTOR * (1.0 + span)
}

/// Circumcenter of a triangle
///
/// Falls back to the centroid for (nearly) collinear triangles.
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> DVec2 {
    // Cramer's rule on the two perpendicular bisectors
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < f64::EPSILON {
        return (a + b + c) / 3.0;
    }

    let a2 = a.length_squared();
    let b2 = b.length_squared();
    let c2 = c.length_squared();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    DVec2::new(ux, uy)
}

fn to_dvec(p: Point2<f64>) -> DVec2 {
    DVec2::new(p.x, p.y)
}

/// Walks a triangulation once and emits its Voronoi dual
struct DualBuilder<'a> {
    triangulation: &'a Delaunay,
    far_distance: f64,
    vertices: Vec<TessVertex>,
    /// triangulation vertex index -> tessellation site id
    site_ids: HashMap<usize, usize>,
    /// inner face index -> circumcenter vertex id
    circumcenter_ids: HashMap<usize, usize>,
    /// directed edge index (outer face on its left) -> far vertex id
    far_ids: HashMap<usize, usize>,
}

type DirectedEdge<'a> = DirectedEdgeHandle<'a, Point2<f64>, (), (), ()>;
type InnerFace<'a> = FaceHandle<'a, InnerTag, Point2<f64>, (), (), ()>;

impl<'a> DualBuilder<'a> {
    fn new(triangulation: &'a Delaunay, far_distance: f64) -> Self {
        Self {
            triangulation,
            far_distance,
            vertices: Vec::with_capacity(
                triangulation.num_vertices() + triangulation.num_inner_faces(),
            ),
            site_ids: HashMap::with_capacity(triangulation.num_vertices()),
            circumcenter_ids: HashMap::with_capacity(triangulation.num_inner_faces()),
            far_ids: HashMap::new(),
        }
    }

    fn build(mut self) -> Tessellation {
        let triangulation = self.triangulation;

        // sites first, in insertion order
        for vertex in triangulation.vertices() {
            let id = self.push(to_dvec(vertex.position()), VertexKind::Site);
            self.site_ids.insert(vertex.fix().index(), id);
        }

        // one Voronoi vertex per triangle
        for face in triangulation.inner_faces() {
            let [a, b, c] = face.vertices().map(|v| to_dvec(v.position()));
            let id = self.push(circumcenter(a, b, c), VertexKind::Internal);
            self.circumcenter_ids.insert(face.fix().index(), id);
        }

        // one Voronoi edge per triangulation edge
        let mut edges = Vec::with_capacity(triangulation.num_undirected_edges());
        for undirected in triangulation.undirected_edges() {
            let edge = undirected.as_directed();
            let left = self.dual_end(edge);
            let right = self.dual_end(edge.rev());
            edges.push(TessEdge::new(right, left));
        }

        // one Voronoi cell per site
        let mut faces = Vec::with_capacity(triangulation.num_vertices());
        for vertex in triangulation.vertices() {
            let mut boundary = Vec::new();
            for edge in vertex.out_edges() {
                match edge.face().as_inner() {
                    Some(face) => boundary.push(self.circumcenter_id(face)),
                    None => {
                        // the cell opens up between this hull edge and the
                        // one entering this site along the outer face
                        boundary.push(self.far_id(edge));
                        boundary.push(self.far_id(edge.prev()));
                    }
                }
            }
            let site = self.site_ids[&vertex.fix().index()];
            faces.push(TessFace::new(site, boundary));
        }

        Tessellation::new(self.vertices, edges, faces)
    }

    fn push(&mut self, position: DVec2, kind: VertexKind) -> usize {
        self.vertices.push(TessVertex::new(position, kind));
        self.vertices.len() - 1
    }

    /// End of the Voronoi edge dual to `edge` that lies on its left side
    fn dual_end(&mut self, edge: DirectedEdge<'a>) -> usize {
        match edge.face().as_inner() {
            Some(face) => self.circumcenter_id(face),
            None => self.far_id(edge),
        }
    }

    fn circumcenter_id(&self, face: InnerFace<'a>) -> usize {
        self.circumcenter_ids[&face.fix().index()]
    }

    /// Stand-in for the open ray dual to `edge`, which has the outer face on
    /// its left
    fn far_id(&mut self, edge: DirectedEdge<'a>) -> usize {
        let key = edge.fix().index();
        if let Some(&id) = self.far_ids.get(&key) {
            return id;
        }

        let from = to_dvec(edge.from().position());
        let to = to_dvec(edge.to().position());
        let base = match edge.rev().face().as_inner() {
            Some(face) => self.vertices[self.circumcenter_id(face)].position,
            None => (from + to) / 2.0,
        };
        let outward = (to - from).perp().normalize_or_zero();
        let id = self.push(base + outward * self.far_distance, VertexKind::Far);
        self.far_ids.insert(key, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_points;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn random_tessellation(count: usize, seed: u64) -> Tessellation {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points = generate_points(count, 1.0, 1.0, &mut rng);
        SpadeTessellator.tessellate(&points)
    }

    #[test]
    fn test_circumcenter() {
        let c = circumcenter(DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0));
        assert!((c - DVec2::new(1.0, 1.0)).length() < 1e-12);

        // collinear falls back to the centroid
        let c = circumcenter(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(2.0, 0.0));
        assert!((c - DVec2::new(1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_sites_in_input_order() {
        let sites = vec![
            DVec2::new(-0.3, 0.1),
            DVec2::new(0.2, 0.2),
            DVec2::new(0.0, -0.3),
            DVec2::new(0.35, -0.1),
        ];
        let tess = SpadeTessellator.tessellate(&sites);

        let found: Vec<DVec2> = tess.sites().map(|(_, v)| v.position).collect();
        assert_eq!(found, sites);
    }

    #[test]
    fn test_duplicate_sites_merged() {
        let sites = vec![
            DVec2::new(0.1, 0.1),
            DVec2::new(0.1, 0.1),
            DVec2::new(-0.2, 0.3),
        ];
        let tess = SpadeTessellator.tessellate(&sites);
        assert_eq!(tess.sites().count(), 2);
    }

    #[test]
    fn test_every_site_has_face() {
        let tess = random_tessellation(200, 42);

        assert_eq!(tess.sites().count(), 200);
        for (id, _) in tess.sites() {
            let face = tess.face_of_site(id).expect("site without face");
            assert_eq!(face.site, id);
            assert!(face.boundary.len() >= 3, "cell with {} corners", face.boundary.len());
        }
    }

    #[test]
    fn test_internal_vertices_have_three_edges() {
        let tess = random_tessellation(300, 7);

        let mut degree = vec![0usize; tess.num_vertices()];
        for edge in tess.edges() {
            degree[edge.source] += 1;
            degree[edge.target] += 1;
        }

        for (id, v) in tess.vertices().iter().enumerate() {
            match v.kind {
                VertexKind::Site => assert_eq!(degree[id], 0),
                VertexKind::Internal => assert_eq!(degree[id], 3),
                VertexKind::Far => assert_eq!(degree[id], 1),
            }
        }
    }

    #[test]
    fn test_far_vertices_outside_sites() {
        let tess = random_tessellation(100, 3);

        let far: Vec<&TessVertex> = tess
            .vertices()
            .iter()
            .filter(|v| v.kind == VertexKind::Far)
            .collect();
        assert!(!far.is_empty());
        for v in far {
            assert!(v.position.length() > 10.0, "far vertex at {:?}", v.position);
        }
    }

    #[test]
    fn test_boundary_edges_close_loop() {
        let face = TessFace::new(0, vec![4, 5, 6]);
        let edges: Vec<(usize, usize)> = face.boundary_edges().collect();
        assert_eq!(edges, vec![(4, 5), (5, 6), (6, 4)]);

        let empty = TessFace::new(0, vec![]);
        assert_eq!(empty.boundary_edges().count(), 0);
    }

    #[test]
    fn test_single_site() {
        let tess = SpadeTessellator.tessellate(&[DVec2::new(0.1, 0.2)]);

        assert_eq!(tess.num_vertices(), 1);
        assert_eq!(tess.num_edges(), 0);
        let face = tess.face_of_site(0).unwrap();
        assert!(face.boundary.is_empty());
    }

    #[test]
    fn test_two_sites_split_by_bisector() {
        let tess = SpadeTessellator.tessellate(&[DVec2::new(-0.25, 0.0), DVec2::new(0.25, 0.0)]);

        // a single bisector with two open ends
        assert_eq!(tess.num_edges(), 1);
        let edge = tess.edges()[0];
        let a = tess.vertex(edge.source).unwrap();
        let b = tess.vertex(edge.target).unwrap();
        assert_eq!(a.kind, VertexKind::Far);
        assert_eq!(b.kind, VertexKind::Far);
        assert!(a.position.x.abs() < 1e-9);
        assert!(b.position.x.abs() < 1e-9);
        assert!(a.position.y * b.position.y < 0.0);
    }
}
