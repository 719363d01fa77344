//! Mesh consistency checks

use std::collections::HashSet;

use crate::error::{MeshError, Result};
use crate::vertex::{Edge, Vertex, MAX_NEIGHBORS};

fn broken(message: String) -> MeshError {
    MeshError::InvalidMesh(message)
}

/// Check that vertices and edges form a well-formed mesh
pub(super) fn check(vertices: &[Vertex], edges: &[Edge]) -> Result<()> {
    for (i, vertex) in vertices.iter().enumerate() {
        if vertex.index != i {
            return Err(broken(format!("vertex at {} has index {}", i, vertex.index)));
        }
        if vertex.neighbor_count() > MAX_NEIGHBORS {
            return Err(broken(format!(
                "vertex {} has {} neighbors",
                i,
                vertex.neighbor_count()
            )));
        }
        for &n in vertex.neighbors() {
            if n == i || n >= vertices.len() {
                return Err(broken(format!("vertex {} has bad neighbor {}", i, n)));
            }
            if !vertices[n].is_neighbor(i) {
                return Err(broken(format!(
                    "vertex {} lists {} but not the other way round",
                    i, n
                )));
            }
        }
    }

    let mut pairs = HashSet::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        if edge.index != i {
            return Err(broken(format!("edge at {} has index {}", i, edge.index)));
        }
        let (Some(source), Some(_)) = (vertices.get(edge.source), vertices.get(edge.target)) else {
            return Err(broken(format!("edge {} has a missing endpoint", i)));
        };
        if edge.source == edge.target || !source.is_neighbor(edge.target) {
            return Err(broken(format!(
                "edge {} joins {} and {}, which are not neighbors",
                i, edge.source, edge.target
            )));
        }
        let key = (edge.source.min(edge.target), edge.source.max(edge.target));
        if !pairs.insert(key) {
            return Err(broken(format!("edge {} duplicates {:?}", i, key)));
        }
    }

    // every neighbor link is backed by exactly one edge
    let links: usize = vertices.iter().map(Vertex::neighbor_count).sum();
    if links != 2 * edges.len() {
        return Err(broken(format!(
            "{} neighbor links for {} edges",
            links,
            edges.len()
        )));
    }

    Ok(())
}
