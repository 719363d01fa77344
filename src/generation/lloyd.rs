//! Lloyd's Relaxation for uniform point distribution
//!
//! Lloyd's Relaxation iteratively improves the uniformity of a point set by
//! moving each point to the centroid of its Voronoi cell. Cells on the edge
//! of the domain reach far outside of it, so every cell corner is clipped to
//! the domain before averaging.

use glam::DVec2;
use std::time::Instant;

use crate::config::Bounds;
use crate::error::{MeshError, Result};
use crate::generation::points::sort_by_x;
use crate::generation::tessellation::{Tessellation, TessellationAdapter};

/// Options for Lloyd's relaxation
#[derive(Debug, Clone, Copy)]
pub struct LloydOptions {
    /// Number of passes to run
    pub iterations: usize,
    /// Domain the cells are clipped to
    pub bounds: Bounds,
    /// Verbosity threshold (see `MeshConfig::debug_level`)
    pub debug_level: u8,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            bounds: Bounds::new(1.0, 1.0),
            debug_level: 0,
        }
    }
}

/// Apply Lloyd's Relaxation to improve point distribution uniformity
///
/// # Algorithm
///
/// For each iteration:
/// 1. Sort the current points left to right
/// 2. Tessellate the sorted points
/// 3. For each site inside the domain: average the clipped corners of its cell
/// 4. The averages, in site order, are the next point set
///
/// # Errors
///
/// Returns `MissingFace` if the tessellation has a site without a cell, and
/// `DanglingVertex` if a cell refers to a vertex it does not have. The
/// whole relaxation is abandoned; no partial pass is returned.
pub fn lloyd_relaxation<T>(
    mut points: Vec<DVec2>,
    options: LloydOptions,
    tessellator: &T,
) -> Result<Vec<DVec2>>
where
    T: TessellationAdapter + ?Sized,
{
    let total_start = Instant::now();
    let num_points = points.len();

    if options.debug_level > 1 {
        tracing::debug!(
            points = num_points,
            iterations = options.iterations,
            "lloyd relaxation starting"
        );
    }

    for iteration in 0..options.iterations {
        let iter_start = Instant::now();

        sort_by_x(&mut points);
        let tessellation = tessellator.tessellate(&points);
        let moves = site_moves(&tessellation, options.bounds, options.debug_level)?;

        if options.debug_level > 1 {
            let max_displacement = moves
                .iter()
                .map(|(old, new)| old.distance(*new))
                .fold(0.0, f64::max);
            tracing::debug!(
                iteration = iteration + 1,
                points = moves.len(),
                max_displacement,
                elapsed = ?iter_start.elapsed(),
                "lloyd pass finished"
            );
        }

        points = moves.into_iter().map(|(_, new)| new).collect();
    }

    if options.debug_level > 1 {
        tracing::debug!(
            points_in = num_points,
            points_out = points.len(),
            elapsed = ?total_start.elapsed(),
            "lloyd relaxation finished"
        );
    }

    Ok(points)
}

/// Run `iterations` relaxation passes over `points` without diagnostics
pub fn relax<T>(
    points: Vec<DVec2>,
    iterations: usize,
    bounds: Bounds,
    tessellator: &T,
) -> Result<Vec<DVec2>>
where
    T: TessellationAdapter + ?Sized,
{
    let options = LloydOptions {
        iterations,
        bounds,
        debug_level: 0,
    };
    lloyd_relaxation(points, options, tessellator)
}

/// Replace every in-domain site of a tessellation by its clipped cell centroid
///
/// Sites outside `bounds` are dropped. Cells without corners (a lone site)
/// keep the site where it is.
///
/// # Errors
///
/// Returns `MissingFace` if a site has no owning cell, and
/// `DanglingVertex` if a cell corner is not a tessellation vertex.
pub fn improve(tessellation: &Tessellation, bounds: Bounds, debug_level: u8) -> Result<Vec<DVec2>> {
    let moves = site_moves(tessellation, bounds, debug_level)?;
    Ok(moves.into_iter().map(|(_, new)| new).collect())
}

/// `(site, centroid)` for every in-domain site
fn site_moves(
    tessellation: &Tessellation,
    bounds: Bounds,
    debug_level: u8,
) -> Result<Vec<(DVec2, DVec2)>> {
    let mut moves = Vec::new();

    for (site_id, site) in tessellation.sites() {
        if !bounds.contains(site.position) {
            continue;
        }

        let face = tessellation
            .face_of_site(site_id)
            .ok_or(MeshError::MissingFace {
                x: site.position.x,
                y: site.position.y,
            })?;

        let corners = face
            .boundary_edges()
            .map(|(source, _)| {
                tessellation
                    .vertex(source)
                    .map(|v| v.position)
                    .ok_or(MeshError::DanglingVertex(source))
            })
            .collect::<Result<Vec<DVec2>>>()?;
        let new_point = clipped_centroid(&corners, bounds).unwrap_or(site.position);

        if debug_level > 2 {
            tracing::trace!(
                from = ?site.position,
                to = ?new_point,
                "site moved to cell centroid"
            );
        }
        moves.push((site.position, new_point));
    }

    Ok(moves)
}

/// Average of points after truncating each one to `bounds`
///
/// Returns `None` for an empty slice.
pub fn clipped_centroid(corners: &[DVec2], bounds: Bounds) -> Option<DVec2> {
    if corners.is_empty() {
        return None;
    }
    let sum: DVec2 = corners.iter().map(|&p| bounds.clip(p)).sum();
    Some(sum / corners.len() as f64)
}
