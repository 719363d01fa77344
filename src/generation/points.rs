//! Random site sampling
//!
//! Sites are drawn independently and uniformly over the domain rectangle.
//! They are too clumpy to use directly, which is what Lloyd's relaxation is
//! for.

use glam::DVec2;
use rand::Rng;

/// Generate `count` uniformly distributed points in the domain
///
/// Coordinates are drawn from `[-x_extent/2, x_extent/2]` and
/// `[-y_extent/2, y_extent/2]`, centred on the origin.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use voronoi_mesh::generation::generate_points;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let points = generate_points(1000, 1.0, 1.0, &mut rng);
/// assert_eq!(points.len(), 1000);
/// ```
pub fn generate_points<R: Rng + ?Sized>(
    count: usize,
    x_extent: f64,
    y_extent: f64,
    rng: &mut R,
) -> Vec<DVec2> {
    (0..count)
        .map(|_| {
            let x = x_extent * (rng.gen::<f64>() - 0.5);
            let y = y_extent * (rng.gen::<f64>() - 0.5);
            DVec2::new(x, y)
        })
        .collect()
}

/// Sort points left to right
///
/// Ties keep no particular order.
pub fn sort_by_x(points: &mut [DVec2]) {
    points.sort_unstable_by(|a, b| a.x.total_cmp(&b.x));
}

/// Arithmetic mean of a set of points
///
/// Returns `None` for an empty slice.
pub fn centroid(points: &[DVec2]) -> Option<DVec2> {
    if points.is_empty() {
        return None;
    }
    let sum: DVec2 = points.iter().copied().sum();
    Some(sum / points.len() as f64)
}
