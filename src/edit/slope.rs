//! Constant slope across the whole map
//!
//! The incline raises every vertex in proportion to its signed distance
//! from an axis line; one side of the axis rises, the other sinks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edit::MeshEdit;
use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// A line `a*x + b*y + c = 0` in the plane
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Create a line from its implicit coefficients
    ///
    /// # Errors
    ///
    /// Returns `DegenerateLine` if `a` and `b` are both zero.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        if a == 0.0 && b == 0.0 {
            return Err(MeshError::DegenerateLine);
        }
        Ok(Self { a, b, c })
    }

    /// Axis through the origin for a map slope of `slope` (dy/dx)
    ///
    /// - `slope == 0`: the x axis
    /// - `slope > 1`: `slope*x - y = 0`
    /// - otherwise: `-x + slope*y = 0`
    pub fn from_slope(slope: f64) -> Self {
        let (a, b) = if slope == 0.0 {
            (0.0, 1.0)
        } else if slope > 1.0 {
            (slope, -1.0)
        } else {
            (-1.0, slope)
        };
        Self { a, b, c: 0.0 }
    }

    /// Coefficients `(a, b, c)`
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Signed distance from `(x, y)` to the line
    ///
    /// Positive on the side the normal `(a, b)` points to.
    #[inline]
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        (self.a * x + self.b * y + self.c) / self.a.hypot(self.b)
    }
}

/// Incline the whole mesh about an axis line
///
/// Every vertex gets `z = distance * inclination * z_extent / 2`. Positions
/// and topology are untouched.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    /// Axis of the incline; vertices on it stay at 0
    pub line: Line,
    /// Steepness, 0.0 (flat) to 1.0
    pub inclination: f64,
    /// Elevation range of the map (`MeshConfig::z_extent`)
    pub z_extent: f64,
}

impl LinearTransform {
    /// Create an incline about an explicit line
    pub fn new(line: Line, inclination: f64, z_extent: f64) -> Self {
        Self {
            line,
            inclination,
            z_extent,
        }
    }

    /// Incline about the axis implied by a map slope (see [`Line::from_slope`])
    pub fn from_slope(slope: f64, inclination: f64, z_extent: f64) -> Self {
        Self::new(Line::from_slope(slope), inclination, z_extent)
    }

    /// Elevation this incline gives to the point `(x, y)`
    #[inline]
    pub fn elevation_at(&self, x: f64, y: f64) -> f64 {
        self.line.distance(x, y) * self.inclination * (self.z_extent / 2.0)
    }
}

impl MeshEdit for LinearTransform {
    fn apply(&self, mesh: &mut Mesh) -> Result<()> {
        for (position, z) in mesh.elevations_with_position_mut() {
            *z = self.elevation_at(position.x, position.y);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfigBuilder;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_line() {
        assert_eq!(Line::new(0.0, 0.0, 1.0), Err(MeshError::DegenerateLine));
        assert!(Line::new(0.0, 2.0, 1.0).is_ok());
    }

    #[test]
    fn test_signed_distance() {
        // x = 1, normal pointing right
        let line = Line::new(2.0, 0.0, -2.0).unwrap();
        assert_relative_eq!(line.distance(3.0, 5.0), 2.0);
        assert_relative_eq!(line.distance(0.0, 0.0), -1.0);
        assert_relative_eq!(line.distance(1.0, -7.0), 0.0);
    }

    #[test]
    fn test_from_slope_axes() {
        assert_eq!(Line::from_slope(0.0).coefficients(), (0.0, 1.0, 0.0));
        assert_eq!(Line::from_slope(2.0).coefficients(), (2.0, -1.0, 0.0));
        assert_eq!(Line::from_slope(0.5).coefficients(), (-1.0, 0.5, 0.0));
        assert_eq!(Line::from_slope(-3.0).coefficients(), (-1.0, -3.0, 0.0));
    }

    #[test]
    fn test_elevation_at() {
        let incline = LinearTransform::from_slope(0.0, 0.5, 2.0);
        // distance from the x axis is y
        assert_relative_eq!(incline.elevation_at(0.3, 0.4), 0.4 * 0.5 * 1.0);
        assert_relative_eq!(incline.elevation_at(-0.3, -0.2), -0.2 * 0.5);
    }

    #[test]
    fn test_incline_mesh() {
        let config = MeshConfigBuilder::new()
            .seed(9)
            .points(200)
            .unwrap()
            .z_extent(4.0)
            .unwrap()
            .debug_level(0)
            .build()
            .unwrap();
        let mut mesh = Mesh::generate(&config).unwrap();
        let edges_before = mesh.edges().to_vec();

        let line = Line::new(1.0, 1.0, 0.0).unwrap();
        LinearTransform::new(line, 0.25, config.z_extent)
            .apply(&mut mesh)
            .unwrap();

        for v in mesh.vertices() {
            let expected = (v.x + v.y) / 2f64.sqrt() * 0.25 * 2.0;
            assert_relative_eq!(v.z, expected, epsilon = 1e-12);
        }
        assert_eq!(mesh.edges(), &edges_before[..]);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_zero_inclination_flattens() {
        let config = MeshConfigBuilder::new()
            .seed(2)
            .points(100)
            .unwrap()
            .debug_level(0)
            .build()
            .unwrap();
        let mut mesh = Mesh::generate(&config).unwrap();
        for z in mesh.elevations_mut() {
            *z = 3.0;
        }

        LinearTransform::from_slope(1.5, 0.0, 1.0).apply(&mut mesh).unwrap();
        assert!(mesh.vertices().iter().all(|v| v.z == 0.0));
    }
}
