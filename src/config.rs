//! Mesh Configuration and Builder
//!
//! This module provides the configuration consumed by point sampling,
//! relaxation and mesh construction. The configuration is an explicit value
//! handed to each stage; nothing is read from global state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::DVec2;

use crate::error::{MeshError, Result};

/// Upper bound on relaxation passes accepted by the builder
pub const MAX_IMPROVEMENTS: usize = 20;

/// Point count presets
///
/// Each preset maps to the number of random sites drawn before relaxation.
/// The final vertex count is roughly twice the site count.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeshDensity {
    /// 512 sites, for previews
    Coarse,
    /// 2048 sites (default)
    #[default]
    Normal,
    /// 8192 sites
    Fine,
    /// Explicit site count
    Custom(usize),
}

impl MeshDensity {
    /// Number of sites drawn for this density
    pub fn point_count(self) -> usize {
        match self {
            MeshDensity::Coarse => 512,
            MeshDensity::Normal => 2048,
            MeshDensity::Fine => 8192,
            MeshDensity::Custom(points) => points,
        }
    }

    /// Get a human-readable name for this density
    pub fn name(self) -> &'static str {
        match self {
            MeshDensity::Coarse => "Coarse",
            MeshDensity::Normal => "Normal",
            MeshDensity::Fine => "Fine",
            MeshDensity::Custom(_) => "Custom",
        }
    }
}

/// Configuration for mesh generation
///
/// The same configuration (including `seed`) always produces the same mesh.
///
/// # Example
///
/// ```rust
/// use voronoi_mesh::*;
///
/// let config = MeshConfigBuilder::new()
///     .seed(42)
///     .density(MeshDensity::Coarse)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.points, 512);
/// assert_eq!(config.improvements, 1);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Random seed for site placement
    pub seed: u64,

    /// Domain width (Xmax - Xmin)
    pub x_extent: f64,

    /// Domain height (Ymax - Ymin)
    pub y_extent: f64,

    /// Elevation range (Zmax - Zmin), used by edit operations
    pub z_extent: f64,

    /// Number of random sites to draw
    pub points: usize,

    /// Number of relaxation passes
    ///
    /// - 0: raw random sites (clumpy)
    /// - 1: default, evens out the worst clusters
    /// - 3+: close to a honeycomb, diminishing returns
    pub improvements: usize,

    /// Verbosity threshold for diagnostics
    ///
    /// Diagnostics go through `tracing`; this only decides whether they are
    /// emitted at all. 0 is silent, 1 reports mesh summaries, 2 adds
    /// per-pass relaxation timing, 3 reports every site move.
    pub debug_level: u8,
}

impl MeshConfig {
    /// Domain rectangle centred on the origin
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x_extent, self.y_extent)
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            x_extent: 1.0,
            y_extent: 1.0,
            z_extent: 1.0,
            points: MeshDensity::default().point_count(),
            improvements: 1,
            debug_level: 1,
        }
    }
}

/// Axis-aligned domain rectangle centred on the origin
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Half of the x extent
    pub half_x: f64,
    /// Half of the y extent
    pub half_y: f64,
}

impl Bounds {
    /// Rectangle `[-x_extent/2, x_extent/2] x [-y_extent/2, y_extent/2]`
    pub fn new(x_extent: f64, y_extent: f64) -> Self {
        Self {
            half_x: x_extent / 2.0,
            half_y: y_extent / 2.0,
        }
    }

    /// Is the point inside the rectangle (edges included)
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= -self.half_x && p.x <= self.half_x && p.y >= -self.half_y && p.y <= self.half_y
    }

    /// Truncate each coordinate to the rectangle
    #[inline]
    pub fn clip(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(-self.half_x, self.half_x),
            p.y.clamp(-self.half_y, self.half_y),
        )
    }
}

/// Builder for creating MeshConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_mesh::*;
///
/// let config = MeshConfigBuilder::new()
///     .seed(7)
///     .extents(2.0, 1.0)
///     .unwrap()
///     .improvements(3)
///     .unwrap()
///     .debug_level(0)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.bounds().half_x, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct MeshConfigBuilder {
    seed: Option<u64>,
    x_extent: f64,
    y_extent: f64,
    z_extent: f64,
    points: usize,
    improvements: usize,
    debug_level: u8,
}

impl MeshConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - extents: 1.0 x 1.0, z 1.0
    /// - points: 2048
    /// - improvements: 1
    /// - debug_level: 1
    pub fn new() -> Self {
        let defaults = MeshConfig::default();
        Self {
            seed: None,
            x_extent: defaults.x_extent,
            y_extent: defaults.y_extent,
            z_extent: defaults.z_extent,
            points: defaults.points,
            improvements: defaults.improvements,
            debug_level: defaults.debug_level,
        }
    }

    /// Set the random seed for site placement
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the site count from a preset
    pub fn density(mut self, density: MeshDensity) -> Self {
        self.points = density.point_count();
        self
    }

    /// Set the site count directly
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `points` is 0
    pub fn points(mut self, points: usize) -> Result<Self> {
        if points == 0 {
            return Err(MeshError::InvalidConfig(
                "point count must be at least 1".to_string(),
            ));
        }
        self.points = points;
        Ok(self)
    }

    /// Set the domain size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless both extents are finite and positive
    pub fn extents(mut self, x_extent: f64, y_extent: f64) -> Result<Self> {
        check_extent("x_extent", x_extent)?;
        check_extent("y_extent", y_extent)?;
        self.x_extent = x_extent;
        self.y_extent = y_extent;
        Ok(self)
    }

    /// Set the elevation range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the extent is finite and positive
    pub fn z_extent(mut self, z_extent: f64) -> Result<Self> {
        check_extent("z_extent", z_extent)?;
        self.z_extent = z_extent;
        Ok(self)
    }

    /// Set the number of relaxation passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if more than [`MAX_IMPROVEMENTS`] are requested
    pub fn improvements(mut self, improvements: usize) -> Result<Self> {
        if improvements > MAX_IMPROVEMENTS {
            return Err(MeshError::InvalidConfig(format!(
                "improvements must be <= {} (got {})",
                MAX_IMPROVEMENTS, improvements
            )));
        }
        self.improvements = improvements;
        Ok(self)
    }

    /// Set the diagnostic verbosity threshold
    pub fn debug_level(mut self, level: u8) -> Self {
        self.debug_level = level;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    pub fn build(self) -> Result<MeshConfig> {
        let seed = self.seed.unwrap_or_else(|| rand::random());

        Ok(MeshConfig {
            seed,
            x_extent: self.x_extent,
            y_extent: self.y_extent,
            z_extent: self.z_extent,
            points: self.points,
            improvements: self.improvements,
            debug_level: self.debug_level,
        })
    }
}

impl Default for MeshConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_extent(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MeshError::InvalidConfig(format!(
            "{} must be positive (got {})",
            name, value
        )));
    }
    Ok(())
}
