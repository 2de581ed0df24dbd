//! Rectangular arena bounds on the XZ plane
//!
//! Built once from a designated boundary volume (center + half extents),
//! then used to clamp the head and to place answer markers.

use glam::Vec3;
use rand::Rng;

/// Axis-aligned play-field bounds
#[derive(Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ArenaBounds {
    /// Build bounds from a boundary volume's center and half extents
    pub fn from_volume(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Horizontal width (x axis)
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Horizontal depth (z axis)
    #[inline]
    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Clamp a position's x and z into the bounds, leaving y untouched
    pub fn clamp_xz(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            pos.x.clamp(self.min.x, self.max.x),
            pos.y,
            pos.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Check whether a position is horizontally inside the bounds
    pub fn contains_xz(&self, pos: Vec3) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.z >= self.min.z && pos.z <= self.max.z
    }

    /// Uniform random point inside the bounds at the given height
    pub fn random_point_at<R: Rng>(&self, height: f32, rng: &mut R) -> Vec3 {
        Vec3::new(
            rng.random_range(self.min.x..=self.max.x),
            height,
            rng.random_range(self.min.z..=self.max.z),
        )
    }
}

/// Answer-marker drop position: inside the bounds when they exist,
/// otherwise the arena origin (degraded mode, host was already warned).
pub fn spawn_point<R: Rng>(bounds: Option<&ArenaBounds>, height: f32, rng: &mut R) -> Vec3 {
    match bounds {
        Some(b) => b.random_point_at(height, rng),
        None => Vec3::new(0.0, height, 0.0),
    }
}
