//! Free decal placement and closed-path measures.

use nalgebra::UnitQuaternion;
use std::f64::consts::PI;
use veneer_math::{Point3, Vec3};

/// Default free-decal extents: an 8×8 sticker with a shallow projection
/// depth.
pub const DEFAULT_DECAL_SCALE: [f64; 3] = [8.0, 8.0, 5.0];

/// Placement of a free decal: position, orientation and scale on the
/// target surface.
#[derive(Debug, Clone)]
pub struct DecalPlacement {
    /// Placement point in mesh-local space.
    pub position: Point3,
    /// Orientation taking the decal's +Z to the surface normal.
    pub rotation: UnitQuaternion<f64>,
    /// Extents of the decal projection volume.
    pub scale: Vec3,
}

impl DecalPlacement {
    /// Place a decal at `position` facing along `surface_normal`, with the
    /// default sticker scale.
    ///
    /// The rotation maps the decal's local +Z axis onto the normal. When
    /// the normal is antiparallel to +Z (no unique shortest rotation), a
    /// half-turn about X is used.
    pub fn oriented(position: Point3, surface_normal: &Vec3) -> Self {
        let z = Vec3::z();
        let rotation = UnitQuaternion::rotation_between(&z, surface_normal)
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vec3::x_axis(), PI));
        Self {
            position,
            rotation,
            scale: Vec3::new(
                DEFAULT_DECAL_SCALE[0],
                DEFAULT_DECAL_SCALE[1],
                DEFAULT_DECAL_SCALE[2],
            ),
        }
    }

    /// Override the decal extents.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Mean of the path's points.
pub fn path_centroid(points: &[Point3]) -> Point3 {
    let mut sum = Vec3::zeros();
    for p in points {
        sum += p.coords;
    }
    Point3::from(sum / points.len() as f64)
}

/// Maximum pairwise distance between any two path points.
///
/// Sizes the enclosing decal-projection volume. O(n²) over the path, which
/// is bounded by pointer-move event density in practice.
pub fn path_diameter(points: &[Point3]) -> f64 {
    let mut max = 0.0;
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            let d = (points[i] - points[j]).norm();
            if d > max {
                max = d;
            }
        }
    }
    max
}
