#![warn(missing_docs)]

//! Math types for the veneer surface-painting toolkit.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! surface geometry: points, vectors, directions, transforms, and
//! tolerance constants used by the stroke and mapping code.

use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D parameter (UV) space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    ///
    /// The painting targets are upright surfaces of revolution, so Y is
    /// the rotation axis that comes up in practice.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Compose: apply `other` first, then `self` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation, applies rotation/scale).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a normal vector (uses inverse transpose of upper-left 3x3).
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let m3 = self.matrix.fixed_view::<3, 3>(0, 0);
        if let Some(inv) = m3.try_inverse() {
            inv.transpose() * n
        } else {
            // Degenerate transform — return input unchanged
            *n
        }
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for stroke and containment tests.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in surface units.
    pub linear: f64,
    /// Distance below which a stroke's endpoints count as coincident,
    /// in surface-local units.
    pub closure: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear; closure threshold of 8 surface
    /// units, tuned against a radius-50 target).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        closure: 8.0,
    };

    /// Check if two points are coincident within the linear tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if a stroke's endpoints are close enough to count as an
    /// explicit closure.
    pub fn closes(&self, first: &Point3, last: &Point3) -> bool {
        (first - last).norm() < self.closure
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_y_90() {
        let t = Transform::rotation_y(PI / 2.0);
        let p = Point3::new(0.0, 0.0, 1.0);
        let result = t.apply_point(&p);
        assert!((result.x - 1.0).abs() < 1e-12);
        assert!(result.z.abs() < 1e-12);
    }

    #[test]
    fn test_apply_vec_ignores_translation() {
        let t = Transform::translation(5.0, 5.0, 5.0);
        let v = Vec3::new(1.0, 0.0, 0.0);
        let result = t.apply_vec(&v);
        assert!((result - v).norm() < 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::translation(1.0, 2.0, 3.0).then(&Transform::scale(2.0, 2.0, 2.0));
        let inv = t.inverse().unwrap();
        let p = Point3::new(5.0, 6.0, 7.0);
        let result = inv.apply_point(&t.apply_point(&p));
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_normal_transform_under_nonuniform_scale() {
        // Normal of a plane tilted by non-uniform scale must use the
        // inverse transpose, not the plain matrix.
        let t = Transform::scale(2.0, 1.0, 1.0);
        let n = Vec3::new(1.0, 1.0, 0.0);
        let result = t.apply_normal(&n).normalize();
        assert!((result.x - (0.5 / (0.25_f64 + 1.0).sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_closure() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(0.0, 0.0, 0.0);
        let near = Point3::new(5.0, 0.0, 0.0);
        let far = Point3::new(9.0, 0.0, 0.0);
        assert!(tol.closes(&a, &near));
        assert!(!tol.closes(&a, &far));
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }
}
