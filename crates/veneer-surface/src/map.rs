//! Parametric mapping: 3D surface points to 2D UV coordinates.

use std::f64::consts::PI;
use veneer_math::{Point2, Point3, Vec3};

use crate::{SurfaceError, TriMesh};

/// Barycentric denominators below this magnitude count as degenerate.
const BARY_EPSILON: f64 = 1e-4;

/// Map a mesh-local point to cylindrical UV coordinates.
///
/// The cylinder axis is Y; `u = (atan2(x, z) + π) / 2π` wraps around the
/// axis and `v = (y + height/2) / height` runs along it. Total everywhere
/// except on the axis itself, where the angle is undefined.
pub fn cylindrical_uv(p: &Point3, height: f64) -> Point2 {
    let theta = p.x.atan2(p.z);
    let u = (theta + PI) / (2.0 * PI);
    let v = (p.y + height / 2.0) / height;
    Point2::new(u, v)
}

/// Closed-form cylindrical mapping bundled with its target's dimensions.
///
/// Carries the radius and height needed to invert the mapping and to
/// convert UV extents into physical surface distances.
#[derive(Debug, Clone, Copy)]
pub struct CylinderMap {
    /// Cylinder radius.
    pub radius: f64,
    /// Cylinder height.
    pub height: f64,
}

impl CylinderMap {
    /// Create a mapping for a cylinder of the given radius and height.
    pub fn new(radius: f64, height: f64) -> Self {
        Self { radius, height }
    }

    /// Forward mapping: mesh-local point to UV.
    pub fn uv(&self, p: &Point3) -> Point2 {
        cylindrical_uv(p, self.height)
    }

    /// Inverse mapping: UV back to a mesh-local point on the surface.
    pub fn point_at(&self, uv: &Point2) -> Point3 {
        let theta = uv.x * 2.0 * PI - PI;
        let y = uv.y * self.height - self.height / 2.0;
        Point3::new(self.radius * theta.sin(), y, self.radius * theta.cos())
    }

    /// Physical surface width covered by a span of the u axis.
    pub fn world_width(&self, u_extent: f64) -> f64 {
        u_extent * 2.0 * PI * self.radius
    }

    /// Physical surface height covered by a span of the v axis.
    pub fn world_height(&self, v_extent: f64) -> f64 {
        v_extent * self.height
    }
}

/// Barycentric weights of `p` relative to triangle `(a, b, c)`.
///
/// The weights sum to 1; all three in `[0, 1]` means `p` projects inside
/// the triangle. A degenerate (near-collinear) triangle yields the
/// first-vertex weighting `[1, 0, 0]`.
pub fn barycentric(p: &Point3, a: &Point3, b: &Point3, c: &Point3) -> [f64; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < BARY_EPSILON {
        return [1.0, 0.0, 0.0];
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    [1.0 - v - w, v, w]
}

/// Approximate the UV coordinate of a world-space point on an arbitrary
/// triangle mesh.
///
/// Linear scan over every face: the face whose centroid is nearest to the
/// (localized) query point wins, ties going to the lowest face index. The
/// point's barycentric weights in that face then blend the three vertices'
/// stored UVs. Nearest-centroid is an approximation of closest-point-on-
/// triangle, acceptable because queries originate from ray hits already on
/// or very near a face.
///
/// # Errors
///
/// [`SurfaceError::MissingUvs`] when the mesh has no UV attribute,
/// [`SurfaceError::EmptyMesh`] when it has no triangles.
pub fn generic_uv(mesh: &TriMesh, world_point: &Point3) -> Result<Point2, SurfaceError> {
    let uvs = mesh.uvs.as_ref().ok_or(SurfaceError::MissingUvs)?;
    let face_count = mesh.face_count();
    if face_count == 0 {
        return Err(SurfaceError::EmptyMesh);
    }

    let local = mesh.world_to_local(world_point);

    let mut closest_face = 0;
    let mut min_dist = f64::INFINITY;
    for i in 0..face_count {
        let [i0, i1, i2] = mesh.face(i);
        let a = &mesh.positions[i0 as usize];
        let b = &mesh.positions[i1 as usize];
        let c = &mesh.positions[i2 as usize];
        let centroid = Point3::new(
            (a.x + b.x + c.x) / 3.0,
            (a.y + b.y + c.y) / 3.0,
            (a.z + b.z + c.z) / 3.0,
        );
        let dist = (local - centroid).norm();
        if dist < min_dist {
            min_dist = dist;
            closest_face = i;
        }
    }

    let [i0, i1, i2] = mesh.face(closest_face);
    let a = &mesh.positions[i0 as usize];
    let b = &mesh.positions[i1 as usize];
    let c = &mesh.positions[i2 as usize];
    let [w0, w1, w2] = barycentric(&local, a, b, c);

    let uv_a = &uvs[i0 as usize];
    let uv_b = &uvs[i1 as usize];
    let uv_c = &uvs[i2 as usize];
    Ok(Point2::new(
        uv_a.x * w0 + uv_b.x * w1 + uv_c.x * w2,
        uv_a.y * w0 + uv_b.y * w1 + uv_c.y * w2,
    ))
}

/// Surface normal at a world-space point, looked up from the nearest
/// vertex's stored normal and returned in world space (normalized).
///
/// # Errors
///
/// [`SurfaceError::MissingNormals`] when the mesh has no normal attribute.
pub fn surface_normal(mesh: &TriMesh, world_point: &Point3) -> Result<Vec3, SurfaceError> {
    let normals = mesh.normals.as_ref().ok_or(SurfaceError::MissingNormals)?;
    let local = mesh.world_to_local(world_point);

    let mut closest = 0;
    let mut min_dist = f64::INFINITY;
    for (i, v) in mesh.positions.iter().enumerate() {
        let dist = (v - local).norm();
        if dist < min_dist {
            min_dist = dist;
            closest = i;
        }
    }

    Ok(mesh.normal_to_world(&normals[closest]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use veneer_math::Transform;

    #[test]
    fn test_cylindrical_round_trip() {
        let map = CylinderMap::new(50.0, 100.0);
        for &(u, v) in &[(0.0, 0.0), (0.25, 0.5), (0.5, 0.75), (0.9, 1.0)] {
            let p = map.point_at(&Point2::new(u, v));
            let uv = map.uv(&p);
            // u = 0 maps back to u = 0 through the atan2 branch
            let du = (uv.x - u).abs().min((uv.x - u - 1.0).abs());
            assert!(du < 1e-12, "u mismatch at ({u}, {v}): got {}", uv.x);
            assert!((uv.y - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cylindrical_known_point() {
        // Local point (0, 25, 50): on the +z side, 3/4 up a height-100 cylinder
        let uv = cylindrical_uv(&Point3::new(0.0, 25.0, 50.0), 100.0);
        assert!((uv.x - 0.5).abs() < 1e-12);
        assert!((uv.y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_world_extents() {
        let map = CylinderMap::new(50.0, 100.0);
        assert!((map.world_width(1.0) - 2.0 * PI * 50.0).abs() < 1e-10);
        assert!((map.world_height(0.5) - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_barycentric_vertices() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let wa = barycentric(&a, &a, &b, &c);
        assert!((wa[0] - 1.0).abs() < 1e-12);
        let wb = barycentric(&b, &a, &b, &c);
        assert!((wb[1] - 1.0).abs() < 1e-12);
        let wc = barycentric(&c, &a, &b, &c);
        assert!((wc[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_barycentric_sums_to_one() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(0.0, 3.0, 0.0);
        let w = barycentric(&Point3::new(0.4, 0.7, 0.0), &a, &b, &c);
        assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_barycentric_degenerate_triangle() {
        // Collinear vertices: fall back to the first vertex
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        let w = barycentric(&Point3::new(0.5, 0.5, 0.0), &a, &b, &c);
        assert_eq!(w, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_generic_uv_matches_cylindrical() {
        let mesh = TriMesh::cylinder(50.0, 100.0, 64);
        let map = CylinderMap::new(50.0, 100.0);
        // A point on the surface away from the seam
        let p = map.point_at(&Point2::new(0.3, 0.6));
        let uv = generic_uv(&mesh, &p).unwrap();
        // The faceted mesh approximates the analytic mapping
        assert!((uv.x - 0.3).abs() < 0.02);
        assert!((uv.y - 0.6).abs() < 0.02);
    }

    #[test]
    fn test_generic_uv_missing_uvs() {
        let mesh = TriMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            None,
            None,
            None,
            Transform::identity(),
        )
        .unwrap();
        assert!(matches!(
            generic_uv(&mesh, &Point3::origin()),
            Err(SurfaceError::MissingUvs)
        ));
    }

    #[test]
    fn test_generic_uv_respects_transform() {
        let mut mesh = TriMesh::cylinder(50.0, 100.0, 64);
        mesh = TriMesh::new(
            mesh.positions,
            mesh.uvs,
            mesh.normals,
            mesh.indices,
            Transform::translation(100.0, 0.0, 0.0),
        )
        .unwrap();
        let map = CylinderMap::new(50.0, 100.0);
        let world = Point3::new(100.0, 0.0, 0.0) + map.point_at(&Point2::new(0.3, 0.6)).coords;
        let uv = generic_uv(&mesh, &world).unwrap();
        assert!((uv.x - 0.3).abs() < 0.02);
        assert!((uv.y - 0.6).abs() < 0.02);
    }

    #[test]
    fn test_surface_normal_radial() {
        let mesh = TriMesh::cylinder(50.0, 100.0, 32);
        let n = surface_normal(&mesh, &Point3::new(0.0, 10.0, 50.0)).unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-10);
        assert!(n.z > 0.99);
        assert!(n.y.abs() < 1e-10);
    }

    #[test]
    fn test_surface_normal_missing_attribute() {
        let mesh = TriMesh::new(
            vec![Point3::origin()],
            None,
            None,
            None,
            Transform::identity(),
        )
        .unwrap();
        assert!(matches!(
            surface_normal(&mesh, &Point3::origin()),
            Err(SurfaceError::MissingNormals)
        ));
    }
}
