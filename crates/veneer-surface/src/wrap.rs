//! Wrap-seam alignment for periodic parametric coordinates.

use std::f64::consts::PI;
use veneer_math::Point2;

/// Rewrite a batch of UV coordinates so no u value differs from `anchor_u`
/// by more than half the wrap period.
///
/// The u axis is periodic with period exactly 1.0 (an angle normalized to
/// `[0, 1)`). Coordinates on the far side of the 0/1 seam from the anchor
/// are shifted by ±1 so that polygon tests see a continuous domain. The v
/// axis passes through unchanged.
///
/// Any two coordinates meant to be compared geometrically must be produced
/// by the same mapping and aligned to a common anchor first; the aligned u
/// may land outside `[0, 1]`.
///
/// Limitation: a feature spanning more than half the domain width cannot be
/// represented under this rule and will misalign.
pub fn align_to_anchor(uvs: &[Point2], anchor_u: f64) -> Vec<Point2> {
    uvs.iter()
        .map(|uv| {
            let mut u = uv.x;
            if u - anchor_u > 0.5 {
                u -= 1.0;
            } else if anchor_u - u > 0.5 {
                u += 1.0;
            }
            Point2::new(u, uv.y)
        })
        .collect()
}

/// Circular mean of the u values, folded back into `[0, 1)`.
///
/// Treats each u as an angle on the unit circle and averages the unit
/// vectors, which gives a seam-robust anchor for a cluster of coordinates
/// even when the cluster straddles the 0/1 boundary. Returns 0 for an
/// empty slice.
pub fn circular_mean_u(uvs: &[Point2]) -> f64 {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for uv in uvs {
        let ang = uv.x * 2.0 * PI;
        sum_x += ang.cos();
        sum_y += ang.sin();
    }
    let mean_ang = sum_y.atan2(sum_x);
    let mut mu = mean_ang / (2.0 * PI);
    if mu < 0.0 {
        mu += 1.0;
    }
    mu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_noop_inside_half_domain() {
        let uvs = vec![Point2::new(0.4, 0.1), Point2::new(0.6, 0.9)];
        let aligned = align_to_anchor(&uvs, 0.5);
        assert_eq!(aligned, uvs);
    }

    #[test]
    fn test_align_across_seam() {
        // u = 0.01 and u = 0.99 against anchor 0.0: the far one shifts down
        let uvs = vec![Point2::new(0.01, 0.5), Point2::new(0.99, 0.5)];
        let aligned = align_to_anchor(&uvs, 0.0);
        assert!((aligned[0].x - 0.01).abs() < 1e-12);
        assert!((aligned[1].x - (-0.01)).abs() < 1e-12);
        assert!((aligned[0].x - aligned[1].x).abs() < 0.5);
    }

    #[test]
    fn test_align_shifts_up() {
        let aligned = align_to_anchor(&[Point2::new(0.05, 0.0)], 0.95);
        assert!((aligned[0].x - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_align_idempotent() {
        let uvs = vec![
            Point2::new(0.02, 0.1),
            Point2::new(0.97, 0.2),
            Point2::new(0.5, 0.3),
        ];
        let once = align_to_anchor(&uvs, 0.0);
        let twice = align_to_anchor(&once, 0.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_align_preserves_v() {
        let aligned = align_to_anchor(&[Point2::new(0.99, 0.42)], 0.0);
        assert!((aligned[0].y - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_circular_mean_simple() {
        let uvs = vec![Point2::new(0.2, 0.0), Point2::new(0.4, 0.0)];
        assert!((circular_mean_u(&uvs) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_circular_mean_straddles_seam() {
        // 0.95 and 0.05 straddle the seam; the arithmetic mean (0.5) is on
        // the wrong side of the cylinder, the circular mean is at the seam.
        let uvs = vec![Point2::new(0.95, 0.0), Point2::new(0.05, 0.0)];
        let mu = circular_mean_u(&uvs);
        assert!(mu < 0.01 || mu > 0.99);
    }
}
