//! Coordinate frames resolved from three taught points.
//!
//! An operator teaches an origin and two more points on a physical surface.
//! The frame is built so that:
//! - the surface normal always points to world `+Z` (or is horizontal),
//! - the local X axis goes through one of the taught points,
//! - the local Y axis is re-derived perpendicular to X and the normal, keeping
//!   only the taught distance from the origin.
//!
//! Which taught point becomes local X depends on the sign of the raw normal:
//! when `(p1 - o) × (p2 - o)` points down, the two points swap roles. Layouts
//! taught in either winding therefore land on the same side of the surface.

use crate::vector::{angle_between, cross_product, is_zero, translate};
use crate::EulerAngle;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A resolved frame: corrected basis, corrected reference points and the
/// ZYZ orientation of the frame in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point3<f64>,
    /// Local X reference point (possibly the second taught point after a swap).
    pub point1: Point3<f64>,
    /// Local Y reference point at the taught distance along `y_axis`.
    pub point2: Point3<f64>,
    /// `point1 - origin`.
    pub x_axis: Vector3<f64>,
    /// `normal × x_axis`.
    pub y_axis: Vector3<f64>,
    /// Non-negative Z component by construction.
    pub normal: Vector3<f64>,
    pub euler: EulerAngle,
}

impl Frame {
    /// Unit vectors `(x, y, normal)` of the frame.
    pub fn unit_axes(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        (
            self.x_axis.normalize(),
            self.y_axis.normalize(),
            self.normal.normalize(),
        )
    }
}

/// Resolve a frame from `origin` and two reference points.
///
/// Returns `None` when the points are collinear or coincide.
#[cfg_attr(feature = "tracing", instrument(level = "debug"))]
pub fn resolve_frame(
    origin: &Point3<f64>,
    point1: &Point3<f64>,
    point2: &Point3<f64>,
) -> Option<Frame> {
    let mut p1 = *point1;
    let mut p2 = *point2;
    let mut v1 = p1 - origin;
    let mut v2 = p2 - origin;
    let mut normal = cross_product(&v1, &v2);

    if is_zero(&normal) {
        log::debug!("frame rejected: taught points are collinear or coincide");
        return None;
    }

    if normal.z < 0.0 {
        normal = -normal;
        std::mem::swap(&mut v1, &mut v2);
        std::mem::swap(&mut p1, &mut p2);
    }

    let y_distance = v2.norm();
    v2 = cross_product(&normal, &v1);
    p2 = translate(origin, &v2, y_distance);

    let euler = frame_euler(&v2, &normal);

    Some(Frame {
        origin: *origin,
        point1: p1,
        point2: p2,
        x_axis: v1,
        y_axis: v2,
        normal,
        euler,
    })
}

/// ZYZ angles taking world axes onto the frame whose Y axis is `y_axis` and
/// whose Z axis is `normal`.
fn frame_euler(y_axis: &Vector3<f64>, normal: &Vector3<f64>) -> EulerAngle {
    let world_y = Vector3::y();
    let world_z = Vector3::z();
    let knot = cross_product(&world_z, normal);

    if is_zero(&knot) {
        return EulerAngle {
            a: angle_between(&world_y, y_axis, Some(&world_z)),
            b: 0.0,
            c: 0.0,
        };
    }

    EulerAngle {
        a: angle_between(&world_y, &knot, Some(&world_z)),
        b: angle_between(&world_z, normal, Some(&knot)),
        c: angle_between(&knot, y_axis, Some(normal)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn level_axis_aligned_frame_has_zero_orientation() {
        let f = resolve_frame(&p(0.0, 0.0, 0.0), &p(100.0, 0.0, 0.0), &p(0.0, 50.0, 0.0))
            .expect("frame");
        assert_eq!(f.euler, EulerAngle::ZERO);
        assert_eq!(f.point1, p(100.0, 0.0, 0.0));
        assert_eq!(f.point2, p(0.0, 50.0, 0.0));
        assert!(f.normal.z > 0.0);
    }

    #[test]
    fn level_frame_rotated_about_z() {
        let f = resolve_frame(&p(0.0, 0.0, 0.0), &p(0.0, 100.0, 0.0), &p(-100.0, 0.0, 0.0))
            .expect("frame");
        assert_eq!(f.euler, EulerAngle::new(90.0, 0.0, 0.0));
    }

    #[test]
    fn negative_normal_swaps_reference_points() {
        // Clockwise winding seen from above: raw normal points down.
        let o = p(10.0, 10.0, 0.0);
        let f = resolve_frame(&o, &p(10.0, 60.0, 0.0), &p(110.0, 10.0, 0.0)).expect("frame");
        assert_eq!(f.point1, p(110.0, 10.0, 0.0));
        assert_eq!(f.point2, p(10.0, 60.0, 0.0));
        assert!(f.normal.z > 0.0);
        assert_eq!(f.euler, EulerAngle::ZERO);
    }

    #[test]
    fn y_axis_is_reorthogonalized_keeping_distance() {
        let o = p(0.0, 0.0, 0.0);
        let f = resolve_frame(&o, &p(200.0, 0.0, 0.0), &p(30.0, 40.0, 0.0)).expect("frame");
        assert_eq!(f.point2, p(0.0, 50.0, 0.0));
        assert_abs_diff_eq!((f.point2 - o).norm(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn normal_is_orthogonal_to_corrected_axes() {
        let cases = [
            (p(12.0, -3.0, 7.0), p(300.0, 40.0, 20.0), p(-5.0, 250.0, 90.0)),
            (p(0.0, 0.0, 0.0), p(0.0, 80.0, 10.0), p(90.0, 0.0, -20.0)),
            (p(500.0, 500.0, 100.0), p(500.0, 900.0, 400.0), p(100.0, 520.0, 130.0)),
        ];
        for (o, a, b) in cases {
            let f = resolve_frame(&o, &a, &b).expect("frame");
            let (x, y, n) = f.unit_axes();
            assert_abs_diff_eq!(n.dot(&x), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(n.dot(&y), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(x.dot(&y), 0.0, epsilon = 1e-9);
            assert!(f.normal.z >= 0.0);
        }
    }

    #[test]
    fn tilted_frame_orientation() {
        // Surface tilted 30 degrees about world X.
        let (s, c) = 30f64.to_radians().sin_cos();
        let f = resolve_frame(
            &p(0.0, 0.0, 0.0),
            &p(100.0, 0.0, 0.0),
            &p(0.0, 100.0 * c, 100.0 * s),
        )
        .expect("frame");
        // knot = Z x n lies along world X: a = -90, tilt b = 30, c = 90 back to frame Y.
        assert_eq!(f.euler, EulerAngle::new(-90.0, 30.0, 90.0));
    }

    #[test]
    fn collinear_points_have_no_frame() {
        assert!(resolve_frame(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(5.0, 0.0, 0.0)).is_none());
        assert!(resolve_frame(&p(1.0, 2.0, 3.0), &p(1.0, 2.0, 3.0), &p(5.0, 0.0, 0.0)).is_none());
    }
}
