//! Homogeneous transforms for controller poses.
//!
//! Poses travel as flat `[x, y, z, a, b, c]` arrays (millimeters, degrees).
//! [`PoseAlgebra`] is the boundary the offset composer talks to; the
//! built-in [`RigidAlgebra`] implements it with `nalgebra`.

use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

const ORTHONORMAL_TOL: f64 = 1e-6;
const SINGULAR_TOL: f64 = 1e-9;

/// Euler angle conventions understood by the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EulerConvention {
    /// `R = Rz(a) * Ry(b) * Rz(c)`.
    #[default]
    Zyz,
    /// `R = Rz(a) * Ry(b) * Rx(c)`.
    Zyx,
}

/// Pose <-> matrix conversions and matrix products.
///
/// Implementations return `None` for inputs they cannot represent instead
/// of panicking.
pub trait PoseAlgebra {
    fn euler_to_matrix(
        &self,
        pose: &[f64; 6],
        convention: EulerConvention,
    ) -> Option<Matrix4<f64>>;

    fn mat_mul(&self, lhs: &Matrix4<f64>, rhs: &Matrix4<f64>) -> Matrix4<f64>;

    fn matrix_to_euler(&self, m: &Matrix4<f64>, convention: EulerConvention) -> Option<[f64; 6]>;
}

/// Rigid-body transforms backed by `nalgebra`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RigidAlgebra;

impl PoseAlgebra for RigidAlgebra {
    fn euler_to_matrix(
        &self,
        pose: &[f64; 6],
        convention: EulerConvention,
    ) -> Option<Matrix4<f64>> {
        if pose.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let [x, y, z, a, b, c] = *pose;
        let (a, b, c) = (a.to_radians(), b.to_radians(), c.to_radians());
        let rz_a = Rotation3::from_axis_angle(&Vector3::z_axis(), a);
        let ry_b = Rotation3::from_axis_angle(&Vector3::y_axis(), b);
        let last = match convention {
            EulerConvention::Zyz => Rotation3::from_axis_angle(&Vector3::z_axis(), c),
            EulerConvention::Zyx => Rotation3::from_axis_angle(&Vector3::x_axis(), c),
        };
        let r = rz_a * ry_b * last;

        let mut m = r.to_homogeneous();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;
        Some(m)
    }

    fn mat_mul(&self, lhs: &Matrix4<f64>, rhs: &Matrix4<f64>) -> Matrix4<f64> {
        lhs * rhs
    }

    fn matrix_to_euler(&self, m: &Matrix4<f64>, convention: EulerConvention) -> Option<[f64; 6]> {
        if m.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let r: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
        if !is_rotation(&r) {
            log::debug!("matrix_to_euler: rotation block is not orthonormal");
            return None;
        }

        let (a, b, c) = match convention {
            EulerConvention::Zyz => zyz_from_rotation(&r),
            EulerConvention::Zyx => zyx_from_rotation(&r),
        };

        Some([
            m[(0, 3)],
            m[(1, 3)],
            m[(2, 3)],
            a.to_degrees(),
            b.to_degrees(),
            c.to_degrees(),
        ])
    }
}

fn is_rotation(r: &Matrix3<f64>) -> bool {
    let gram = r.transpose() * r;
    (gram - Matrix3::identity()).amax() < ORTHONORMAL_TOL
        && (r.determinant() - 1.0).abs() < ORTHONORMAL_TOL
}

/// `b` in `[0, pi]`. At `sin(b) = 0` only `a ± c` is observable; `c` is set to 0.
fn zyz_from_rotation(r: &Matrix3<f64>) -> (f64, f64, f64) {
    let sb = r[(2, 0)].hypot(r[(2, 1)]);
    let b = sb.atan2(r[(2, 2)]);
    if sb > SINGULAR_TOL {
        let a = r[(1, 2)].atan2(r[(0, 2)]);
        let c = r[(2, 1)].atan2(-r[(2, 0)]);
        (a, b, c)
    } else if r[(2, 2)] > 0.0 {
        (r[(1, 0)].atan2(r[(0, 0)]), 0.0, 0.0)
    } else {
        ((-r[(1, 0)]).atan2(-r[(0, 0)]), std::f64::consts::PI, 0.0)
    }
}

/// `b` in `[-pi/2, pi/2]`. At gimbal lock `c` is set to 0.
fn zyx_from_rotation(r: &Matrix3<f64>) -> (f64, f64, f64) {
    let cb = r[(0, 0)].hypot(r[(1, 0)]);
    let b = (-r[(2, 0)]).atan2(cb);
    if cb > SINGULAR_TOL {
        let a = r[(1, 0)].atan2(r[(0, 0)]);
        let c = r[(2, 1)].atan2(r[(2, 2)]);
        (a, b, c)
    } else {
        ((-r[(0, 1)]).atan2(r[(1, 1)]), b, 0.0)
    }
}
