//! Vector and plane primitives over taught points.
//!
//! All angles are in degrees and all distances in millimeters. Results that
//! feed controller poses are rounded the way the controller expects them:
//! angles to whole degrees, coordinates to three decimals.

use crate::PlaneEquation;
use nalgebra::{Point3, Vector3};

/// Right-hand cross product `v1 × v2`.
#[inline]
pub fn cross_product(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Vector3<f64> {
    v1.cross(v2)
}

/// Plane through three points, or `None` when they are collinear or coincide.
///
/// The normal is `(p2 - p1) × (p3 - p1)`, so a counter-clockwise triangle seen
/// from above gets a `+Z` normal.
pub fn plane_equation(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Option<PlaneEquation> {
    let normal = cross_product(&(p2 - p1), &(p3 - p1));
    if is_zero(&normal) {
        return None;
    }
    Some(PlaneEquation {
        a: normal.x,
        b: normal.y,
        c: normal.z,
        d: -normal.dot(&p1.coords),
    })
}

/// Angle between `v1` and `v2` in whole degrees.
///
/// Unsigned (`[0, 180]`) without `direction`. With `direction` the result is
/// negated when `(v1 × v2) · direction < 0`, giving a right-hand signed angle
/// in `[-180, 180]`. A zero-length input yields `0`.
pub fn angle_between(
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
    direction: Option<&Vector3<f64>>,
) -> f64 {
    let denom = v1.norm() * v2.norm();
    if denom == 0.0 {
        return 0.0;
    }
    let cos = (v1.dot(v2) / denom).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees().round();
    match direction {
        Some(dir) if cross_product(v1, v2).dot(dir) < 0.0 => -angle,
        _ => angle,
    }
}

/// Move `point` by `distance` along `direction`, rounding to 0.001 mm.
///
/// `direction` need not be unit length. A zero direction leaves the point
/// where it is.
pub fn translate(point: &Point3<f64>, direction: &Vector3<f64>, distance: f64) -> Point3<f64> {
    let len = direction.norm();
    if len == 0.0 {
        return *point;
    }
    let moved = point + direction * (distance / len);
    moved.map(round3)
}

#[inline]
pub(crate) fn is_zero(v: &Vector3<f64>) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}

#[inline]
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
