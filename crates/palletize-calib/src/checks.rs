//! Geometric predicates over taught points.

use crate::{DuplicateSlots, PointSlot};
use palletize_core::{angle_between, plane_equation, Point3};

/// Slots whose positions coincide exactly, if any.
///
/// Absent slots never take part. With three distinct positions at most one
/// pair can match, unless all three do.
pub fn find_duplicate_points(points: [Option<&Point3<f64>>; 3]) -> Option<DuplicateSlots> {
    let same = |i: usize, j: usize| match (points[i], points[j]) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let (o1, o2, p12) = (same(0, 1), same(0, 2), same(1, 2));
    match (o1, o2, p12) {
        (true, true, _) => Some(DuplicateSlots::All),
        (true, false, _) => Some(DuplicateSlots::OriginPoint1),
        (false, true, _) => Some(DuplicateSlots::OriginPoint2),
        (false, false, true) => Some(DuplicateSlots::Point1Point2),
        (false, false, false) => None,
    }
}

/// True when the three points do not span a plane.
pub fn is_collinear(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> bool {
    plane_equation(a, b, c).is_none()
}

/// Interior angles of the triangle `(a, b, c)` at `a`, `b` and `c`, in whole degrees.
pub fn interior_angles(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> [f64; 3] {
    [
        angle_between(&(b - a), &(c - a), None),
        angle_between(&(a - b), &(c - b), None),
        angle_between(&(a - c), &(b - c), None),
    ]
}

/// True when at least one interior angle lies in `[min_deg, max_deg]`.
pub fn has_right_angle(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    min_deg: f64,
    max_deg: f64,
) -> bool {
    interior_angles(a, b, c)
        .iter()
        .any(|angle| (min_deg..=max_deg).contains(angle))
}

/// True when every pairwise difference of `values` is at most `tolerance_deg`.
pub fn angles_within_band(values: &[f64], tolerance_deg: f64) -> bool {
    let mut iter = values.iter().copied();
    let Some(first) = iter.next() else {
        return true;
    };
    let (lo, hi) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    hi - lo <= tolerance_deg
}

impl DuplicateSlots {
    /// Slots carrying the duplicate error.
    pub fn slots(self) -> &'static [PointSlot] {
        match self {
            DuplicateSlots::OriginPoint1 => &[PointSlot::Origin, PointSlot::Point1],
            DuplicateSlots::OriginPoint2 => &[PointSlot::Origin, PointSlot::Point2],
            DuplicateSlots::Point1Point2 => &[PointSlot::Point1, PointSlot::Point2],
            DuplicateSlots::All => &PointSlot::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn duplicates_are_reported_per_pair() {
        let a = p(1.0, 2.0, 3.0);
        let b = p(4.0, 5.0, 6.0);
        let c = p(7.0, 8.0, 9.0);
        assert_eq!(find_duplicate_points([Some(&a), Some(&b), Some(&c)]), None);
        assert_eq!(
            find_duplicate_points([Some(&a), Some(&a), Some(&c)]),
            Some(DuplicateSlots::OriginPoint1)
        );
        assert_eq!(
            find_duplicate_points([Some(&a), Some(&b), Some(&a)]),
            Some(DuplicateSlots::OriginPoint2)
        );
        assert_eq!(
            find_duplicate_points([Some(&a), Some(&b), Some(&b)]),
            Some(DuplicateSlots::Point1Point2)
        );
        assert_eq!(
            find_duplicate_points([Some(&a), Some(&a), Some(&a)]),
            Some(DuplicateSlots::All)
        );
        assert_eq!(find_duplicate_points([Some(&a), None, Some(&b)]), None);
        assert_eq!(
            find_duplicate_points([None, Some(&b), Some(&b)]),
            Some(DuplicateSlots::Point1Point2)
        );
    }

    #[test]
    fn near_duplicates_are_not_duplicates() {
        let a = p(1.0, 2.0, 3.0);
        let b = p(1.0, 2.0, 3.001);
        assert_eq!(find_duplicate_points([Some(&a), Some(&b), None]), None);
    }

    #[test]
    fn right_angle_band() {
        let o = p(0.0, 0.0, 0.0);
        assert!(has_right_angle(&o, &p(100.0, 0.0, 0.0), &p(0.0, 100.0, 0.0), 85.0, 95.0));
        // 93 deg at the origin.
        let (s, c) = 93f64.to_radians().sin_cos();
        assert!(has_right_angle(&o, &p(100.0, 0.0, 0.0), &p(100.0 * c, 100.0 * s, 0.0), 85.0, 95.0));
        // Equilateral triangle: all 60 deg.
        let (s, c) = 60f64.to_radians().sin_cos();
        assert!(!has_right_angle(&o, &p(100.0, 0.0, 0.0), &p(100.0 * c, 100.0 * s, 0.0), 85.0, 95.0));
    }

    #[test]
    fn right_angle_band_edges_are_inclusive_after_rounding() {
        let o = p(0.0, 0.0, 0.0);
        let a = p(1000.0, 0.0, 0.0);
        let apex = |deg: f64| {
            let (s, c) = deg.to_radians().sin_cos();
            p(1000.0 * c, 1000.0 * s, 0.0)
        };
        let cases = [
            (84.4, false),
            (84.6, true),
            (85.0, true),
            (95.0, true),
            (95.4, true),
            (95.6, false),
        ];
        for (deg, want) in cases {
            assert_eq!(
                has_right_angle(&o, &a, &apex(deg), 85.0, 95.0),
                want,
                "origin angle {deg}"
            );
        }
    }

    #[test]
    fn right_angle_may_sit_at_any_vertex() {
        let angles = interior_angles(&p(0.0, 0.0, 0.0), &p(100.0, 0.0, 0.0), &p(100.0, 100.0, 0.0));
        assert_eq!(angles, [45.0, 90.0, 45.0]);
    }

    #[test]
    fn angle_band_uses_max_pairwise_difference() {
        assert!(angles_within_band(&[], 5.0));
        assert!(angles_within_band(&[10.0], 5.0));
        assert!(angles_within_band(&[10.0, 12.0, 15.0], 5.0));
        assert!(!angles_within_band(&[10.0, 12.0, 15.01], 5.0));
        assert!(!angles_within_band(&[-179.0, 179.0], 5.0));
    }
}
