//! Precedence-ordered validation of taught points.
//!
//! Position fields (`X/Y/Z`) receive at most one of, in order:
//! 1. duplicate points (only the coinciding slots),
//! 2. collinear points (all three slots),
//! 3. no interior angle near 90 degrees (all three slots).
//!
//! A duplicate stops the position checks for the pass: coinciding points are
//! trivially collinear and the triangle angles are meaningless.
//!
//! Rotation fields (`A/B/C`) are checked independently: every taught point
//! must hold the tool within a narrow band on each angle.

use crate::checks::{angles_within_band, find_duplicate_points, has_right_angle, is_collinear};
use crate::{CalibrationError, CalibrationReport, PointField, PointSlot};
use palletize_core::Pose;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Up to three taught poses. Untaught slots are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaughtPoints {
    #[serde(default)]
    pub origin: Option<Pose>,
    #[serde(default)]
    pub point1: Option<Pose>,
    #[serde(default)]
    pub point2: Option<Pose>,
}

impl TaughtPoints {
    pub fn new(origin: Option<Pose>, point1: Option<Pose>, point2: Option<Pose>) -> Self {
        Self {
            origin,
            point1,
            point2,
        }
    }

    pub fn get(&self, slot: PointSlot) -> Option<&Pose> {
        match slot {
            PointSlot::Origin => self.origin.as_ref(),
            PointSlot::Point1 => self.point1.as_ref(),
            PointSlot::Point2 => self.point2.as_ref(),
        }
    }

    fn taught(&self) -> [bool; 3] {
        PointSlot::ALL.map(|slot| self.get(slot).is_some())
    }
}

/// Thresholds for the validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorParams {
    /// Lower bound of the accepted right-angle band (degrees).
    pub right_angle_min_deg: f64,
    /// Upper bound of the accepted right-angle band (degrees).
    pub right_angle_max_deg: f64,
    /// Maximum difference of one rotation field between taught points.
    pub angle_tolerance_deg: f64,
    /// Whether the taught triangle must contain a right angle.
    pub require_right_angle: bool,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self {
            right_angle_min_deg: 85.0,
            right_angle_max_deg: 95.0,
            angle_tolerance_deg: 5.0,
            require_right_angle: true,
        }
    }
}

/// Run every rule over `points` and collect per-field errors.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
pub fn validate_calibration(points: &TaughtPoints, params: &ValidatorParams) -> CalibrationReport {
    let mut report = CalibrationReport::new(points.taught());
    check_positions(points, params, &mut report);
    check_rotations(points, params, &mut report);
    if !report.is_clean() {
        log::debug!("calibration check found {} field errors", report.errors().len());
    }
    report
}

fn check_positions(points: &TaughtPoints, params: &ValidatorParams, report: &mut CalibrationReport) {
    let positions = PointSlot::ALL.map(|slot| points.get(slot).map(|p| &p.position));

    if let Some(slots) = find_duplicate_points(positions) {
        let error = CalibrationError::DuplicatePoints { slots };
        for &slot in slots.slots() {
            report.flag(slot, &PointField::POSITION, error);
        }
        return;
    }

    let [Some(o), Some(a), Some(b)] = positions else {
        return;
    };

    let error = if is_collinear(o, a, b) {
        CalibrationError::Collinear
    } else if params.require_right_angle
        && !has_right_angle(o, a, b, params.right_angle_min_deg, params.right_angle_max_deg)
    {
        CalibrationError::NotRightAngle
    } else {
        return;
    };

    for slot in PointSlot::ALL {
        report.flag(slot, &PointField::POSITION, error);
    }
}

fn check_rotations(points: &TaughtPoints, params: &ValidatorParams, report: &mut CalibrationReport) {
    let taught: Vec<(PointSlot, &Pose)> = PointSlot::ALL
        .iter()
        .filter_map(|&slot| points.get(slot).map(|pose| (slot, pose)))
        .collect();
    if taught.len() < 2 {
        return;
    }

    let rotation: [(PointField, fn(&Pose) -> f64); 3] = [
        (PointField::A, |p: &Pose| p.orientation.a),
        (PointField::B, |p: &Pose| p.orientation.b),
        (PointField::C, |p: &Pose| p.orientation.c),
    ];
    for (field, value) in rotation {
        let values: Vec<f64> = taught.iter().map(|(_, pose)| value(pose)).collect();
        if angles_within_band(&values, params.angle_tolerance_deg) {
            continue;
        }
        for &(slot, _) in &taught {
            report.flag(slot, &[field], CalibrationError::AngleOutOfBand);
        }
    }
}
