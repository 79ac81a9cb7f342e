//! Calibration-quality checks for taught palletizing points.
//!
//! Operators teach an origin and two reference points by jogging the robot.
//! Before those points are turned into a frame, [`validate_calibration`]
//! reports per-field problems a UI can attach to the offending inputs:
//! coinciding points, collinear points, a triangle without a right angle, or
//! tool orientation drifting between points.
//!
//! The individual predicates in [`checks`] are usable on their own.

pub mod checks;
mod report;
mod validator;

pub use report::{
    CalibrationError, CalibrationReport, DuplicateSlots, FieldError, PointField, PointSlot,
};
pub use validator::{validate_calibration, TaughtPoints, ValidatorParams};
