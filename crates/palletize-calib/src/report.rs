use serde::{Deserialize, Serialize};

/// One of the three taught points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointSlot {
    Origin,
    Point1,
    Point2,
}

impl PointSlot {
    pub const ALL: [PointSlot; 3] = [PointSlot::Origin, PointSlot::Point1, PointSlot::Point2];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// An editable field of a taught point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointField {
    X,
    Y,
    Z,
    A,
    B,
    C,
}

impl PointField {
    pub const POSITION: [PointField; 3] = [PointField::X, PointField::Y, PointField::Z];
    pub const ROTATION: [PointField; 3] = [PointField::A, PointField::B, PointField::C];
}

/// Which taught points share identical coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSlots {
    OriginPoint1,
    OriginPoint2,
    Point1Point2,
    All,
}

/// Calibration-quality error codes, in decreasing precedence within the
/// position field group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "code")]
pub enum CalibrationError {
    DuplicatePoints { slots: DuplicateSlots },
    Collinear,
    NotRightAngle,
    AngleOutOfBand,
}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationError::DuplicatePoints { slots } => {
                write!(f, "taught points coincide ({slots:?})")
            }
            CalibrationError::Collinear => write!(f, "taught points are collinear"),
            CalibrationError::NotRightAngle => {
                write!(f, "taught points do not form a right angle")
            }
            CalibrationError::AngleOutOfBand => {
                write!(f, "tool orientation differs between taught points")
            }
        }
    }
}

/// Error attached to one field of one taught point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub slot: PointSlot,
    pub field: PointField,
    pub error: CalibrationError,
}

/// Per-field calibration errors from one validation pass.
///
/// A field holds at most one error: the first (highest-precedence) rule that
/// writes to it wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    /// Which slots were taught when the report was produced.
    taught: [bool; 3],
    errors: Vec<FieldError>,
}

impl CalibrationReport {
    pub(crate) fn new(taught: [bool; 3]) -> Self {
        Self {
            taught,
            errors: Vec::new(),
        }
    }

    pub fn is_taught(&self, slot: PointSlot) -> bool {
        self.taught[slot.index()]
    }

    pub fn error(&self, slot: PointSlot, field: PointField) -> Option<CalibrationError> {
        self.errors
            .iter()
            .find(|e| e.slot == slot && e.field == field)
            .map(|e| e.error)
    }

    /// Errors on any field of `slot`, in field order.
    pub fn slot_errors(&self, slot: PointSlot) -> Vec<FieldError> {
        let mut out: Vec<FieldError> =
            self.errors.iter().filter(|e| e.slot == slot).copied().collect();
        out.sort_by_key(|e| e.field);
        out
    }

    pub fn has_slot_error(&self, slot: PointSlot) -> bool {
        self.errors.iter().any(|e| e.slot == slot)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether `slot` can be used downstream: taught and free of errors.
    ///
    /// `Point2` is additionally rejected while `Point1` carries any error,
    /// even one that does not involve `Point2`.
    pub fn is_point_valid(&self, slot: PointSlot) -> bool {
        if !self.is_taught(slot) || self.has_slot_error(slot) {
            return false;
        }
        match slot {
            PointSlot::Point2 => !self.has_slot_error(PointSlot::Point1),
            PointSlot::Origin | PointSlot::Point1 => true,
        }
    }

    /// Record `error` on `fields` of `slot` unless a field already has one.
    pub(crate) fn flag(&mut self, slot: PointSlot, fields: &[PointField], error: CalibrationError) {
        for &field in fields {
            if self.error(slot, field).is_none() {
                self.errors.push(FieldError { slot, field, error });
            }
        }
    }
}
