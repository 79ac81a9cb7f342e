use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Orientation in degrees, ZYZ intrinsic convention unless stated otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl EulerAngle {
    pub const ZERO: EulerAngle = EulerAngle {
        a: 0.0,
        b: 0.0,
        c: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

/// Coefficients of `a*x + b*y + c*z + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PlaneEquation {
    /// Signed residual of `p` in the plane equation.
    #[inline]
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }
}

/// Box extents in millimeters, shared by products and pallets.
///
/// `width` runs along the row axis, `length` along the column axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub height: f64,
    pub width: f64,
    pub length: f64,
}

impl Dimension {
    pub fn new(height: f64, width: f64, length: f64) -> Self {
        Self {
            height,
            width,
            length,
        }
    }
}

pub type ProductDimension = Dimension;
pub type PalletDimension = Dimension;

/// Position in millimeters plus orientation in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3<f64>,
    pub orientation: EulerAngle,
}

impl Pose {
    pub fn new(position: Point3<f64>, orientation: EulerAngle) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Build from the controller's flat `[x, y, z, a, b, c]` layout.
    pub fn from_array(v: [f64; 6]) -> Self {
        Self {
            position: Point3::new(v[0], v[1], v[2]),
            orientation: EulerAngle::new(v[3], v[4], v[5]),
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.a,
            self.orientation.b,
            self.orientation.c,
        ]
    }
}

/// Ordered product poses; index order is the physical visiting sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductLayout {
    poses: Vec<Pose>,
}

impl ProductLayout {
    pub fn new(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    pub fn as_slice(&self) -> &[Pose] {
        &self.poses
    }

    /// Label every pose as `"<prefix>-<1-based index>"`, preserving order.
    pub fn keyed(&self, prefix: &str) -> Vec<(String, Pose)> {
        self.poses
            .iter()
            .enumerate()
            .map(|(i, pose)| (format!("{prefix}-{}", i + 1), *pose))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ProductLayout {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

impl FromIterator<Pose> for ProductLayout {
    fn from_iter<I: IntoIterator<Item = Pose>>(iter: I) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}
