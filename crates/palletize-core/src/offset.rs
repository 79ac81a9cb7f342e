//! Approach and retract waypoints around pick/place poses.
//!
//! An offset is a translation expressed in the tool frame of the target pose.
//! Positive `z` means "back away from the product", i.e. along tool `-Z`.

use crate::algebra::{EulerConvention, PoseAlgebra, RigidAlgebra};
use crate::{EulerAngle, Pose};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Tool-frame translation in millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ToolOffset {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl std::ops::Neg for ToolOffset {
    type Output = ToolOffset;

    fn neg(self) -> Self::Output {
        ToolOffset::new(-self.x, -self.y, -self.z)
    }
}

/// Apply `offset` to `target` using the built-in transform backend.
///
/// The returned orientation is canonical ZYZ: `b` in `[0, 180]`, `a` and `c`
/// in `(-180, 180]`. Inputs outside that range come back as the same rotation
/// with different numbers, so a zero offset preserves orientation but not
/// necessarily the angle values.
///
/// Returns `None` if the pose cannot be represented as a rigid transform.
pub fn compose_pose(target: &Pose, offset: &ToolOffset) -> Option<Pose> {
    compose_pose_with(&RigidAlgebra, target, offset)
}

/// Apply `offset` to `target`: `T_target * T_offset`, both ZYZ.
pub fn compose_pose_with<A: PoseAlgebra + ?Sized>(
    algebra: &A,
    target: &Pose,
    offset: &ToolOffset,
) -> Option<Pose> {
    let target_m = algebra.euler_to_matrix(&target.to_array(), EulerConvention::Zyz)?;
    let offset_m = algebra.euler_to_matrix(
        &[offset.x, offset.y, -offset.z, 0.0, 0.0, 0.0],
        EulerConvention::Zyz,
    )?;
    let composed = algebra.mat_mul(&target_m, &offset_m);
    let Some(out) = algebra.matrix_to_euler(&composed, EulerConvention::Zyz) else {
        log::debug!("offset composition degenerate for pose {:?}", target.to_array());
        return None;
    };
    Some(Pose {
        position: Point3::new(out[0], out[1], out[2]),
        orientation: EulerAngle::new(out[3], out[4], out[5]),
    })
}

/// Apply one offset to every pose, keeping order and length.
///
/// A degenerate pose yields `None` in its slot; the rest of the batch is
/// still computed.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(poses), fields(n = poses.len())))]
pub fn calc_app_ret_pos_arr(poses: &[Pose], offset: &ToolOffset) -> Vec<Option<Pose>> {
    calc_app_ret_pos_arr_with(&RigidAlgebra, poses, offset)
}

/// Batch variant of [`compose_pose_with`].
pub fn calc_app_ret_pos_arr_with<A: PoseAlgebra + ?Sized>(
    algebra: &A,
    poses: &[Pose],
    offset: &ToolOffset,
) -> Vec<Option<Pose>> {
    poses
        .iter()
        .map(|pose| compose_pose_with(algebra, pose, offset))
        .collect()
}
