//! Core geometry for configuring a palletizing robot.
//!
//! This crate is purely geometric and stateless: every function takes
//! immutable inputs and returns a value, with `None` standing for "the taught
//! points do not define valid geometry".
//!
//! - [`vector`]: cross products, plane equations, signed angles, translation.
//! - [`resolve_frame`]: an up-facing frame and ZYZ orientation from three taught points.
//! - [`PoseAlgebra`]: the pose <-> homogeneous matrix boundary, with the
//!   `nalgebra`-backed [`RigidAlgebra`].
//! - [`compose_pose`] / [`calc_app_ret_pos_arr`]: approach and retract waypoints.

mod algebra;
mod frame;
mod offset;
mod types;
pub mod vector;

pub use algebra::{EulerConvention, PoseAlgebra, RigidAlgebra};
pub use frame::{resolve_frame, Frame};
pub use offset::{
    calc_app_ret_pos_arr, calc_app_ret_pos_arr_with, compose_pose, compose_pose_with, ToolOffset,
};
pub use types::{
    Dimension, EulerAngle, PalletDimension, PlaneEquation, Pose, ProductDimension, ProductLayout,
};
pub use vector::{angle_between, cross_product, plane_equation, translate};

pub use nalgebra::{Point3, Vector3};
