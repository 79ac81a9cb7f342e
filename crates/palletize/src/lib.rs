//! High-level facade crate for the `palletize-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the geometry, layout and calibration crates
//! - JSON jobs and reports for batch layout generation ([`io`])
//! - persistence of a pallet setup behind a host-driven save/load contract
//!   ([`setup`])
//! - (feature `cli`) the `palletize` binary.
//!
//! ## Quickstart
//!
//! ```
//! use palletize::core::{calc_app_ret_pos_arr, Dimension, Point3, ToolOffset};
//! use palletize::layout::{generate_packing_layout, PackingParams};
//!
//! let params = PackingParams::new(Dimension::new(200.0, 300.0, 400.0), 2, 2, 1);
//! let layout = generate_packing_layout(
//!     &Point3::new(0.0, 0.0, 0.0),
//!     &Point3::new(1200.0, 0.0, 0.0),
//!     &Point3::new(0.0, 800.0, 0.0),
//!     &params,
//! );
//! let approach = calc_app_ret_pos_arr(layout.as_slice(), &ToolOffset::new(0.0, 0.0, 100.0));
//! assert_eq!(approach.len(), 4);
//! ```
//!
//! ## API map
//! - `palletize::core`: vectors, planes, frames, pose algebra and tool offsets.
//! - `palletize::layout`: packing and feeder pallet layouts.
//! - `palletize::calib`: validation of taught calibration points.

pub use palletize_calib as calib;
pub use palletize_core as core;
pub use palletize_layout as layout;

pub use palletize_calib::{validate_calibration, CalibrationReport, TaughtPoints};
pub use palletize_core::{Pose, ProductLayout, ToolOffset};
pub use palletize_layout::{derive_feeder_pallet, generate_packing_layout};

pub mod io;
pub mod setup;
