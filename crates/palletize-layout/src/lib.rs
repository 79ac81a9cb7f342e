//! Product layouts for palletizing, built on `palletize-core` frames.
//!
//! ## Quickstart
//!
//! ```
//! use palletize_core::{Dimension, Point3};
//! use palletize_layout::{generate_packing_layout, PackingParams};
//!
//! let params = PackingParams::new(Dimension::new(200.0, 300.0, 400.0), 2, 3, 2);
//! let layout = generate_packing_layout(
//!     &Point3::new(0.0, 0.0, 0.0),
//!     &Point3::new(1200.0, 0.0, 0.0),
//!     &Point3::new(0.0, 800.0, 0.0),
//!     &params,
//! );
//! assert_eq!(layout.len(), 12);
//! ```
//!
//! Two ways to obtain a layout:
//! 1. Packing pallet: teach the pallet origin and one point along each edge,
//!    enter product size, counts and paddings ([`generate_packing_layout`]).
//! 2. Feeder pallet: teach the top centers of the first product and of the
//!    last product along each edge; pitch and pallet origin are inferred
//!    ([`derive_feeder_pallet`]).

mod feeder;
mod packing;
mod params;

pub use feeder::{derive_feeder_pallet, FeederPallet};
pub use packing::{generate_packing_layout, layout_in_frame, snake_columns};
pub use params::{FeederParams, PackingParams};
