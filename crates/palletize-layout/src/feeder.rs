//! Feeder pallets taught from the tops of the extreme products.
//!
//! On a feeder the operator can reach the products but not the pallet
//! origin underneath them. Three points are taught on the top face centers
//! of the first product and of the last product along each grid axis. From
//! those we recover the real center-to-center pitch (including any slack
//! between products), back out the pallet origin and regenerate every
//! product pose with the packing layout generator.

use crate::packing::generate_packing_layout;
use crate::{FeederParams, PackingParams};
use palletize_core::{resolve_frame, translate, Point3, Pose, ProductLayout};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Derived feeder pallet: its own pose plus every product pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeederPallet {
    pub pallet_pose: Pose,
    pub product_poses: ProductLayout,
    /// Gap between neighbouring products along the row axis.
    pub row_padding: f64,
    /// Gap between neighbouring products along the column axis.
    pub column_padding: f64,
}

/// Derive the pallet pose and product grid from three taught product tops.
///
/// `point1` is the first product, `point2` / `point3` the last product along
/// each axis; which of the two becomes the row axis follows the frame
/// canonicalization of [`resolve_frame`]. Returns `None` when the points do
/// not define a frame.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(params)))]
pub fn derive_feeder_pallet(
    point1: &Point3<f64>,
    point2: &Point3<f64>,
    point3: &Point3<f64>,
    params: &FeederParams,
) -> Option<FeederPallet> {
    let Some(frame) = resolve_frame(point1, point2, point3) else {
        log::debug!("feeder pallet rejected: invalid frame");
        return None;
    };
    let product = params.product;
    let pallet = params.pallet;

    let row_span = (frame.point1 - frame.origin).norm();
    let column_span = (frame.point2 - frame.origin).norm();
    let row_padding = implied_padding(row_span, params.rows, product.width);
    let column_padding = implied_padding(column_span, params.columns, product.length);
    log::debug!(
        "feeder spans row={row_span:.3} col={column_span:.3}, padding row={row_padding:.3} col={column_padding:.3}"
    );

    let stack_height = product.height * params.layers as f64;
    let grid_top_center = nalgebra::center(&frame.point1, &frame.point2);
    let grid_base_center = translate(&grid_top_center, &frame.normal, -stack_height);
    let pallet_origin = translate(
        &translate(&grid_base_center, &frame.y_axis, -pallet.length / 2.0),
        &frame.x_axis,
        -pallet.width / 2.0,
    );

    let to_first_corner = |p: &Point3<f64>| {
        let down = translate(p, &frame.normal, -stack_height);
        let back = translate(&down, &frame.x_axis, -product.width / 2.0);
        translate(&back, &frame.y_axis, -product.length / 2.0)
    };
    let origin = to_first_corner(&frame.origin);
    let x_ref = to_first_corner(&frame.point1);
    let y_ref = to_first_corner(&frame.point2);

    let packing = PackingParams {
        product,
        rows: params.rows,
        columns: params.columns,
        layers: params.layers,
        width_padding: row_padding,
        length_padding: column_padding,
        pallet_padding: 0.0,
    };
    let product_poses = generate_packing_layout(&origin, &x_ref, &y_ref, &packing);

    Some(FeederPallet {
        pallet_pose: Pose::new(pallet_origin, frame.euler),
        product_poses,
        row_padding,
        column_padding,
    })
}

/// Gap implied by `count` products whose outer centers are `span` apart.
fn implied_padding(span: f64, count: u32, size: f64) -> f64 {
    if count > 1 {
        span / (count - 1) as f64 - size
    } else {
        0.0
    }
}
