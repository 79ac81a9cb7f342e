//! Per-product poses for a rows × columns × layers grid.
//!
//! Visiting order is layer by layer, row by row, with the column direction
//! alternating every row (snake order) so consecutive placements stay
//! adjacent. Every product shares the pallet frame orientation.

use crate::PackingParams;
use palletize_core::{resolve_frame, translate, Frame, Point3, Pose, ProductLayout};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Generate product poses on the frame taught by `origin`, `point1`, `point2`.
///
/// Returns an empty layout when the taught points do not define a frame.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(params)))]
pub fn generate_packing_layout(
    origin: &Point3<f64>,
    point1: &Point3<f64>,
    point2: &Point3<f64>,
    params: &PackingParams,
) -> ProductLayout {
    let Some(frame) = resolve_frame(origin, point1, point2) else {
        log::debug!("packing layout skipped: invalid frame");
        return ProductLayout::empty();
    };
    layout_in_frame(&frame, params)
}

/// Generate product poses on an already resolved frame.
pub fn layout_in_frame(frame: &Frame, params: &PackingParams) -> ProductLayout {
    let product = params.product;
    let row_pitch = product.width + params.width_padding;
    let col_pitch = product.length + params.length_padding;
    let orientation = frame.euler;

    let mut poses = Vec::with_capacity(params.product_count());
    for layer in 0..params.layers {
        let base = translate(
            &frame.origin,
            &frame.normal,
            (layer as f64 + 1.0) * product.height,
        );
        log::trace!("layer {layer}: base {:?}", base);

        for row in 0..params.rows {
            let along_x = row as f64 * row_pitch + product.width / 2.0 + params.pallet_padding;
            let row_start = translate(&base, &frame.x_axis, along_x);

            for col in snake_columns(row, params.columns) {
                let along_y =
                    col as f64 * col_pitch + product.length / 2.0 + params.pallet_padding;
                let position = translate(&row_start, &frame.y_axis, along_y);
                poses.push(Pose::new(position, orientation));
            }
        }
    }
    ProductLayout::new(poses)
}

/// Column indices for `row`: forward on even rows, backward on odd rows.
pub fn snake_columns(row: u32, columns: u32) -> impl Iterator<Item = u32> {
    let reversed = row % 2 == 1;
    (0..columns).map(move |i| if reversed { columns - 1 - i } else { i })
}
