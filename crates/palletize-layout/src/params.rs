use palletize_core::{PalletDimension, ProductDimension};
use serde::{Deserialize, Serialize};

/// Grid shape and spacing for a packing layout.
///
/// Rows advance along the frame X axis by `product.width + width_padding`,
/// columns along the frame Y axis by `product.length + length_padding`,
/// layers along the normal by `product.height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackingParams {
    pub product: ProductDimension,
    pub rows: u32,
    pub columns: u32,
    pub layers: u32,
    #[serde(default)]
    pub width_padding: f64,
    #[serde(default)]
    pub length_padding: f64,
    /// Shift of the whole grid from the frame origin: positive overhangs the
    /// pallet edge, negative keeps products inside it.
    #[serde(default)]
    pub pallet_padding: f64,
}

impl PackingParams {
    /// Tightly packed grid, no padding.
    pub fn new(product: ProductDimension, rows: u32, columns: u32, layers: u32) -> Self {
        Self {
            product,
            rows,
            columns,
            layers,
            width_padding: 0.0,
            length_padding: 0.0,
            pallet_padding: 0.0,
        }
    }

    /// Number of poses the grid produces.
    pub fn product_count(&self) -> usize {
        self.rows as usize * self.columns as usize * self.layers as usize
    }
}

/// Grid shape and pallet size for a feeder pallet taught from product tops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeederParams {
    pub product: ProductDimension,
    pub rows: u32,
    pub columns: u32,
    pub layers: u32,
    pub pallet: PalletDimension,
}
