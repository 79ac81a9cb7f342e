//! JSON jobs and reports for layout generation and calibration checks.

use crate::calib::{validate_calibration, CalibrationReport, TaughtPoints, ValidatorParams};
use crate::core::{calc_app_ret_pos_arr, Point3, Pose, ProductLayout, ToolOffset};
use crate::layout::{derive_feeder_pallet, generate_packing_layout, FeederParams, PackingParams};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum PalletizeIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors produced when running a layout job.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutJobError {
    #[error("taught points are collinear or coincide; re-teach the pallet frame")]
    InvalidFrame,
}

fn default_prefix() -> String {
    "product".to_string()
}

/// Which kind of pallet the taught points describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PalletJob {
    /// Pallet origin plus one point along each pallet edge.
    Packing {
        origin: Point3<f64>,
        point1: Point3<f64>,
        point2: Point3<f64>,
        params: PackingParams,
    },
    /// Top centers of the first product and the last product along each edge.
    Feeder {
        point1: Point3<f64>,
        point2: Point3<f64>,
        point3: Point3<f64>,
        params: FeederParams,
    },
}

/// Layout job read from disk by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutJob {
    pub pallet: PalletJob,
    #[serde(default)]
    pub approach: Option<ToolOffset>,
    #[serde(default)]
    pub retract: Option<ToolOffset>,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Label prefix for products in the report (`"<prefix>-<n>"`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Computed layout plus optional waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub pallet_pose: Option<Pose>,
    pub row_padding: Option<f64>,
    pub column_padding: Option<f64>,
    pub products: ProductLayout,
    pub approach: Vec<Option<Pose>>,
    pub retract: Vec<Option<Pose>>,
}

impl LayoutJob {
    /// Load a JSON job from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PalletizeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this job to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PalletizeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("palletize_layout_report.json"))
    }

    /// Compute product poses and the requested waypoints.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self), fields(prefix = %self.prefix)))]
    pub fn run(&self) -> Result<LayoutOutcome, LayoutJobError> {
        let (pallet_pose, row_padding, column_padding, products) = match &self.pallet {
            PalletJob::Packing {
                origin,
                point1,
                point2,
                params,
            } => {
                let layout = generate_packing_layout(origin, point1, point2, params);
                if layout.is_empty() && params.product_count() > 0 {
                    return Err(LayoutJobError::InvalidFrame);
                }
                (
                    None,
                    Some(params.width_padding),
                    Some(params.length_padding),
                    layout,
                )
            }
            PalletJob::Feeder {
                point1,
                point2,
                point3,
                params,
            } => {
                let feeder = derive_feeder_pallet(point1, point2, point3, params)
                    .ok_or(LayoutJobError::InvalidFrame)?;
                (
                    Some(feeder.pallet_pose),
                    Some(feeder.row_padding),
                    Some(feeder.column_padding),
                    feeder.product_poses,
                )
            }
        };

        let waypoints = |offset: Option<ToolOffset>| {
            offset
                .map(|o| calc_app_ret_pos_arr(products.as_slice(), &o))
                .unwrap_or_default()
        };
        let approach = waypoints(self.approach);
        let retract = waypoints(self.retract);
        log::info!(
            "layout: {} products, {} approach / {} retract waypoints",
            products.len(),
            approach.len(),
            retract.len()
        );

        Ok(LayoutOutcome {
            pallet_pose,
            row_padding,
            column_padding,
            products,
            approach,
            retract,
        })
    }
}

/// One labelled product pose with its waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub key: String,
    pub pose: Pose,
    #[serde(default)]
    pub approach: Option<Pose>,
    #[serde(default)]
    pub retract: Option<Pose>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutReport {
    pub job_path: String,
    pub pallet: PalletJob,
    #[serde(default)]
    pub pallet_pose: Option<Pose>,
    #[serde(default)]
    pub row_padding: Option<f64>,
    #[serde(default)]
    pub column_padding: Option<f64>,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LayoutReport {
    /// Build an empty report for `job`.
    pub fn new(job: &LayoutJob, job_path: &Path) -> Self {
        Self {
            job_path: job_path.to_string_lossy().into_owned(),
            pallet: job.pallet.clone(),
            pallet_pose: None,
            row_padding: None,
            column_padding: None,
            products: Vec::new(),
            error: None,
        }
    }

    /// Populate report fields from a successful run.
    pub fn set_outcome(&mut self, prefix: &str, outcome: LayoutOutcome) {
        self.pallet_pose = outcome.pallet_pose;
        self.row_padding = outcome.row_padding;
        self.column_padding = outcome.column_padding;
        self.products = outcome
            .products
            .keyed(prefix)
            .into_iter()
            .enumerate()
            .map(|(i, (key, pose))| ProductEntry {
                key,
                pose,
                approach: outcome.approach.get(i).copied().flatten(),
                retract: outcome.retract.get(i).copied().flatten(),
            })
            .collect();
        self.error = None;
    }

    /// Record a job error.
    pub fn set_error(&mut self, err: LayoutJobError) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PalletizeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PalletizeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Taught points plus optional rule thresholds, as read by `palletize validate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalibrationInput {
    pub points: TaughtPoints,
    #[serde(default)]
    pub params: ValidatorParams,
}

impl CalibrationInput {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PalletizeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn validate(&self) -> CalibrationReport {
        validate_calibration(&self.points, &self.params)
    }
}
