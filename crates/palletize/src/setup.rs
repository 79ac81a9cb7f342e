//! Host-facing setup persistence.
//!
//! The host application owns the save/load cycle of every setup screen and
//! calls it through [`SetupPanel`]. [`JsonSetupStore`] keeps a pallet setup
//! document on disk and tracks unsaved edits against the last loaded or
//! saved snapshot.

use crate::calib::{validate_calibration, CalibrationReport, TaughtPoints, ValidatorParams};
use crate::core::ToolOffset;
use crate::layout::{FeederParams, PackingParams};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Save/load contract between a host shell and one setup screen.
pub trait SetupPanel {
    /// Replace the in-memory state with the persisted one.
    fn load(&mut self) -> Result<(), SetupError>;
    /// Persist the in-memory state.
    fn save(&mut self) -> Result<(), SetupError>;
    /// True when the in-memory state differs from the last load or save.
    fn has_changed(&self) -> bool;
}

/// Everything an operator enters while configuring one pallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PalletSetup {
    #[serde(default)]
    pub points: TaughtPoints,
    #[serde(default)]
    pub packing: Option<PackingParams>,
    #[serde(default)]
    pub feeder: Option<FeederParams>,
    #[serde(default)]
    pub approach: ToolOffset,
    #[serde(default)]
    pub retract: ToolOffset,
    #[serde(default)]
    pub validator: ValidatorParams,
}

impl PalletSetup {
    /// Check the taught points with this setup's thresholds.
    pub fn validate(&self) -> CalibrationReport {
        validate_calibration(&self.points, &self.validator)
    }
}

/// [`PalletSetup`] persisted as pretty JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonSetupStore {
    path: PathBuf,
    current: PalletSetup,
    baseline: PalletSetup,
}

impl JsonSetupStore {
    /// Start with an empty setup; nothing is read until [`SetupPanel::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: PalletSetup::default(),
            baseline: PalletSetup::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn setup(&self) -> &PalletSetup {
        &self.current
    }

    pub fn setup_mut(&mut self) -> &mut PalletSetup {
        &mut self.current
    }

    /// Drop unsaved edits.
    pub fn revert(&mut self) {
        self.current = self.baseline.clone();
    }
}

impl SetupPanel for JsonSetupStore {
    fn load(&mut self) -> Result<(), SetupError> {
        let raw = fs::read_to_string(&self.path)?;
        let setup: PalletSetup = serde_json::from_str(&raw)?;
        log::debug!("loaded pallet setup from {}", self.path().display());
        self.baseline = setup.clone();
        self.current = setup;
        Ok(())
    }

    fn save(&mut self) -> Result<(), SetupError> {
        let json = serde_json::to_string_pretty(&self.current)?;
        fs::write(&self.path, json)?;
        log::debug!("saved pallet setup to {}", self.path().display());
        self.baseline = self.current.clone();
        Ok(())
    }

    fn has_changed(&self) -> bool {
        self.current != self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dimension, Pose};

    #[test]
    fn save_load_round_trip_clears_changed_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("setup.json");

        let mut store = JsonSetupStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        assert!(!store.has_changed());

        store.setup_mut().points.origin = Some(Pose::from_array([0.0, 0.0, 0.0, 0.0, 180.0, 0.0]));
        store.setup_mut().packing = Some(PackingParams::new(
            Dimension::new(100.0, 200.0, 300.0),
            2,
            3,
            4,
        ));
        assert!(store.has_changed());

        store.save().expect("save");
        assert!(!store.has_changed());

        let mut other = JsonSetupStore::new(&path);
        other.load().expect("load");
        assert_eq!(other.setup(), store.setup());
        assert!(!other.has_changed());
    }

    #[test]
    fn revert_discards_edits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonSetupStore::new(dir.path().join("setup.json"));
        store.setup_mut().approach = ToolOffset::new(0.0, 0.0, 150.0);
        assert!(store.has_changed());
        store.revert();
        assert!(!store.has_changed());
        assert_eq!(store.setup().approach, ToolOffset::default());
    }

    #[test]
    fn loading_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonSetupStore::new(dir.path().join("missing.json"));
        assert!(matches!(store.load(), Err(SetupError::Io(_))));
    }

    #[test]
    fn setup_validates_its_points() {
        let mut setup = PalletSetup::default();
        let p = Pose::from_array([1.0, 2.0, 3.0, 0.0, 180.0, 0.0]);
        setup.points = TaughtPoints::new(Some(p), Some(p), None);
        assert!(!setup.validate().is_clean());
    }
}
