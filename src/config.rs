use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Qualitative-comment thresholds. Defaults match the rule tables the
/// metallurgy team signed off on; a config file can tighten them per campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightThresholds {
    /// COF below this is rated excellent.
    pub cof_low: f64,
    /// COF above this is rated a wear risk.
    pub cof_high: f64,
    /// OCP (volts) below this means a highly active surface.
    pub ocp_active: f64,
    /// OCP (volts) above this means a relatively noble surface.
    pub ocp_noble: f64,
    /// Wear depth (µm) below this is rated high wear resistance.
    pub wear_low_um: f64,
    /// Wear depth (µm) above this is rated significant material loss.
    pub wear_high_um: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        InsightThresholds {
            cof_low: 0.20,
            cof_high: 0.40,
            ocp_active: -1.4,
            ocp_noble: -1.25,
            wear_low_um: 10.0,
            wear_high_um: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Friction test export (two-row header CSV).
    pub friction_csv: PathBuf,
    /// Open-circuit potential export (paired-column CSV).
    pub ocp_csv: PathBuf,
    /// Wear profilometer workbook (one sheet per alloy).
    pub wear_workbook: PathBuf,
    /// Directory where trained artifacts are written and loaded from.
    pub artifact_dir: PathBuf,
    /// Address the prediction server binds to.
    pub bind_addr: String,
    pub thresholds: InsightThresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            friction_csv: PathBuf::from("data/Friction_File.csv"),
            ocp_csv: PathBuf::from("data/OCP.csv"),
            wear_workbook: PathBuf::from("data/Wear proflie.xlsx"),
            artifact_dir: PathBuf::from("artifacts"),
            bind_addr: "127.0.0.1:8080".to_string(),
            thresholds: InsightThresholds::default(),
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file. Fields absent from the file keep their
    /// defaults; a missing file is not an error and yields the full defaults.
    pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
        match path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(p)?;
                Ok(serde_json::from_str(&raw)?)
            }
            Some(p) => {
                tracing::warn!(path = %p.display(), "config file not found, using defaults");
                Ok(AppConfig::default())
            }
            None => Ok(AppConfig::default()),
        }
    }

    pub fn cof_model_path(&self) -> PathBuf {
        self.artifact_dir.join("cof_model.bin")
    }

    pub fn ocp_model_path(&self) -> PathBuf {
        self.artifact_dir.join("ocp_model.bin")
    }

    pub fn wear_database_path(&self) -> PathBuf {
        self.artifact_dir.join("wear_database.json")
    }
}
