use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::artifact::{save_model, save_wear_database, ModelArtifact};
use crate::model::forest::TrainedModel;
use crate::parser::types::SeriesOutput;
use crate::parser::{friction, ocp, wear};

/// Outcome of one model-training stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub trained: bool,
    pub n_samples: usize,
    pub per_alloy: BTreeMap<String, usize>,
    pub unmatched_alloys: Vec<String>,
    pub skipped_values: usize,
    pub skipped_reason: Option<String>,
}

impl StageReport {
    fn skipped(reason: String) -> Self {
        StageReport {
            trained: false,
            n_samples: 0,
            per_alloy: BTreeMap::new(),
            unmatched_alloys: Vec::new(),
            skipped_values: 0,
            skipped_reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub cof: StageReport,
    pub ocp: StageReport,
    /// Canonical names of alloys that got a wear-database entry.
    pub wear_alloys: Vec<String>,
    pub wear_skipped_sheets: Vec<String>,
    pub wear_skipped_reason: Option<String>,
}

/// Run the full offline pipeline: friction model, OCP model, wear database.
/// Stages are independent — a stage that fails or finds no data is recorded
/// and logged, and the remaining stages still run. Only an unusable artifact
/// directory aborts the run.
pub fn run(config: &AppConfig) -> Result<TrainingReport, AppError> {
    std::fs::create_dir_all(&config.artifact_dir)?;

    let cof = train_stage(
        "COF",
        &config.friction_csv,
        friction::parse_friction,
        &config.cof_model_path(),
    );
    let ocp = train_stage(
        "OCP",
        &config.ocp_csv,
        ocp::parse_ocp,
        &config.ocp_model_path(),
    );

    let (wear_alloys, wear_skipped_sheets, wear_skipped_reason) = build_wear_stage(config);

    Ok(TrainingReport {
        cof,
        ocp,
        wear_alloys,
        wear_skipped_sheets,
        wear_skipped_reason,
    })
}

fn train_stage(
    target: &str,
    data_path: &Path,
    parse: fn(&Path) -> Result<SeriesOutput, AppError>,
    artifact_path: &Path,
) -> StageReport {
    let parsed = match parse(data_path) {
        Ok(p) => p,
        Err(err) => {
            warn!(target_name = target, path = %data_path.display(), %err, "skipping stage");
            return StageReport::skipped(err.to_string());
        }
    };

    for w in &parsed.warnings {
        warn!(target_name = target, line = w.line, "{}", w.message);
    }
    if parsed.samples.is_empty() {
        warn!(
            target_name = target,
            path = %data_path.display(),
            "no series matched, check the file headers"
        );
        return StageReport {
            unmatched_alloys: parsed.unmatched_alloys,
            skipped_values: parsed.skipped_values,
            ..StageReport::skipped("no matching data series found".to_string())
        };
    }

    let model = match TrainedModel::fit(target, &parsed.samples) {
        Ok(m) => m,
        Err(err) => {
            warn!(target_name = target, %err, "model fit failed, skipping stage");
            return StageReport::skipped(err.to_string());
        }
    };

    let artifact = ModelArtifact::new(model, parsed.samples.len());
    if let Err(err) = save_model(artifact_path, &artifact) {
        warn!(target_name = target, %err, "could not write artifact, skipping stage");
        return StageReport::skipped(err.to_string());
    }

    info!(
        target_name = target,
        n_samples = parsed.samples.len(),
        artifact = %artifact_path.display(),
        "model trained and saved"
    );
    StageReport {
        trained: true,
        n_samples: parsed.samples.len(),
        per_alloy: parsed.per_alloy_counts,
        unmatched_alloys: parsed.unmatched_alloys,
        skipped_values: parsed.skipped_values,
        skipped_reason: None,
    }
}

fn build_wear_stage(config: &AppConfig) -> (Vec<String>, Vec<String>, Option<String>) {
    let scan = match wear::scan_workbook(&config.wear_workbook) {
        Ok(s) => s,
        Err(err) => {
            warn!(path = %config.wear_workbook.display(), %err, "skipping wear database");
            return (Vec::new(), Vec::new(), Some(err.to_string()));
        }
    };

    if scan.database.is_empty() {
        warn!(
            path = %config.wear_workbook.display(),
            "no sheet matched an alloy, wear database not written"
        );
        return (
            Vec::new(),
            scan.skipped_sheets,
            Some("no sheet matched an alloy".to_string()),
        );
    }

    if let Err(err) = save_wear_database(&config.wear_database_path(), &scan.database) {
        warn!(%err, "could not write wear database");
        return (Vec::new(), scan.skipped_sheets, Some(err.to_string()));
    }

    info!(
        alloys = scan.database.len(),
        artifact = %config.wear_database_path().display(),
        "wear database saved"
    );
    (
        scan.database.keys().cloned().collect(),
        scan.skipped_sheets,
        None,
    )
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(dir: &Path) -> AppConfig {
        AppConfig {
            friction_csv: dir.join("friction.csv"),
            ocp_csv: dir.join("ocp.csv"),
            wear_workbook: dir.join("wear.xlsx"),
            artifact_dir: dir.join("artifacts"),
            ..AppConfig::default()
        }
    }

    fn write_friction_fixture(path: &Path, rows: usize) {
        let mut csv = String::from(
            "Mg,Unnamed: 1,Mg bi,Unnamed: 3\nTimestamp,COF,Timestamp,COF\n",
        );
        for i in 0..rows {
            csv.push_str(&format!("{i}.0,0.4{},{i}.0,0.2{}\n", i % 10, i % 10));
        }
        std::fs::write(path, csv).unwrap();
    }

    #[test]
    fn test_missing_inputs_skip_every_stage() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        let report = run(&config).unwrap();

        assert!(!report.cof.trained);
        assert!(!report.ocp.trained);
        assert!(report.cof.skipped_reason.is_some());
        assert!(report.wear_alloys.is_empty());
        assert!(report.wear_skipped_reason.is_some());
    }

    #[test]
    fn test_cof_stage_trains_independently() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        write_friction_fixture(&config.friction_csv, 20);

        let report = run(&config).unwrap();
        assert!(report.cof.trained);
        assert_eq!(report.cof.n_samples, 40);
        assert_eq!(report.cof.per_alloy["Pure Mg"], 20);
        assert_eq!(report.cof.per_alloy["Al-Mg-Bi"], 20);
        assert!(config.cof_model_path().exists());
        // The OCP file is still missing; its stage skips without aborting.
        assert!(!report.ocp.trained);
        assert!(!config.ocp_model_path().exists());
    }

    #[test]
    fn test_ocp_stage_trains_and_artifact_loads() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        let mut csv = String::from("Pure Mg,OCP,Al-Mg-Zn,OCP\n");
        for i in 0..25 {
            csv.push_str(&format!("{i},-1.5{},{i},-1.2{}\n", i % 10, i % 10));
        }
        std::fs::write(&config.ocp_csv, csv).unwrap();

        let report = run(&config).unwrap();
        assert!(report.ocp.trained);
        assert_eq!(report.ocp.n_samples, 50);

        let artifact = crate::model::artifact::load_model(&config.ocp_model_path()).unwrap();
        assert_eq!(artifact.n_samples, 50);
        let p = artifact
            .model
            .predict(12.0, crate::alloy::Alloy::PureMg)
            .unwrap();
        assert!(p < -1.0, "OCP prediction should be strongly negative, got {p}");
    }

    #[test]
    fn test_no_matching_series_reports_reason() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        std::fs::write(&config.friction_csv, "Steel,x\nTimestamp,COF\n0.0,0.5\n").unwrap();

        let report = run(&config).unwrap();
        assert!(!report.cof.trained);
        assert_eq!(
            report.cof.skipped_reason.as_deref(),
            Some("no matching data series found")
        );
        assert_eq!(report.cof.unmatched_alloys.len(), 4);
    }

    #[test]
    fn test_unwritable_artifact_dir_aborts() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the artifact directory should be.
        let blocker = dir.path().join("artifacts");
        std::fs::write(&blocker, "not a directory").unwrap();

        let config = AppConfig {
            artifact_dir: PathBuf::from(&blocker),
            ..temp_config(dir.path())
        };
        assert!(run(&config).is_err());
    }
}
