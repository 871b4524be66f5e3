pub mod alloy;
pub mod config;
pub mod error;
pub mod insight;
pub mod model;
pub mod parser;
pub mod server;
pub mod trainer;

// ─── E2E Integration Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::extract::State;
    use axum::Json;

    use crate::alloy::Alloy;
    use crate::config::AppConfig;
    use crate::insight::InsightLevel;
    use crate::server::handlers::{predict, PredictRequest};
    use crate::server::state::AppState;

    fn fixture_config(dir: &Path) -> AppConfig {
        AppConfig {
            friction_csv: dir.join("friction.csv"),
            ocp_csv: dir.join("ocp.csv"),
            wear_workbook: dir.join("wear.xlsx"),
            artifact_dir: dir.join("artifacts"),
            ..AppConfig::default()
        }
    }

    /// Synthetic friction export in the real file's two-row-header shape:
    /// Pure Mg runs high-friction, Al-Mg-Zn runs low-friction.
    fn write_friction_csv(path: &Path) {
        let mut csv = String::from(
            "Mg,Unnamed: 1,Mg bi,Unnamed: 3,Mg Sr,Unnamed: 5,Mg Zn,Unnamed: 7\n\
             Timestamp,COF,Timestamp,COF,Timestamp,COF,Timestamp,COF\n",
        );
        for i in 0..40 {
            let t = i as f64;
            csv.push_str(&format!(
                "{t},{:.3},{t},{:.3},{t},{:.3},{t},{:.3}\n",
                0.50 + 0.0005 * t,
                0.30 + 0.0005 * t,
                0.28 + 0.0005 * t,
                0.12 + 0.0005 * t,
            ));
        }
        std::fs::write(path, csv).unwrap();
    }

    /// Synthetic OCP export in paired-column layout, including the source's
    /// "Al- Mg-Bi" header spelling. Pure Mg is active, Al-Mg-Zn more noble.
    fn write_ocp_csv(path: &Path) {
        let mut csv = String::from("Pure Mg,OCP,Al- Mg-Bi,OCP,Al-Mg-Sr,OCP,Al-Mg-Zn,OCP\n");
        for i in 0..40 {
            let t = i as f64 * 10.0;
            csv.push_str(&format!(
                "{t},{:.4},{t},{:.4},{t},{:.4},{t},{:.4}\n",
                -1.55 + 0.0002 * t,
                -1.34 + 0.0002 * t,
                -1.31 + 0.0002 * t,
                -1.18 + 0.0002 * t,
            ));
        }
        std::fs::write(path, csv).unwrap();
    }

    /// E2E: train from synthetic lab files → reload artifacts → predict →
    /// threshold insights reflect each alloy's regime.
    #[tokio::test]
    async fn test_e2e_train_and_predict_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        write_friction_csv(&config.friction_csv);
        write_ocp_csv(&config.ocp_csv);

        // 1. Offline pipeline (the wear workbook is deliberately absent).
        let report = crate::trainer::run(&config).unwrap();
        assert!(report.cof.trained);
        assert!(report.ocp.trained);
        assert_eq!(report.cof.n_samples, 160);
        assert_eq!(report.ocp.n_samples, 160);
        assert!(report.cof.unmatched_alloys.is_empty());
        assert!(report.wear_alloys.is_empty());

        // 2. Serve-time loading.
        let state = Arc::new(AppState::load(&config));
        assert!(state.cof.is_some());
        assert!(state.ocp.is_some());

        // 3. Predictions land near each alloy's training regime.
        let cof_model = &state.cof.as_ref().unwrap().model;
        let pure = cof_model.predict(20.0, Alloy::PureMg).unwrap();
        let zinc = cof_model.predict(20.0, Alloy::AlMgZn).unwrap();
        assert!(pure > 0.40, "Pure Mg COF should stay high, got {pure:.3}");
        assert!(zinc < 0.20, "Al-Mg-Zn COF should stay low, got {zinc:.3}");

        // 4. Request path: insights match the regimes.
        let Json(response) = predict(
            State(state.clone()),
            Json(PredictRequest {
                alloy_type: "Al-Mg-Zn".to_string(),
                timestamp: 20.0,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.comments[0].level, InsightLevel::Good, "low friction");
        assert_eq!(response.comments[1].level, InsightLevel::Good, "noble OCP");
        assert_eq!(response.comments[2].level, InsightLevel::Unknown, "no wear data");
        assert!(response.predicted_ocp.ends_with(" V"));

        let Json(response) = predict(
            State(state),
            Json(PredictRequest {
                alloy_type: "Pure Mg".to_string(),
                timestamp: 20.0,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.comments[0].level, InsightLevel::Warning, "high friction");
        assert_eq!(response.comments[1].level, InsightLevel::Warning, "active OCP");
    }

    /// E2E: retraining overwrites artifacts in place and the server picks up
    /// the new regime on its next load.
    #[tokio::test]
    async fn test_e2e_retrain_overwrites_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());

        write_friction_csv(&config.friction_csv);
        crate::trainer::run(&config).unwrap();
        let first = AppState::load(&config);
        let before = first
            .cof
            .as_ref()
            .unwrap()
            .model
            .predict(5.0, Alloy::PureMg)
            .unwrap();
        assert!(before > 0.4);

        // New campaign: Pure Mg now runs low-friction.
        let mut csv = String::from("Mg,Unnamed: 1\nTimestamp,COF\n");
        for i in 0..40 {
            csv.push_str(&format!("{}.0,0.05\n", i));
        }
        std::fs::write(&config.friction_csv, csv).unwrap();
        crate::trainer::run(&config).unwrap();

        let second = AppState::load(&config);
        let after = second
            .cof
            .as_ref()
            .unwrap()
            .model
            .predict(5.0, Alloy::PureMg)
            .unwrap();
        assert!(after < 0.1, "retrained model should predict ~0.05, got {after:.3}");
    }
}
