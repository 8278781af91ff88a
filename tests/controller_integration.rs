mod support {
    pub mod env;
    pub mod model;
}

use support::{env::RevsenseEnvGuard, model::write_artifacts};

use revsense::config::{self, AppConfig};
use revsense::egui_app::controller::ReviewController;
use revsense::egui_app::state::{Emotion, NoticeKind};
use revsense::intent::Intent;
use revsense::session::Mode;
use revsense::startup::{self, ICON_SIZE, StartupError};
use revsense::sentiment::ArtifactError;
use std::path::PathBuf;
use tempfile::TempDir;

struct ControllerHarness {
    _temp: TempDir,
    csv_dir: PathBuf,
    pub controller: ReviewController,
}

impl ControllerHarness {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let paths = write_artifacts(temp.path());
        let artifacts = startup::load(&paths).expect("load startup artifacts");
        let csv_dir = temp.path().join("csv");
        std::fs::create_dir_all(&csv_dir).expect("create csv dir");
        Self {
            _temp: temp,
            csv_dir,
            controller: ReviewController::new(artifacts.predictor, AppConfig::default()),
        }
    }

    fn write_csv(&self, name: &str, body: &str) -> PathBuf {
        let path = self.csv_dir.join(name);
        std::fs::write(&path, body).expect("write csv");
        path
    }
}

#[test]
fn startup_loads_artifacts_and_resizes_icons() {
    let temp = tempfile::tempdir().unwrap();
    let paths = write_artifacts(temp.path());
    let artifacts = startup::load(&paths).unwrap();
    assert_eq!(artifacts.icons.happy.dimensions(), (ICON_SIZE, ICON_SIZE));
    assert_eq!(artifacts.icons.sad.dimensions(), (ICON_SIZE, ICON_SIZE));
    assert!(artifacts.predictor.predict_sentiment("love").is_positive());
}

#[test]
fn startup_fails_on_incompatible_artifacts() {
    let temp = tempfile::tempdir().unwrap();
    let paths = write_artifacts(temp.path());
    let mut model = support::model::keyword_model();
    model.feature_dim = 5;
    model.weights = vec![0.0; 10];
    revsense::sentiment::save_json(&paths.model_path, &model).unwrap();
    let err = startup::load(&paths).err().unwrap();
    assert!(matches!(
        err,
        StartupError::Model(ArtifactError::DimensionMismatch {
            vectorizer: 4,
            classifier: 5
        })
    ));
}

#[test]
fn startup_fails_on_missing_icon() {
    let temp = tempfile::tempdir().unwrap();
    let paths = write_artifacts(temp.path());
    std::fs::remove_file(&paths.negative_icon).unwrap();
    let err = startup::load(&paths).err().unwrap();
    assert!(matches!(err, StartupError::Icon { .. }));
}

#[test]
fn manual_flow_then_csv_then_chart() {
    let mut harness = ControllerHarness::new();
    let controller = &mut harness.controller;

    controller.ui.entry.text = "I love it and would recommend".into();
    controller.analyze_entry();
    let result = controller.ui.result.clone().unwrap();
    assert_eq!(result.emotion, Emotion::Happy);
    assert_eq!(result.intent, Intent::Recommendation);
    assert_eq!(controller.session().count(), 1);

    let csv = harness.write_csv(
        "batch.csv",
        "id,Text\n1,great buy\n2,awful I want a refund\n3,hate it\n",
    );
    harness.controller.load_csv_from_path(&csv);
    let controller = &mut harness.controller;
    assert_eq!(controller.session().mode(), Mode::Csv);
    assert_eq!(controller.session().count(), 3);
    assert_eq!(controller.ui.reviews.count_text(), "Reviews stored: 3");
    let intents: Vec<Intent> = controller.session().all().iter().map(|r| r.intent).collect();
    assert_eq!(
        intents,
        vec![Intent::Purchase, Intent::ReturnCancel, Intent::GeneralFeedback]
    );

    controller.show_pie_chart();
    let chart = controller.ui.chart.clone().unwrap();
    let labels: Vec<_> = chart.slices.iter().map(|s| s.share.percent_label()).collect();
    assert_eq!(chart.slices[0].share.label, "Positive");
    assert_eq!(labels, vec!["33.3%", "66.7%"]);
}

#[test]
fn unreadable_csv_keeps_session_empty() {
    let mut harness = ControllerHarness::new();
    let csv = harness.csv_dir.join("missing.csv");
    harness.controller.load_csv_from_path(&csv);
    let notice = harness.controller.ui.notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("missing.csv"));
    assert_eq!(harness.controller.session().count(), 0);
}

#[test]
fn config_round_trips_through_config_home() {
    let temp = tempfile::tempdir().unwrap();
    let _env = RevsenseEnvGuard::set_config_home(temp.path().to_path_buf());
    assert_eq!(config::load_or_default().unwrap(), AppConfig::default());

    let mut cfg = AppConfig::default();
    cfg.last_csv_dir = Some(temp.path().join("data"));
    cfg.artifacts.model_path = PathBuf::from("models/custom.json");
    config::save(&cfg).unwrap();

    let path = config::config_path().unwrap();
    assert!(path.starts_with(temp.path().join(".revsense")));
    assert_eq!(config::load_or_default().unwrap(), cfg);
}

#[test]
fn configured_artifact_paths_drive_startup() {
    let temp = tempfile::tempdir().unwrap();
    let model_dir = temp.path().join("models");
    std::fs::create_dir_all(&model_dir).unwrap();
    write_artifacts(&model_dir);

    let mut cfg = AppConfig::default();
    cfg.artifacts.model_path = PathBuf::from("models/sentiment_model.json");
    cfg.artifacts.vectorizer_path = PathBuf::from("models/vectorizer.json");
    cfg.artifacts.positive_icon = PathBuf::from("models/positive.jpeg");
    cfg.artifacts.negative_icon = PathBuf::from("models/negative.jpeg");
    let artifacts = startup::load(&cfg.artifacts.resolved_against(temp.path())).unwrap();
    assert_eq!(
        artifacts.predictor.predict_sentiment("awful").label(),
        "negative"
    );
}
