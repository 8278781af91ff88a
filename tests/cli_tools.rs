mod support {
    pub mod model;
}

use std::path::Path;
use std::process::{Command, Output};

use revsense::app_dirs::CONFIG_HOME_ENV;
use revsense::sentiment::{load_classifier, load_predictor, load_vectorizer};
use support::model::write_artifacts;

fn run(bin: &str, cwd: &Path, config_home: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env(CONFIG_HOME_ENV, config_home)
        .output()
        .expect("spawn binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn labeled_csv() -> String {
    let mut body = String::from("review,sentiment\n");
    let positive = ["love it", "great value", "works great", "love the color"];
    let negative = ["awful quality", "hate the smell", "broke fast, awful", "hate it"];
    for idx in 0..15 {
        for text in positive {
            body.push_str(&format!("\"{text} {idx}\",positive\n"));
        }
        for text in negative {
            body.push_str(&format!("\"{text} {idx}\",negative\n"));
        }
    }
    body
}

#[test]
fn batch_prints_records_and_distribution() {
    let temp = tempfile::tempdir().unwrap();
    write_artifacts(temp.path());
    std::fs::write(
        temp.path().join("reviews.csv"),
        "Review\nlove it\n\"awful,\nrefund please\"\nhate it\n",
    )
    .unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_revsense-batch"),
        temp.path(),
        &temp.path().join("config"),
        &["reviews.csv"],
    );
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "love it\tPositive\tGeneral Feedback");
    assert_eq!(lines[1], "awful, refund please\tNegative\tReturn/Cancel");
    assert_eq!(lines[3], "reviews: 3");
    assert!(text.contains("66.7%"));
}

#[test]
fn batch_fails_without_review_column() {
    let temp = tempfile::tempdir().unwrap();
    write_artifacts(temp.path());
    std::fs::write(temp.path().join("bad.csv"), "body\nlove it\n").unwrap();
    let output = run(
        env!("CARGO_BIN_EXE_revsense-batch"),
        temp.path(),
        &temp.path().join("config"),
        &["bad.csv"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no valid review column"));
}

#[test]
fn train_then_batch_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("train.csv"), labeled_csv()).unwrap();
    let config_home = temp.path().join("config");

    let output = run(
        env!("CARGO_BIN_EXE_revsense-train"),
        temp.path(),
        &config_home,
        &["--data", "train.csv", "--out-dir", "model", "--ngram-max", "1"],
    );
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.contains("accuracy"));
    assert!(text.contains("confusion matrix"));

    let model_dir = temp.path().join("model");
    let vectorizer = load_vectorizer(&model_dir.join("vectorizer.json")).unwrap();
    let model = load_classifier(&model_dir.join("sentiment_model.json")).unwrap();
    assert_eq!(model.feature_dim, vectorizer.dim());
    assert_eq!(model.classes, vec!["negative", "positive"]);

    let predictor = load_predictor(
        &model_dir.join("vectorizer.json"),
        &model_dir.join("sentiment_model.json"),
    )
    .unwrap();
    assert!(predictor.predict_sentiment("I love it, great").is_positive());
    assert!(!predictor.predict_sentiment("awful, I hate it").is_positive());

    std::fs::write(temp.path().join("new.csv"), "text\nlove it\nhate it\n").unwrap();
    let output = run(
        env!("CARGO_BIN_EXE_revsense-batch"),
        temp.path(),
        &config_home,
        &[
            "new.csv",
            "--vectorizer",
            "model/vectorizer.json",
            "--model",
            "model/sentiment_model.json",
            "--summary",
        ],
    );
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.starts_with("reviews: 2"));
    assert!(text.contains("50.0%"));
}
