use std::path::Path;

use image::{Rgb, RgbImage};
use revsense::config::ArtifactPaths;
use revsense::ml::logreg::LogRegModel;
use revsense::sentiment::{FitOptions, Norm, TextVectorizer, save_json};

/// Vectorizer over `awful great hate love` with raw counts.
pub fn keyword_vectorizer() -> TextVectorizer {
    TextVectorizer::fit(
        &["awful great hate love"],
        &FitOptions {
            ngram_max: 1,
            use_idf: false,
            norm: Norm::None,
            ..FitOptions::default()
        },
    )
    .expect("fit keyword vectorizer")
}

/// "love"/"great" push towards positive, everything else reads negative.
pub fn keyword_model() -> LogRegModel {
    LogRegModel {
        model_id: Some("keyword-test".into()),
        model_version: 1,
        feature_dim: 4,
        classes: vec!["negative".into(), "positive".into()],
        weights: vec![1.0, -1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0],
        bias: vec![0.1, 0.0],
        temperature: 1.0,
    }
}

/// Write both model artifacts and both icons under their default names in `dir`.
pub fn write_artifacts(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths::default().resolved_against(dir);
    save_json(&paths.vectorizer_path, &keyword_vectorizer()).expect("write vectorizer");
    save_json(&paths.model_path, &keyword_model()).expect("write model");
    write_icon(&paths.positive_icon, Rgb([250, 210, 60]));
    write_icon(&paths.negative_icon, Rgb([90, 120, 220]));
    paths
}

fn write_icon(path: &Path, color: Rgb<u8>) {
    RgbImage::from_pixel(100, 80, color)
        .save(path)
        .expect("write icon");
}
