//! Library exports for reuse in binaries, benchmarks and tests.
/// Application directory helpers.
pub mod app_dirs;
/// CSV batch ingestion.
pub mod batch;
/// Sentiment aggregation for the pie chart.
pub mod chart;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Keyword-based intent detection.
pub mod intent;
/// Tracing setup.
pub mod logging;
/// Logistic regression and evaluation helpers.
pub mod ml;
/// Review records.
pub mod record;
/// Text vectorization and sentiment prediction.
pub mod sentiment;
/// In-memory session of analyzed reviews.
pub mod session;
/// Startup artifact loading.
pub mod startup;
