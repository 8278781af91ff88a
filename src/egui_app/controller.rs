//! Event handlers bridging the review pipeline to the egui UI.
//!
//! Every handler runs to completion on the UI thread and leaves [`UiState`]
//! consistent with the session, so the renderer never reads the session
//! directly.

use std::path::Path;

use rfd::FileDialog;

use crate::batch;
use crate::chart::{self, DEFAULT_START_ANGLE_DEG};
use crate::config::{self, AppConfig};
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::record::ReviewRecord;
use crate::sentiment::SentimentPredictor;
use crate::session::{Mode, Session};

mod status_message;

pub(crate) use status_message::StatusMessage;

const INPUT_ERROR_TITLE: &str = "Input Error";
const EMPTY_INPUT_MESSAGE: &str = "Please enter a sentence.";
const CSV_ERROR_TITLE: &str = "CSV Error";
const NO_DATA_TITLE: &str = "No Data";
const NO_DATA_MESSAGE: &str = "No data to chart";

/// Owns the session and the loaded model; mutates UI state in response to user actions.
pub struct ReviewController {
    pub ui: UiState,
    session: Session,
    predictor: SentimentPredictor,
    config: AppConfig,
}

impl ReviewController {
    pub fn new(predictor: SentimentPredictor, config: AppConfig) -> Self {
        Self {
            ui: UiState::default(),
            session: Session::new(),
            predictor,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Analyze whatever is in the entry field.
    pub fn analyze_entry(&mut self) {
        let text = self.ui.entry.text.clone();
        self.analyze_manual(&text);
    }

    /// Analyze one typed review into the manual list.
    ///
    /// Whitespace-only input raises a warning notice and changes nothing.
    pub fn analyze_manual(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.notify(Notice::warning(INPUT_ERROR_TITLE, EMPTY_INPUT_MESSAGE));
            self.set_status_message(StatusMessage::EmptyInput);
            return;
        }
        self.set_mode(Mode::Manual);
        let record = ReviewRecord::analyze(text, &self.predictor);
        tracing::info!(
            sentiment = record.sentiment.label(),
            intent = record.intent.label(),
            "Analyzed review"
        );
        let view = ResultView::from_record(&record);
        self.set_status_message(StatusMessage::ReviewRecorded {
            sentiment: view.sentiment.clone(),
            intent: view.intent.label().to_string(),
        });
        self.ui.result = Some(view);
        self.session.record(record);
        self.refresh_session_view();
    }

    /// Ask for a CSV file and import it; the mode switches only once the file reads cleanly.
    pub fn upload_csv_via_dialog(&mut self) {
        let mut dialog = FileDialog::new()
            .set_title("Select CSV file")
            .add_filter("CSV files", &["csv"]);
        if let Some(dir) = self.config.last_csv_dir.as_ref().filter(|dir| dir.is_dir()) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.remember_csv_dir(&path);
        self.load_csv_from_path(&path);
    }

    /// Read every review in `path`, then switch to CSV mode and append them.
    ///
    /// Failures leave the session and mode untouched and raise an error notice.
    pub fn load_csv_from_path(&mut self, path: &Path) {
        match batch::ingest_csv(path, &self.predictor) {
            Ok(records) => {
                self.set_mode(Mode::Csv);
                let count = records.len();
                self.session.record_all(records);
                self.refresh_session_view();
                let file = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status_message(StatusMessage::CsvImported { file, count });
            }
            Err(err) => {
                let err = err.to_string();
                self.notify(Notice::error(CSV_ERROR_TITLE, err.clone()));
                self.set_status_message(StatusMessage::CsvFailed { err });
            }
        }
    }

    /// Build the pie chart for the active list.
    pub fn show_pie_chart(&mut self) {
        let shares = chart::sentiment_distribution(self.session.all());
        if shares.is_empty() {
            self.ui.chart = None;
            self.notify(Notice::info(NO_DATA_TITLE, NO_DATA_MESSAGE));
            self.set_status_message(StatusMessage::NoChartData);
            return;
        }
        self.ui.chart = Some(ChartState {
            slices: chart::pie_slices(&shares, DEFAULT_START_ANGLE_DEG),
        });
        self.set_status_message(StatusMessage::ChartShown {
            total: self.session.count(),
        });
    }

    /// Drop every stored review in both modes and clear the result labels.
    pub fn reset_all(&mut self) {
        self.session.reset();
        self.ui.result = None;
        self.ui.chart = None;
        self.ui.entry.text.clear();
        self.refresh_session_view();
        tracing::info!("Session reset");
        self.set_status_message(StatusMessage::SessionReset);
    }

    /// Activate `mode`; the list of the mode being left is discarded.
    pub fn set_mode(&mut self, mode: Mode) {
        if !self.session.switch_mode(mode) {
            return;
        }
        self.ui.mode = mode;
        self.ui.result = None;
        self.refresh_session_view();
        self.set_status_message(StatusMessage::ModeSwitched { mode });
    }

    pub fn dismiss_notice(&mut self) {
        self.ui.notice = None;
        self.ui.entry.focus_requested = true;
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.set_status_message(StatusMessage::custom(text, tone));
    }

    pub(crate) fn set_status_message(&mut self, message: StatusMessage) {
        let (text, tone) = message.into_text_and_tone();
        self.ui.status = StatusBarState::new(text, tone);
    }

    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => tracing::info!(title = %notice.title, "{}", notice.message),
            NoticeKind::Warning => tracing::warn!(title = %notice.title, "{}", notice.message),
            NoticeKind::Error => tracing::error!(title = %notice.title, "{}", notice.message),
        }
        self.ui.notice = Some(notice);
    }

    fn refresh_session_view(&mut self) {
        let records = self.session.all();
        let appended = records.len() > self.ui.reviews.texts.len();
        self.ui.reviews.texts = records.iter().map(|record| record.text.clone()).collect();
        self.ui.reviews.scroll_to_end = appended;
        if self.ui.chart.is_some() {
            let shares = chart::sentiment_distribution(records);
            self.ui.chart = (!shares.is_empty()).then(|| ChartState {
                slices: chart::pie_slices(&shares, DEFAULT_START_ANGLE_DEG),
            });
        }
    }

    fn remember_csv_dir(&mut self, path: &Path) {
        let Some(dir) = path.parent() else {
            return;
        };
        if self.config.last_csv_dir.as_deref() == Some(dir) {
            return;
        }
        self.config.last_csv_dir = Some(dir.to_path_buf());
        if let Err(err) = config::save(&self.config) {
            tracing::warn!("Failed to save config: {err}");
            self.set_status_message(StatusMessage::ConfigSaveFailed {
                err: err.to_string(),
            });
        }
    }
}
