//! Shared state types for the egui UI.

use crate::chart::PieSlice;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::intent::Intent;
use crate::record::ReviewRecord;
use crate::session::Mode;
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub entry: EntryState,
    /// Labels for the most recent manual analysis.
    pub result: Option<ResultView>,
    pub reviews: ReviewListState,
    /// Present once the user asked for the chart and there is data to show.
    pub chart: Option<ChartState>,
    /// Blocking notice; the rest of the window ignores input while set.
    pub notice: Option<Notice>,
    pub mode: Mode,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            entry: EntryState::default(),
            result: None,
            reviews: ReviewListState::default(),
            chart: None,
            notice: None,
            mode: Mode::default(),
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::new("Enter a review or upload a CSV file", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            badge_label: tone.badge_label().into(),
            badge_color: style::status_badge_color(tone),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EntryState {
    pub text: String,
    pub focus_requested: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emotion {
    Happy,
    Sad,
}

impl Emotion {
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
        }
    }
}

/// Render-ready labels for one analyzed review.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub sentiment: String,
    pub negative: bool,
    pub emotion: Emotion,
    pub intent: Intent,
}

impl ResultView {
    pub fn from_record(record: &ReviewRecord) -> Self {
        Self {
            sentiment: record.sentiment.display_label(),
            negative: record.sentiment.label().eq_ignore_ascii_case("negative"),
            emotion: if record.sentiment.is_positive() {
                Emotion::Happy
            } else {
                Emotion::Sad
            },
            intent: record.intent,
        }
    }

    pub fn sentiment_text(&self) -> String {
        format!("Sentiment: {}", self.sentiment)
    }

    pub fn emotion_text(&self) -> String {
        format!("Emotion: {}", self.emotion.label())
    }

    pub fn intent_text(&self) -> String {
        format!("Intent: {}", self.intent)
    }
}

/// Stored reviews of the active session list.
#[derive(Clone, Debug, Default)]
pub struct ReviewListState {
    pub texts: Vec<String>,
    /// Set when rows were appended so the list scrolls to the newest entry.
    pub scroll_to_end: bool,
}

impl ReviewListState {
    pub fn count_text(&self) -> String {
        format!("Reviews stored: {}", self.texts.len())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartState {
    pub slices: Vec<PieSlice>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Modal message dismissed with OK.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}
