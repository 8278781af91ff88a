use crate::egui_app::ui::style::StatusTone;
use crate::session::Mode;

#[derive(Clone, Debug)]
pub(crate) enum StatusMessage {
    EmptyInput,
    ReviewRecorded {
        sentiment: String,
        intent: String,
    },
    CsvImported {
        file: String,
        count: usize,
    },
    CsvFailed {
        err: String,
    },
    ModeSwitched {
        mode: Mode,
    },
    NoChartData,
    ChartShown {
        total: usize,
    },
    SessionReset,
    ConfigSaveFailed {
        err: String,
    },
    Custom {
        text: String,
        tone: StatusTone,
    },
}

impl StatusMessage {
    pub(crate) fn custom(text: impl Into<String>, tone: StatusTone) -> Self {
        Self::Custom {
            text: text.into(),
            tone,
        }
    }

    pub(crate) fn into_text_and_tone(self) -> (String, StatusTone) {
        match self {
            StatusMessage::EmptyInput => ("Please enter a sentence.".into(), StatusTone::Warning),
            StatusMessage::ReviewRecorded { sentiment, intent } => (
                format!("Recorded review: {sentiment}, {intent}"),
                StatusTone::Info,
            ),
            StatusMessage::CsvImported { file, count } => (
                format!("Analyzed {count} reviews from {file}"),
                StatusTone::Info,
            ),
            StatusMessage::CsvFailed { err } => {
                (format!("CSV import failed: {err}"), StatusTone::Error)
            }
            StatusMessage::ModeSwitched { mode } => {
                (format!("Switched to {} mode", mode.label()), StatusTone::Info)
            }
            StatusMessage::NoChartData => ("No data to chart".into(), StatusTone::Info),
            StatusMessage::ChartShown { total } => (
                format!("Sentiment distribution of {total} reviews"),
                StatusTone::Info,
            ),
            StatusMessage::SessionReset => ("All reviews cleared".into(), StatusTone::Idle),
            StatusMessage::ConfigSaveFailed { err } => {
                (format!("Could not save settings: {err}"), StatusTone::Warning)
            }
            StatusMessage::Custom { text, tone } => (text, tone),
        }
    }
}
