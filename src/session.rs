//! In-memory session of analyzed reviews.
//!
//! Two independent lists are kept, one per input [`Mode`]. Only the list of
//! the active mode is visible; `count` and `all` always refer to it. Leaving a
//! mode discards that mode's list, so at most one list is ever non-empty.

use crate::record::ReviewRecord;

/// Which input source owns the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Manual,
    Csv,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Manual => "Manual",
            Mode::Csv => "CSV",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: Mode,
    manual: Vec<ReviewRecord>,
    csv: Vec<ReviewRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Append to the active list.
    pub fn record(&mut self, entry: ReviewRecord) {
        self.active_mut().push(entry);
    }

    /// Append many records to the active list, keeping their order.
    pub fn record_all(&mut self, entries: impl IntoIterator<Item = ReviewRecord>) {
        self.active_mut().extend(entries);
    }

    /// Empty the active list.
    pub fn clear(&mut self) {
        self.active_mut().clear();
    }

    /// Empty both lists. The mode is left unchanged.
    pub fn reset(&mut self) {
        self.manual.clear();
        self.csv.clear();
    }

    pub fn count(&self) -> usize {
        self.all().len()
    }

    pub fn all(&self) -> &[ReviewRecord] {
        match self.mode {
            Mode::Manual => &self.manual,
            Mode::Csv => &self.csv,
        }
    }

    /// Activate `new_mode`, discarding the list of the mode being left.
    ///
    /// Returns `true` when the mode actually changed.
    pub fn switch_mode(&mut self, new_mode: Mode) -> bool {
        if self.mode == new_mode {
            return false;
        }
        let discarded = self.count();
        self.clear();
        self.mode = new_mode;
        tracing::debug!(
            mode = new_mode.label(),
            discarded,
            "Switched session mode"
        );
        true
    }

    fn active_mut(&mut self) -> &mut Vec<ReviewRecord> {
        match self.mode {
            Mode::Manual => &mut self.manual,
            Mode::Csv => &mut self.csv,
        }
    }
}
