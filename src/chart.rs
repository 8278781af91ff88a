//! Sentiment distribution and pie wedge layout.
//!
//! Pure data; drawing lives in `egui_app::ui::pie_chart`.

use crate::record::ReviewRecord;

/// Angle of the first wedge edge, in degrees counter-clockwise from the +x axis.
pub const DEFAULT_START_ANGLE_DEG: f32 = 140.0;

/// Share of one sentiment label in a set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentShare {
    /// Display label (capitalized model label).
    pub label: String,
    pub count: usize,
    /// `count / total`, in `0.0..=1.0`.
    pub fraction: f32,
}

impl SentimentShare {
    /// Percentage annotation, one decimal place.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub share: SentimentShare,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl PieSlice {
    pub fn mid_deg(&self) -> f32 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

/// Group records by display label in first-seen order.
pub fn sentiment_distribution(records: &[ReviewRecord]) -> Vec<SentimentShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let label = record.sentiment.display_label();
        match counts.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    let total = records.len().max(1) as f32;
    counts
        .into_iter()
        .map(|(label, count)| SentimentShare {
            label,
            count,
            fraction: count as f32 / total,
        })
        .collect()
}

/// Lay out wedges counter-clockwise starting at `start_deg`.
pub fn pie_slices(shares: &[SentimentShare], start_deg: f32) -> Vec<PieSlice> {
    let mut cursor = start_deg;
    shares
        .iter()
        .map(|share| {
            let sweep_deg = share.fraction * 360.0;
            let slice = PieSlice {
                share: share.clone(),
                start_deg: cursor,
                sweep_deg,
            };
            cursor += sweep_deg;
            slice
        })
        .collect()
}
