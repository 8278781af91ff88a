use super::style::{self, LabelColors};
use super::{EmotionTextures, pie_chart};
use crate::egui_app::state::{Emotion, ResultView, UiState};
use crate::session::Mode;
use crate::startup::ICON_SIZE;
use eframe::egui::{self, Frame, Margin, RichText, load::SizedTexture};

const HEADING: &str = "Sentiment Analysis of Product Review";
const ENTRY_WIDTH: f32 = 420.0;
const REVIEW_LIST_HEIGHT: f32 = 96.0;

/// User intent collected while drawing; applied after the frame's borrows end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PanelAction {
    Analyze,
    UploadCsv,
    ShowChart,
    ResetAll,
    SetMode(Mode),
}

/// Centered white card holding every control of the window.
pub(super) fn render(
    ui: &mut egui::Ui,
    state: &mut UiState,
    textures: Option<&EmotionTextures>,
) -> Option<PanelAction> {
    let palette = style::palette();
    let mut action = None;
    egui::ScrollArea::vertical()
        .id_salt("review_card_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                Frame::new()
                    .fill(palette.card_fill)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::same(20))
                    .show(ui, |ui| {
                        ui.set_max_width(560.0);
                        ui.vertical_centered(|ui| {
                            action = render_card(ui, state, textures);
                        });
                    });
            });
        });
    action
}

fn render_card(
    ui: &mut egui::Ui,
    state: &mut UiState,
    textures: Option<&EmotionTextures>,
) -> Option<PanelAction> {
    let palette = style::palette();
    let mut action = None;
    ui.label(RichText::new(HEADING).size(16.0).strong());
    ui.add_space(6.0);
    if let Some(mode) = render_mode_toggle(ui, state.mode) {
        action = Some(PanelAction::SetMode(mode));
    }
    ui.add_space(6.0);
    ui.label(RichText::new("Enter text:").size(12.0));
    let entry = ui.add(
        egui::TextEdit::singleline(&mut state.entry.text)
            .id_salt("review_entry")
            .desired_width(ENTRY_WIDTH)
            .hint_text("Type a product review"),
    );
    if std::mem::take(&mut state.entry.focus_requested) {
        entry.request_focus();
    }
    if entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        action = Some(PanelAction::Analyze);
    }
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        centered_row(ui, 3.0 * 110.0);
        if ui.add_sized([100.0, 24.0], egui::Button::new("Analyze")).clicked() {
            action = Some(PanelAction::Analyze);
        }
        if ui.add_sized([100.0, 24.0], egui::Button::new("Upload CSV")).clicked() {
            action = Some(PanelAction::UploadCsv);
        }
        if ui.add_sized([100.0, 24.0], egui::Button::new("Reset All")).clicked() {
            action = Some(PanelAction::ResetAll);
        }
    });
    ui.add_space(10.0);
    if let Some(result) = &state.result {
        render_result(ui, result, textures);
    }
    ui.add_space(6.0);
    ui.label(
        RichText::new(state.reviews.count_text())
            .size(11.0)
            .color(palette.text_muted),
    );
    ui.add_space(8.0);
    ui.label(RichText::new("Stored Reviews:").size(12.0).strong());
    render_review_list(ui, state);
    ui.add_space(10.0);
    if ui.button("Show Sentiment Pie Chart").clicked() {
        action = Some(PanelAction::ShowChart);
    }
    if let Some(chart) = &state.chart {
        ui.add_space(10.0);
        pie_chart::render(ui, chart);
    }
    action
}

fn render_mode_toggle(ui: &mut egui::Ui, current: Mode) -> Option<Mode> {
    let mut selected = current;
    ui.horizontal(|ui| {
        centered_row(ui, 200.0);
        ui.label("Mode:");
        for mode in [Mode::Manual, Mode::Csv] {
            ui.selectable_value(&mut selected, mode, mode.label());
        }
    });
    (selected != current).then_some(selected)
}

fn render_result(ui: &mut egui::Ui, result: &ResultView, textures: Option<&EmotionTextures>) {
    colored_label(
        ui,
        result.sentiment_text(),
        style::sentiment_colors(result.negative),
    );
    colored_label(ui, result.emotion_text(), style::emotion_colors(result.emotion));
    colored_label(ui, result.intent_text(), style::intent_colors());
    if let Some(textures) = textures {
        let handle = match result.emotion {
            Emotion::Happy => &textures.happy,
            Emotion::Sad => &textures.sad,
        };
        let size = egui::vec2(ICON_SIZE as f32, ICON_SIZE as f32);
        ui.add_space(4.0);
        ui.add(egui::Image::from_texture(SizedTexture::new(handle.id(), size)));
    }
}

fn colored_label(ui: &mut egui::Ui, text: String, colors: LabelColors) {
    Frame::new()
        .fill(colors.fill)
        .inner_margin(Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.set_min_width(ENTRY_WIDTH);
            ui.label(RichText::new(text).size(12.0).strong().color(colors.text));
        });
    ui.add_space(4.0);
}

fn render_review_list(ui: &mut egui::Ui, state: &mut UiState) {
    let palette = style::palette();
    let scroll_to_end = std::mem::take(&mut state.reviews.scroll_to_end);
    Frame::new()
        .fill(palette.list_fill)
        .stroke(style::section_stroke())
        .inner_margin(Margin::symmetric(6, 4))
        .show(ui, |ui| {
            ui.set_width(ENTRY_WIDTH);
            egui::ScrollArea::vertical()
                .id_salt("stored_reviews")
                .max_height(REVIEW_LIST_HEIGHT)
                .auto_shrink([false, true])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        for text in &state.reviews.texts {
                            ui.add(egui::Label::new(RichText::new(text).size(10.0)).wrap());
                        }
                    });
                    if scroll_to_end {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
        });
}

/// Pad a horizontal row so `content_width` ends up centered.
fn centered_row(ui: &mut egui::Ui, content_width: f32) {
    let pad = ((ui.available_width() - content_width) * 0.5).max(0.0);
    ui.add_space(pad);
}
