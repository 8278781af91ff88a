use super::EguiApp;
use super::overlay_layers::{OverlayLayer, modal_backdrop};
use super::style;
use crate::egui_app::state::{Notice, NoticeKind};
use eframe::egui::{self, Align2, Color32, RichText};

impl EguiApp {
    /// Blocking notice with a single OK button.
    ///
    /// Enter and Escape dismiss it too, but only once it has been visible for a
    /// frame so the key that raised it does not close it.
    pub(super) fn render_notice(&mut self, ctx: &egui::Context, accept_keys: bool) {
        let Some(notice) = self.controller.ui.notice.clone() else {
            return;
        };
        modal_backdrop(
            ctx,
            egui::Id::new("notice_backdrop"),
            Color32::from_rgba_premultiplied(0, 0, 0, 90),
        );
        let mut dismiss = accept_keys
            && ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("notice_window"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .show(ctx, |ui| {
                dismiss |= render_notice_body(ui, &notice);
            });
        if dismiss {
            self.controller.dismiss_notice();
        }
    }
}

fn render_notice_body(ui: &mut egui::Ui, notice: &Notice) -> bool {
    let palette = style::palette();
    ui.set_min_width(280.0);
    ui.horizontal(|ui| {
        let (glyph, color) = notice_glyph(notice.kind);
        ui.label(RichText::new(glyph).color(color).strong().size(18.0));
        ui.add_space(6.0);
        ui.label(RichText::new(&notice.message).color(palette.text_primary));
    });
    ui.add_space(10.0);
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.add(egui::Button::new("OK").min_size(egui::vec2(64.0, 0.0)))
            .clicked()
    })
    .inner
}

fn notice_glyph(kind: NoticeKind) -> (&'static str, Color32) {
    match kind {
        NoticeKind::Info => ("i", style::status_badge_color(style::StatusTone::Info)),
        NoticeKind::Warning => ("!", style::status_badge_color(style::StatusTone::Warning)),
        NoticeKind::Error => ("x", style::status_badge_color(style::StatusTone::Error)),
    }
}
