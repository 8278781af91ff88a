//! egui renderer for the review window.

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::egui_app::controller::ReviewController;
use crate::startup::{EmotionImages, StartupArtifacts};
use eframe::egui::{self, ColorImage, Frame, Margin, TextureHandle, TextureOptions, epaint::Mesh};
use image::RgbaImage;

mod notice;
mod overlay_layers;
mod pie_chart;
mod review_panel;
mod status_bar;
pub mod style;

use review_panel::PanelAction;
use style::StatusTone;

/// Window title shown by the OS.
pub const WINDOW_TITLE: &str = "Sentiment Analysis";
pub const DEFAULT_VIEWPORT_SIZE: [f32; 2] = [900.0, 700.0];
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [600.0, 600.0];

/// GPU copies of the emotion icons.
pub(super) struct EmotionTextures {
    happy: TextureHandle,
    sad: TextureHandle,
}

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: ReviewController,
    icons: EmotionImages,
    icon_textures: Option<EmotionTextures>,
    visuals_set: bool,
}

impl EguiApp {
    /// Wrap the already loaded model and icons; nothing here can fail.
    pub fn new(artifacts: StartupArtifacts, config: AppConfig) -> Self {
        let StartupArtifacts { predictor, icons } = artifacts;
        Self {
            controller: ReviewController::new(predictor, config),
            icons,
            icon_textures: None,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn ensure_icon_textures(&mut self, ctx: &egui::Context) {
        if self.icon_textures.is_some() {
            return;
        }
        let load = |name: &str, image: &RgbaImage| {
            ctx.load_texture(name, color_image(image), TextureOptions::LINEAR)
        };
        self.icon_textures = Some(EmotionTextures {
            happy: load("emotion_happy", &self.icons.happy),
            sad: load("emotion_sad", &self.icons.sad),
        });
    }

    fn apply_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Analyze => self.controller.analyze_entry(),
            PanelAction::UploadCsv => self.controller.upload_csv_via_dialog(),
            PanelAction::ShowChart => self.controller.show_pie_chart(),
            PanelAction::ResetAll => self.controller.reset_all(),
            PanelAction::SetMode(mode) => self.controller.set_mode(mode),
        }
    }

    /// Dropping a `.csv` file on the window behaves like Upload CSV.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        let Some(path) = dropped.into_iter().next() else {
            return;
        };
        if is_csv_path(&path) {
            self.controller.load_csv_from_path(&path);
        } else {
            self.controller.set_status(
                format!("Not a CSV file: {}", path.display()),
                StatusTone::Warning,
            );
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.ensure_icon_textures(ctx);
        let notice_open = self.controller.ui.notice.is_some();
        self.render_status(ctx);
        let mut action = None;
        egui::CentralPanel::default()
            .frame(Frame::new())
            .show(ctx, |ui| {
                paint_gradient(ui.painter(), ui.max_rect());
                Frame::new()
                    .inner_margin(Margin::same(16))
                    .show(ui, |ui| {
                        action = review_panel::render(
                            ui,
                            &mut self.controller.ui,
                            self.icon_textures.as_ref(),
                        );
                    });
            });
        if !notice_open {
            if let Some(action) = action {
                self.apply_action(action);
            }
            self.handle_dropped_files(ctx);
        }
        self.render_notice(ctx, notice_open);
    }
}

fn color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

fn is_csv_path(path: &std::path::Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Vertical background gradient; colour is linear in y so one quad is exact.
fn paint_gradient(painter: &egui::Painter, rect: egui::Rect) {
    let top = style::gradient_color(0.0);
    let bottom = style::gradient_color(1.0);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(2, 1, 3);
    painter.add(egui::Shape::mesh(mesh));
}
