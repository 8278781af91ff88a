//! Painter-based pie chart for [`ChartState`].

use super::style;
use crate::chart::PieSlice;
use crate::egui_app::state::ChartState;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, epaint::Mesh, pos2, vec2};

const CHART_SIZE: egui::Vec2 = vec2(400.0, 200.0);
/// Largest angle covered by one triangle of a wedge.
const ARC_STEP_DEG: f32 = 4.0;
/// Radius fraction where the percentage text is placed.
const PERCENT_RADIUS: f32 = 0.6;
/// Radius fraction where the category label is placed.
const LABEL_RADIUS: f32 = 1.15;

pub(super) fn render(ui: &mut egui::Ui, chart: &ChartState) {
    let (rect, _) = ui.allocate_exact_size(CHART_SIZE, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    let center = rect.center();
    let radius = rect.height() * 0.5 - 24.0;
    let palette = style::palette();

    for (idx, slice) in chart.slices.iter().enumerate() {
        painter.add(egui::Shape::mesh(wedge_mesh(
            center,
            radius,
            slice,
            style::pie_color(idx),
        )));
    }
    // Wedge borders only make sense when there is more than one wedge.
    if chart.slices.len() > 1 {
        for slice in &chart.slices {
            painter.line_segment(
                [center, polar(center, radius, slice.start_deg)],
                Stroke::new(1.0, Color32::WHITE),
            );
        }
    }
    for slice in &chart.slices {
        let mid = slice.mid_deg();
        painter.text(
            polar(center, radius * PERCENT_RADIUS, mid),
            Align2::CENTER_CENTER,
            slice.share.percent_label(),
            FontId::proportional(12.0),
            palette.text_primary,
        );
        painter.text(
            polar(center, radius * LABEL_RADIUS, mid),
            label_anchor(mid),
            &slice.share.label,
            FontId::proportional(13.0),
            palette.text_primary,
        );
    }
}

/// Point at `deg` degrees counter-clockwise from +x, in screen space (y grows down).
pub(super) fn polar(center: Pos2, radius: f32, deg: f32) -> Pos2 {
    let rad = deg.to_radians();
    pos2(center.x + radius * rad.cos(), center.y - radius * rad.sin())
}

/// Rim points of a wedge from its start edge to its end edge.
pub(super) fn arc_points(center: Pos2, radius: f32, slice: &PieSlice) -> Vec<Pos2> {
    let steps = (slice.sweep_deg / ARC_STEP_DEG).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|step| {
            let deg = slice.start_deg + slice.sweep_deg * step as f32 / steps as f32;
            polar(center, radius, deg)
        })
        .collect()
}

/// Triangle fan around `center`; works for wedges wider than 180 degrees.
fn wedge_mesh(center: Pos2, radius: f32, slice: &PieSlice, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for point in arc_points(center, radius, slice) {
        mesh.colored_vertex(point, color);
    }
    let rim = mesh.vertices.len() as u32;
    for idx in 1..rim.saturating_sub(1) {
        mesh.add_triangle(0, idx, idx + 1);
    }
    mesh
}

fn label_anchor(deg: f32) -> Align2 {
    let x = deg.to_radians().cos();
    if x > 0.2 {
        Align2::LEFT_CENTER
    } else if x < -0.2 {
        Align2::RIGHT_CENTER
    } else {
        Align2::CENTER_CENTER
    }
}
