use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::egui_app::state::Emotion;

#[derive(Clone, Copy)]
pub struct Palette {
    pub card_fill: Color32,
    pub list_fill: Color32,
    pub status_fill: Color32,
    pub panel_outline: Color32,
    pub widget_fill: Color32,
    pub widget_hover: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
}

pub fn palette() -> Palette {
    Palette {
        card_fill: Color32::WHITE,
        list_fill: Color32::from_rgb(0xf9, 0xf9, 0xf9),
        status_fill: Color32::from_rgb(236, 240, 248),
        panel_outline: Color32::from_rgb(206, 212, 218),
        widget_fill: Color32::from_rgb(240, 240, 240),
        widget_hover: Color32::from_rgb(226, 230, 236),
        text_primary: Color32::from_rgb(33, 37, 41),
        text_muted: Color32::GRAY,
        accent: Color32::from_rgb(70, 120, 200),
        warning: Color32::from_rgb(192, 138, 43),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.card_fill;
    visuals.panel_fill = palette.card_fill;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.card_fill;
    visuals.faint_bg_color = palette.list_fill;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.card_fill;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette, palette.widget_fill);
    set_rectilinear(&mut visuals.widgets.hovered, palette, palette.widget_hover);
    set_rectilinear(&mut visuals.widgets.active, palette, palette.widget_hover);
    set_rectilinear(&mut visuals.widgets.open, palette, palette.widget_fill);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette, fill: Color32) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = fill;
    vis.weak_bg_fill = fill;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn section_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

/// Fill and text colour of one result label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelColors {
    pub fill: Color32,
    pub text: Color32,
}

pub fn sentiment_colors(negative: bool) -> LabelColors {
    if negative {
        LabelColors {
            fill: Color32::from_rgb(0xf8, 0xd7, 0xda),
            text: Color32::from_rgb(0x72, 0x1c, 0x24),
        }
    } else {
        LabelColors {
            fill: Color32::from_rgb(0xff, 0xee, 0xba),
            text: Color32::from_rgb(0x85, 0x64, 0x04),
        }
    }
}

pub fn emotion_colors(emotion: Emotion) -> LabelColors {
    match emotion {
        Emotion::Happy => LabelColors {
            fill: Color32::from_rgb(0xd4, 0xed, 0xda),
            text: Color32::from_rgb(0, 128, 0),
        },
        Emotion::Sad => LabelColors {
            fill: Color32::from_rgb(0xf8, 0xd7, 0xda),
            text: Color32::RED,
        },
    }
}

pub fn intent_colors() -> LabelColors {
    LabelColors {
        fill: Color32::from_rgb(0xd1, 0xec, 0xf1),
        text: Color32::BLUE,
    }
}

const PIE_COLORS: [Color32; 2] = [
    Color32::from_rgb(0xa8, 0xe6, 0xcf),
    Color32::from_rgb(0xff, 0x8b, 0x94),
];

/// Wedge colour; cycles when there are more labels than colours.
pub fn pie_color(index: usize) -> Color32 {
    PIE_COLORS[index % PIE_COLORS.len()]
}

/// Background colour at `t` (0 = top edge, 1 = bottom edge).
pub fn gradient_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    Color32::from_rgb(
        240 - (t * 100.0) as u8,
        240 - (t * 40.0) as u8,
        255,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn badge_label(self) -> &'static str {
        match self {
            StatusTone::Idle => "Idle",
            StatusTone::Busy => "Working",
            StatusTone::Info => "Info",
            StatusTone::Warning => "Warning",
            StatusTone::Error => "Error",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(160, 164, 170),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
