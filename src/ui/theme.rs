use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::api::WorkType;

/// Font family for filled Phosphor icons
pub fn phosphor_fill_family() -> FontFamily {
    FontFamily::Name("phosphor-fill".into())
}

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor Regular icons as fallback in Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    // Filled icons get their own family; keep the default UI font as fallback
    fonts.font_data.insert(
        "phosphor-fill".into(),
        egui_phosphor::Variant::Fill.font_data(),
    );
    let mut fill_family = vec!["phosphor-fill".to_owned()];
    if let Some(proportional) = fonts.families.get(&FontFamily::Proportional) {
        fill_family.extend(proportional.iter().cloned());
    }
    fonts.families.insert(phosphor_fill_family(), fill_family);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();

    let bg = Color32::from_rgb(12, 12, 14);
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(22, 22, 26);
    visuals.extreme_bg_color = Color32::from_rgb(6, 6, 8);

    // Cool grays
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(38, 38, 44);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(170, 172, 180));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(50, 50, 58);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(196, 198, 206));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(72, 72, 82);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.active.bg_fill = accent();
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = accent();
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.hyperlink_color = accent();

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(20.0);

    ctx.set_style(style);
}

pub fn accent() -> Color32 {
    Color32::from_rgb(0x3b, 0x82, 0xf6)
}

pub fn error_color() -> Color32 {
    Color32::from_rgb(224, 108, 117)
}

pub fn success_color() -> Color32 {
    Color32::from_rgb(152, 195, 121)
}

pub fn work_type_color(work_type: WorkType) -> Color32 {
    let (r, g, b) = work_type.rgb();
    Color32::from_rgb(r, g, b)
}

/// Returns (grid_line, hour_label, row_label) colours for the timeline and week grid
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x34, 0x34, 0x3c),  // grid lines
        Color32::from_rgb(0x80, 0x80, 0x8c),  // hour labels
        Color32::from_rgb(0xd0, 0xd0, 0xd8),  // company names
    )
}

/// Returns (drop_highlight, today_bg, weekend_tint)
pub fn board_highlights() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgba_unmultiplied(0x3b, 0x82, 0xf6, 48),
        Color32::from_rgb(0x16, 0x1e, 0x2e),
        Color32::from_rgb(0x1a, 0x16, 0x16),
    )
}

pub fn now_line_color() -> Color32 {
    Color32::from_rgb(0xef, 0x44, 0x44)
}

/// Returns (bg_color, text_color) for button-like elements
pub fn button_colors() -> (Color32, Color32) {
    (
        Color32::from_rgb(50, 50, 58),
        Color32::from_rgb(196, 198, 206),
    )
}

/// Returns (content_bg, frame_color, frame_text) for dialogs
pub fn dialog_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(12, 12, 14),
        Color32::from_rgb(38, 38, 44),
        Color32::from_rgb(170, 172, 180),
    )
}

/// Translucent version of a colour, for the resting block while it is dragged
pub fn dimmed(color: Color32) -> Color32 {
    color.gamma_multiply(0.4)
}
