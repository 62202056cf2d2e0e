//! Centralized theme constants for Ecoleta Picker
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0xf0, 0xf0, 0xf5); // page background
pub const BG_INPUT: Color32 = Color32::WHITE; // pickers
pub const BG_HOVER: Color32 = Color32::from_rgb(0xe1, 0xfa, 0xec); // light green hover

// =============================================================================
// COLORS - Accent (Green)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x34, 0xcb, 0x79);
pub const ACCENT_SHADE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 0x1a); // icon well on buttons

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_TITLE: Color32 = Color32::from_rgb(0x32, 0x21, 0x53); // deep purple
pub const TEXT_BODY: Color32 = Color32::from_rgb(0x6c, 0x6c, 0x80);
pub const TEXT_ON_ACCENT: Color32 = Color32::WHITE;

// =============================================================================
// COLORS - Borders / Status
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0xe6, 0xe6, 0xf0);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xe5, 0x48, 0x4d);

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 32.0;
pub const FONT_BODY: f32 = 16.0;
pub const FONT_LABEL: f32 = 13.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const PAGE_PADDING: f32 = 32.0;
pub const CONTENT_MAX_WIDTH: f32 = 360.0;
pub const TEXT_MAX_WIDTH: f32 = 260.0;
pub const CONTROL_HEIGHT: f32 = 60.0;
pub const PICKER_POPUP_HEIGHT: f32 = 320.0;
pub const RADIUS_CONTROL: f32 = 10.0;
pub const STROKE_DEFAULT: f32 = 1.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_INPUT;
    visuals.extreme_bg_color = BG_INPUT;
    visuals.hyperlink_color = ACCENT;
    visuals.selection = egui::style::Selection {
        bg_fill: BG_HOVER,
        stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_TITLE),
    };
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    visuals.window_corner_radius = egui::CornerRadius::same(RADIUS_CONTROL as u8);
    visuals.menu_corner_radius = egui::CornerRadius::same(RADIUS_CONTROL as u8);
    visuals.window_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.corner_radius = egui::CornerRadius::same(RADIUS_CONTROL as u8);
        widget.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, TEXT_BODY);
    }
    visuals.widgets.inactive.weak_bg_fill = BG_INPUT;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, ACCENT);
    visuals.widgets.active.weak_bg_fill = BG_HOVER;
    visuals.widgets.open.weak_bg_fill = BG_INPUT;

    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(24.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn page_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_BASE)
        .inner_margin(PAGE_PADDING)
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Plain secondary button (retry, back)
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_TITLE))
        .fill(BG_INPUT)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_CONTROL)
}

/// Returns (fill, draw_rect) for a custom-painted button with hover/press effects.
/// Darkens on hover, darkens more + shrinks on press.
pub fn button_visual(
    response: &egui::Response,
    base_fill: Color32,
    rect: egui::Rect,
) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (darken(base_fill, 0.16), rect.shrink(1.5))
    } else if response.hovered() {
        (darken(base_fill, 0.08), rect)
    } else {
        (base_fill, rect)
    }
}

fn darken(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 * (1.0 - amount)) as u8;
    let g = (c.g() as f32 * (1.0 - amount)) as u8;
    let b = (c.b() as f32 * (1.0 - amount)) as u8;
    Color32::from_rgb(r, g, b)
}
