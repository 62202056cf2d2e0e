//! Reusable UI components
//!
//! Standalone widgets shared by the screens.

use crate::theme;
use crate::types::Catalog;
use crate::utils::selected_label;
use eframe::egui;

/// Dropdown over `options`. Returns the option the user clicked this frame, if any.
pub fn picker<T>(
    ui: &mut egui::Ui,
    id_salt: &str,
    placeholder: &str,
    current: &T,
    current_unset: bool,
    options: &[T],
) -> Option<T>
where
    T: AsRef<str> + PartialEq + Clone,
{
    let text = selected_label(current.as_ref(), current_unset, placeholder);
    let color = if current_unset { theme::TEXT_BODY } else { theme::TEXT_TITLE };
    let mut picked = None;

    ui.scope(|ui| {
        ui.spacing_mut().interact_size.y = theme::CONTROL_HEIGHT;
        ui.spacing_mut().button_padding = egui::vec2(24.0, 6.0);
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(egui::RichText::new(text).size(theme::FONT_BODY).color(color))
            .width(ui.available_width())
            .height(theme::PICKER_POPUP_HEIGHT)
            .icon(paint_caret)
            .show_ui(ui, |ui| {
                for option in options {
                    let response = ui.selectable_label(option == current, option.as_ref());
                    if response.clicked() {
                        picked = Some(option.clone());
                    }
                }
            });
    });

    picked
}

fn caret_icon(is_open: bool) -> &'static str {
    if is_open {
        egui_phosphor::regular::CARET_UP
    } else {
        egui_phosphor::regular::CARET_DOWN
    }
}

fn paint_caret(
    ui: &egui::Ui,
    rect: egui::Rect,
    _visuals: &egui::style::WidgetVisuals,
    is_open: bool,
    _side: egui::AboveOrBelow,
) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        caret_icon(is_open),
        egui::FontId::proportional(20.0),
        theme::TEXT_BODY,
    );
}

/// Large green call-to-action with an icon well on the left
pub fn primary_button(ui: &mut egui::Ui, icon: &str, label: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), theme::CONTROL_HEIGHT),
        egui::Sense::click(),
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let (fill, draw_rect) = theme::button_visual(&response, theme::ACCENT, rect);
        painter.rect_filled(draw_rect, theme::RADIUS_CONTROL, fill);

        let radius = theme::RADIUS_CONTROL as u8;
        let icon_rect = egui::Rect::from_min_size(
            draw_rect.min,
            egui::vec2(theme::CONTROL_HEIGHT, draw_rect.height()),
        );
        painter.rect_filled(
            icon_rect,
            egui::CornerRadius { nw: radius, sw: radius, ne: 0, se: 0 },
            theme::ACCENT_SHADE,
        );
        painter.text(
            icon_rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(24.0),
            theme::TEXT_ON_ACCENT,
        );

        let text_rect = egui::Rect::from_min_max(
            egui::pos2(icon_rect.max.x, draw_rect.min.y),
            draw_rect.max,
        );
        painter.text(
            text_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_ON_ACCENT,
        );
    }
    response
}

/// Loading / error line under a picker. Returns true if retry was clicked.
pub fn catalog_status<T>(ui: &mut egui::Ui, catalog: &Catalog<T>, empty_hint: &str) -> bool {
    if let Some(msg) = catalog.error() {
        return ui
            .horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}  {}", egui_phosphor::regular::WARNING_CIRCLE, msg))
                        .size(theme::FONT_LABEL)
                        .color(theme::STATUS_ERROR),
                );
                ui.add(theme::button("Tentar novamente")).clicked()
            })
            .inner;
    }

    match catalog {
        Catalog::Loading => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
                ui.label(
                    egui::RichText::new("Carregando...")
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_BODY),
                );
            });
            false
        }
        Catalog::Ready(items) if items.is_empty() => {
            ui.label(
                egui::RichText::new(empty_hint)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_BODY),
            );
            false
        }
        _ => false,
    }
}
