//! Screen rendering (Home, Points)

use super::home::HomeScreen;
use super::points::PointsScreen;
use crate::theme;
use crate::ui::components::{catalog_status, picker, primary_button};
use crate::utils::selected_label;
use eframe::egui;
use egui_phosphor::regular as icons;

const TITLE: &str = "Seu marketplace de coleta de resíduos";
const DESCRIPTION: &str = "Ajudamos pessoas a encontrarem pontos de coleta de forma eficiente.";

fn heading(ui: &mut egui::Ui, title: &str, body: &str) {
    ui.set_max_width(theme::TEXT_MAX_WIDTH);
    ui.label(
        egui::RichText::new(title)
            .size(theme::FONT_TITLE)
            .strong()
            .color(theme::TEXT_TITLE),
    );
    ui.add_space(theme::SPACING_XL);
    ui.label(
        egui::RichText::new(body)
            .size(theme::FONT_BODY)
            .color(theme::TEXT_BODY),
    );
}

impl HomeScreen {
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let footer_height = theme::CONTROL_HEIGHT * 3.0 + 120.0;

        ui.vertical(|ui| {
            ui.set_max_width(theme::CONTENT_MAX_WIDTH);

            // Main: title block, vertically centered in the space above the footer
            let main_height = (ui.available_height() - footer_height).max(0.0);
            ui.allocate_ui(egui::vec2(ui.available_width(), main_height), |ui| {
                ui.add_space((main_height / 2.0 - 120.0).max(0.0));
                ui.label(
                    egui::RichText::new(format!("{} Ecoleta", icons::RECYCLE))
                        .size(theme::FONT_BODY * 1.5)
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.add_space(theme::SPACING_XL);
                heading(ui, TITLE, DESCRIPTION);
            });

            // Footer: pickers + enter button
            let regions = self.regions().clone();
            let region = self.selection().region().clone();
            if let Some(picked) = picker(
                ui,
                "uf_picker",
                "Selecione um estado",
                &region,
                region.is_unset(),
                regions.items(),
            ) {
                self.select_region(picked);
            }
            if catalog_status(ui, &regions, "Nenhum estado disponível") {
                self.retry_regions();
            }
            ui.add_space(theme::SPACING_MD);

            let cities = if self.localities_current() {
                self.localities().catalog.clone()
            } else {
                Default::default()
            };
            let city = self.selection().locality().clone();
            if let Some(picked) = picker(
                ui,
                "city_picker",
                "Selecione uma cidade",
                &city,
                city.is_unset(),
                cities.items(),
            ) {
                self.select_locality(picked);
            }
            if catalog_status(ui, &cities, "Nenhuma cidade encontrada") {
                self.retry_localities();
            }
            ui.add_space(theme::SPACING_MD);

            if primary_button(ui, icons::ARROW_RIGHT, "Entrar").clicked() {
                self.submit();
            }
        });
    }
}

impl PointsScreen {
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.set_max_width(theme::CONTENT_MAX_WIDTH);
            if ui
                .add(theme::button(format!("{}  Voltar", icons::ARROW_LEFT)))
                .clicked()
            {
                self.back();
            }
            ui.add_space(theme::SPACING_XL * 2.0);

            let uf = selected_label(self.uf.as_str(), self.uf.is_unset(), "Nenhum estado");
            let city = selected_label(self.city.as_str(), self.city.is_unset(), "Nenhuma cidade");
            heading(
                ui,
                &format!("{} {}", icons::MAP_PIN, city),
                &format!("Pontos de coleta em {} - {}", city, uf),
            );
        });
    }
}
