use crate::TrilhasApp;
use crate::ui::helpers::{EMERALD_DARK, big_list_button};
use crate::ui::layout::centered_panel;
use egui::{Align, Context, Layout, RichText};

pub fn ui_welcome(app: &mut TrilhasApp, ctx: &Context) {
    centered_panel(ctx, 260.0, 480.0, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.label(RichText::new("🥾").size(48.0));
            ui.label(
                RichText::new("Bem-vindo(a) ao Trilhas de Minas!")
                    .heading()
                    .strong()
                    .color(EMERALD_DARK),
            );
            ui.add_space(8.0);
            ui.label("Explore os parques estaduais de Minas Gerais, escaneie os QR Codes nas trilhas e colecione badges exclusivos.");
            ui.add_space(18.0);

            let btn_w = (ui.available_width() * 0.9).clamp(120.0, 360.0);
            if big_list_button(ui, "Começar a Explorar", btn_w, 40.0, true) {
                app.finish_welcome();
            }
        });
    });
}
