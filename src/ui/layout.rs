use crate::TrilhasApp;
use crate::config::APP_NAME;
use crate::model::Page;
use egui::{Align, Button, CentralPanel, Context, Frame, Layout, RichText, ScrollArea, Ui, Visuals};

/// Cabeçalho fixo: voltar (ou início), título e perfil.
pub fn top_panel(app: &mut TrilhasApp, ctx: &Context) {
    egui::TopBottomPanel::top("header_panel")
        .exact_height(48.0)
        .show(ctx, |ui| {
            ui.columns(3, |cols| {
                cols[0].with_layout(Layout::left_to_right(Align::Center), |ui| {
                    if app.navigator.show_back() {
                        if ui.button("⬅ Voltar").clicked() {
                            app.go_back();
                        }
                    } else if ui.button("🏠 Início").clicked() {
                        app.go_to(Page::Parks);
                    }
                });
                cols[1].with_layout(Layout::centered_and_justified(egui::Direction::LeftToRight), |ui| {
                    ui.label(RichText::new(APP_NAME).heading().strong());
                });
                cols[2].with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("👤 Perfil").clicked() {
                        app.go_to(Page::Profile);
                    }
                    if ui.button("🏅 Badges").clicked() {
                        app.go_to(Page::Badges);
                    }
                });
            });
        });
}

pub fn bottom_panel(ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTÕES DE TEMA -----------
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("🌙 Modo escuro").clicked() {
                ctx.set_visuals(Visuals::dark());
            }
            if ui.button("☀ Modo claro").clicked() {
                ctx.set_visuals(Visuals::light());
            }
        });
    });
}

/// Conteúdo centralizado na tela, com largura máxima.
pub fn centered_panel(ctx: &Context, est_height: f32, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
    });
}

/// Página rolável com largura máxima, usada pelas páginas de conteúdo.
pub fn scroll_page(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                let w = ui.available_width().min(max_width);
                ui.set_max_width(w);
                ui.with_layout(Layout::top_down(Align::Min), inner);
            });
        });
    });
}

/// Dois botões de mesma largura lado a lado. Sem `right_label`, o da
/// esquerda ocupa a linha toda.
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    left_label: &str,
    right_label: Option<&str>,
) -> (bool, bool) {
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        match right_label {
            Some(right) => {
                let btn_w = (panel_width - 8.0) / 2.0;
                clicked_left = ui.add_sized([btn_w, 36.0], Button::new(left_label)).clicked();
                clicked_right = ui.add_sized([btn_w, 36.0], Button::new(right)).clicked();
            }
            None => {
                clicked_left = ui.add_sized([panel_width, 36.0], Button::new(left_label)).clicked();
            }
        }
    });
    (clicked_left, clicked_right)
}
