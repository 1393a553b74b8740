use crate::TrilhasApp;
use crate::catalog::BadgeFilter;
use crate::ui::helpers::{EMERALD, EMERALD_DARK, filter_chip};
use crate::ui::layout::scroll_page;
use crate::ui::views::stamper::ui_stamper;
use egui::{Align, Context, Layout, RichText, Sense, Ui, Vec2};

pub fn ui_badges(app: &mut TrilhasApp, ctx: &Context) {
    scroll_page(ctx, 720.0, |ui| {
        if app.stamper.is_some() {
            badge_detail(app, ui);
        } else {
            badge_grid(app, ui);
        }
    });
}

fn badge_grid(app: &mut TrilhasApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Meus Badges").heading().strong());
        ui.label("Escaneie o QR e libere a conquista!");
        ui.add_space(6.0);
        if ui.button("📷 Escanear QR Code").clicked() {
            app.start_scan();
        }
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        for filter in BadgeFilter::ALL {
            if filter_chip(ui, filter.label(), app.badge_filter == filter) {
                app.badge_filter = filter;
            }
        }
    });
    ui.add_space(10.0);

    let cards = app.badge_cards();
    let cols = if ui.available_width() > 520.0 { 4 } else { 2 };
    let cell_w = (ui.available_width() - 8.0 * (cols as f32 - 1.0)) / cols as f32;
    let mut selected: Option<String> = None;

    egui::Grid::new("badges_grid")
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (i, card) in cards.iter().enumerate() {
                let fill = if card.collected {
                    ui.visuals().window_fill()
                } else {
                    ui.visuals().faint_bg_color
                };
                let response = egui::Frame::default()
                    .fill(fill)
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_min_size(Vec2::new(cell_w - 20.0, 110.0));
                        ui.with_layout(Layout::top_down(Align::Center), |ui| {
                            ui.label(RichText::new(if card.collected { "🏅" } else { "🔒" }).size(40.0));
                            let name = RichText::new(&card.name).strong();
                            ui.label(if card.collected { name } else { name.weak() });
                            if card.collected {
                                ui.label(RichText::new("Conquistado!").small().color(EMERALD));
                            }
                        });
                    })
                    .response;
                // só os conquistados abrem o carimbador
                if card.collected && response.interact(Sense::click()).clicked() {
                    selected = Some(card.id.clone());
                }
                if (i + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });

    if cards.is_empty() {
        ui.label("Nenhum badge por aqui ainda.");
    }
    if let Some(id) = selected {
        app.open_stamper(&id);
    }
}

fn badge_detail(app: &mut TrilhasApp, ui: &mut Ui) {
    if ui.link(RichText::new("← Voltar para Badges").color(EMERALD_DARK)).clicked() {
        app.close_stamper();
        return;
    }
    let Some(badge) = app.stamper_badge().cloned() else {
        app.close_stamper();
        return;
    };
    ui.add_space(8.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new("🏅").size(48.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(&badge.name).heading().strong());
                ui.label(&badge.description);
            });
        });
        ui.separator();
        ui_stamper(app, ui);
    });
}
