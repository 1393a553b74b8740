use crate::TrilhasApp;
use crate::app::ParkTab;
use crate::ui::helpers::{EMERALD, EMERALD_DARK};
use crate::ui::layout::scroll_page;
use crate::ui::views::parks::difficulty_row;
use crate::ui::views::quiz::ui_quiz;
use egui::{Button, Color32, Context, RichText, Ui};

pub fn ui_park_detail(app: &mut TrilhasApp, ctx: &Context) {
    let Some(park) = app.current_park().cloned() else {
        // parque sumiu do catálogo: volta para a lista
        app.go_back();
        return;
    };
    let rows = app.park_badge_rows(&park);

    scroll_page(ctx, 720.0, |ui| {
        carousel(app, ui, &park.images);

        ui.label(RichText::new(&park.name).heading().strong());
        ui.label(RichText::new(&park.location).weak());
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(&park.description);
            ui.add_space(6.0);
            difficulty_row(ui, &park);
        });
        ui.add_space(10.0);

        let tab = app.park_view.as_ref().map(|v| v.tab).unwrap_or_default();
        ui.horizontal(|ui| {
            if ui.selectable_label(tab == ParkTab::Badges, "Atividades (Badges)").clicked() {
                app.set_park_tab(ParkTab::Badges);
            }
            if ui.selectable_label(tab == ParkTab::Quiz, "Quiz").clicked() {
                app.set_park_tab(ParkTab::Quiz);
            }
        });
        ui.separator();

        match tab {
            ParkTab::Badges => {
                ui.label(RichText::new("Atividades e Conquistas").heading().strong());
                ui.label("Escaneie o QR e libere a conquista!");
                ui.add_space(6.0);
                if ui.button("📷 Escanear QR Code").clicked() {
                    app.start_scan();
                }
                ui.add_space(6.0);

                if rows.is_empty() {
                    ui.label("Nenhum badge específico para este parque ainda.");
                }
                for row in &rows {
                    let fill = if row.collected {
                        EMERALD.gamma_multiply(0.15)
                    } else {
                        ui.visuals().faint_bg_color
                    };
                    egui::Frame::default()
                        .fill(fill)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::same(10))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(if row.collected { "🏅" } else { "🔒" }).size(28.0));
                                ui.vertical(|ui| {
                                    let name = RichText::new(&row.name).strong();
                                    ui.label(if row.collected { name.color(EMERALD_DARK) } else { name });
                                    ui.label(RichText::new(&row.description).small());
                                });
                                if row.collected {
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        ui.label(RichText::new("✔").size(24.0).color(EMERALD));
                                    });
                                }
                            });
                        });
                    ui.add_space(4.0);
                }
            }
            ParkTab::Quiz => ui_quiz(app, ui),
        }
    });
}

/// As fotos do parque são URLs remotas; aqui ficam como link e contador.
fn carousel(app: &mut TrilhasApp, ui: &mut Ui, images: &[String]) {
    let Some(view) = app.park_view.as_mut() else {
        return;
    };
    let carousel = &mut view.carousel;
    if carousel.is_empty() {
        return;
    }

    egui::Frame::default()
        .fill(Color32::from_gray(30))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if carousel.has_controls() && ui.add(Button::new("◀")).clicked() {
                    carousel.prev();
                }
                if let Some(url) = images.get(carousel.index()) {
                    ui.hyperlink_to(
                        RichText::new(format!("📷 Foto {} de {}", carousel.index() + 1, carousel.len()))
                            .color(Color32::WHITE),
                        url,
                    );
                }
                if carousel.has_controls() && ui.add(Button::new("▶")).clicked() {
                    carousel.next();
                }
            });
            if carousel.has_controls() {
                let dots: String = (0..carousel.len())
                    .map(|i| if i == carousel.index() { '●' } else { '○' })
                    .collect();
                ui.label(RichText::new(dots).color(Color32::WHITE));
            }
        });
    ui.add_space(8.0);
}
