use crate::TrilhasApp;
use crate::catalog::{PARK_FILTER_LABELS, ParkFilter};
use crate::model::Page;
use crate::ui::helpers::{EMERALD, difficulty_chip, filter_chip, section_heading};
use crate::ui::layout::scroll_page;
use egui::{Button, Context, RichText, Ui, Vec2};

const SAFETY_TIPS: [&str; 6] = [
    "Sempre verifique a previsão do tempo antes de sair.",
    "Leve água suficiente e lanches.",
    "Use roupas e calçados apropriados para trilha.",
    "Informe a alguém sobre seu roteiro e horário previsto de retorno.",
    "Não deixe lixo na trilha. Leve tudo de volta com você.",
    "Respeite a fauna e a flora local.",
];

const SUPPORT_EMAIL: &str = "suporte@trilhasdeminas.com";

pub fn ui_parks(app: &mut TrilhasApp, ctx: &Context) {
    scroll_page(ctx, 720.0, |ui| {
        // Barra de filtros
        ui.horizontal_wrapped(|ui| {
            for label in PARK_FILTER_LABELS {
                let selected = app.park_filter.label() == label;
                if filter_chip(ui, label, selected) {
                    app.park_filter = ParkFilter::from_label(label);
                }
            }
        });
        ui.add_space(12.0);

        let cards = app.park_cards();
        let card_w = ((ui.available_width() - 16.0) / 3.0).max(90.0);
        let card_size = Vec2::new(card_w, card_w * 1.1);
        let mut open: Option<String> = None;
        let mut to_badges = false;

        egui::Grid::new("parks_grid")
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                let badges_btn = Button::new(RichText::new("🏅\nMeus Badges").strong().color(egui::Color32::WHITE))
                    .fill(EMERALD)
                    .min_size(card_size);
                to_badges = ui.add(badges_btn).clicked();

                for (i, card) in cards.iter().enumerate() {
                    let text = format!("{}\n{}\n{}", card.label(), card.location, card.progress_label());
                    if ui.add(Button::new(text).min_size(card_size)).clicked() {
                        open = Some(card.id.clone());
                    }
                    // o card de badges ocupa a primeira célula
                    if (i + 2) % 3 == 0 {
                        ui.end_row();
                    }
                }
            });

        if cards.is_empty() {
            ui.add_space(8.0);
            ui.label("Nenhum parque corresponde a este filtro.");
        }

        if let Some(id) = open {
            app.open_park(&id);
        }
        if to_badges {
            app.go_to(Page::Badges);
        }

        ui.add_space(32.0);
        info_sections(ui);
    });
}

fn info_sections(ui: &mut Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        section_heading(ui, "Sobre o App");
        ui.label(
            "O \"Trilhas de Minas – Explore & Conquiste\" é seu guia digital para os parques estaduais de Minas Gerais. \
             Explore trilhas, faça check-in com QR codes nos locais e colecione badges exclusivos para comemorar suas conquistas. \
             Este aplicativo foi projetado para funcionar offline, garantindo que você tenha acesso às informações mesmo em áreas remotas.",
        );
    });
    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        section_heading(ui, "Dicas de Segurança");
        for tip in SAFETY_TIPS {
            ui.label(format!("• {tip}"));
        }
    });
    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        section_heading(ui, "Contato e Suporte");
        ui.horizontal_wrapped(|ui| {
            ui.label("Encontrou algum problema ou tem sugestões? Entre em contato conosco pelo e-mail:");
            ui.hyperlink_to(SUPPORT_EMAIL, format!("mailto:{SUPPORT_EMAIL}"));
        });
    });
}

/// Linha com dificuldade e duração, usada também no detalhe.
pub fn difficulty_row(ui: &mut Ui, park: &crate::model::Park) {
    ui.horizontal(|ui| {
        difficulty_chip(ui, park.difficulty);
        ui.label(format!("⏱ {}", park.duration));
    });
}
