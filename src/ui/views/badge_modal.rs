use crate::TrilhasApp;
use crate::ui::helpers::{EMERALD_DARK, big_list_button};
use egui::{Context, Id, Modal, RichText};

/// "Parabéns!": aparece a cada desbloqueio, inclusive de badge repetido.
pub fn ui_badge_modal(app: &mut TrilhasApp, ctx: &Context) {
    let Some(badge) = app.unlocked_badge().cloned() else {
        return;
    };

    let mut close = false;
    let response = Modal::new(Id::new("badge_unlock_modal")).show(ctx, |ui| {
        ui.set_width(320.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("🎉").size(32.0));
            ui.label(RichText::new("Parabéns!").heading().strong());
            ui.label("Você desbloqueou o badge:");
            ui.add_space(12.0);
            ui.label(RichText::new("🏅").size(64.0));
            ui.label(RichText::new(&badge.name).size(20.0).strong().color(EMERALD_DARK));
            ui.label(RichText::new(&badge.description).small().weak());
            ui.add_space(12.0);
            close = big_list_button(ui, "Continuar Explorando", ui.available_width(), 40.0, true);
        });
    });

    // clique fora do cartão também fecha
    if close || response.should_close() {
        app.dismiss_unlocked();
    }
}
