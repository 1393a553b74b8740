use crate::TrilhasApp;
use egui::{Context, Id, Modal, RichText};

pub fn ui_alert(app: &mut TrilhasApp, ctx: &Context) {
    let Some(message) = app.notice.clone() else {
        return;
    };

    let mut ok = false;
    let response = Modal::new(Id::new("alert_modal")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.label(RichText::new("⚠ Atenção").strong());
        ui.add_space(6.0);
        ui.label(&message);
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ok = ui.button("OK").clicked();
        });
    });

    if ok || response.should_close() {
        app.dismiss_notice();
    }
}
