use crate::TrilhasApp;
use crate::ui::helpers::EMERALD;
use crate::ui::layout::scroll_page;
use egui::{Align, Context, Layout, ProgressBar, RichText, TextEdit};

pub fn ui_profile(app: &mut TrilhasApp, ctx: &Context) {
    let stats = app.profile_stats();

    scroll_page(ctx, 480.0, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.label(RichText::new("Meu Perfil").heading().strong());
            ui.add_space(12.0);
            ui.label(RichText::new("👤").size(72.0));

            let edit = ui.add(
                TextEdit::singleline(&mut app.user_name)
                    .hint_text(crate::storage::DEFAULT_USER_NAME)
                    .horizontal_align(Align::Center)
                    .font(egui::TextStyle::Heading),
            );
            if edit.changed() {
                app.save_user_name();
            }
        });
        ui.add_space(24.0);

        ui.label(RichText::new("Progresso dos Badges").strong().size(18.0));
        ui.horizontal(|ui| {
            ui.label(format!("{} Conquistados", stats.collected));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(format!("{} Total", stats.total));
            });
        });
        ui.add(
            ProgressBar::new(stats.fraction())
                .fill(EMERALD)
                .text(format!("{:.0}%", stats.percent())),
        );
    });
}
