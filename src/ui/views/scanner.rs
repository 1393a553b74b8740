use crate::TrilhasApp;
use crate::ui::helpers::{EMERALD, fitted_image, refresh_texture, scan_frame_image};
use egui::{Align2, Context, RichText, Stroke, Vec2};

/// Leitor em tela cheia. No navegador mostra a câmera; no desktop lê o
/// QR Code de uma foto.
pub fn ui_scanner(app: &mut TrilhasApp, ctx: &Context) {
    let Some(view) = &mut app.scan_view else {
        return;
    };

    if let Some(frame) = view.session.as_ref().and_then(|s| s.last_frame()) {
        refresh_texture(ctx, &mut view.preview, "scanner_preview", scan_frame_image(frame));
    }

    let mut cancel = false;
    #[cfg(not(target_arch = "wasm32"))]
    let mut read_path = false;

    egui::Window::new("scanner")
        .title_bar(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .resizable(false)
        .collapsible(false)
        .min_width(320.0)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Aponte para o QR Code").heading().strong());
                ui.label("Alinhe o código dentro da área marcada.");
                ui.add_space(10.0);

                egui::Frame::default()
                    .stroke(Stroke::new(3.0, EMERALD))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::same(6))
                    .show(ui, |ui| match &view.preview {
                        Some(texture) => fitted_image(ui, texture, 320.0),
                        None => {
                            ui.allocate_space(Vec2::splat(240.0));
                        }
                    });
                ui.add_space(10.0);

                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.label("Informe uma foto com o QR Code:");
                    ui.horizontal(|ui| {
                        let edit = ui.text_edit_singleline(&mut view.image_path);
                        read_path = ui.button("Ler imagem").clicked()
                            || (edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                    });
                    ui.label(RichText::new("Ou arraste a imagem para a janela.").small().weak());
                    ui.add_space(6.0);
                }

                cancel = ui.button("Cancelar").clicked();
            });
        });

    #[cfg(not(target_arch = "wasm32"))]
    if read_path {
        let path = view.image_path.clone();
        match crate::ui::picker::read_path(&path) {
            Ok(bytes) => app.scan_image(&bytes),
            Err(err) => {
                log::warn!("could not read QR image {path}: {err}");
                app.notice = Some("Não foi possível ler a imagem para procurar o QR Code.".to_owned());
            }
        }
    }
    if cancel {
        app.cancel_scan();
    }
}
