use crate::TrilhasApp;
use crate::ui::helpers::{fitted_image, refresh_texture, rgba_image};
use crate::ui::layout::two_button_row;
#[cfg(target_arch = "wasm32")]
use crate::ui::picker::{PickPurpose, open_file_dialog};
use egui::{RichText, Ui};

/// "Carimbe sua Foto": escolher foto, ver o resultado, baixar ou compartilhar.
pub fn ui_stamper(app: &mut TrilhasApp, ui: &mut Ui) {
    ui.label(RichText::new("Carimbe sua Foto").strong().size(18.0));
    ui.add_space(6.0);

    let has_result = app.stamper.as_ref().is_some_and(|s| s.stamped.is_some());
    if !has_result {
        photo_prompt(app, ui);
        return;
    }

    let ctx = ui.ctx().clone();
    if let Some(stamper) = &mut app.stamper {
        if stamper.texture.is_none() {
            if let Some(image) = &stamper.stamped {
                refresh_texture(&ctx, &mut stamper.texture, "stamped_photo", rgba_image(image));
            }
        }
        if let Some(texture) = &stamper.texture {
            fitted_image(ui, texture, 640.0);
        }
    }
    ui.add_space(8.0);

    let share_label = app.share.is_supported().then_some("🔗 Compartilhar");
    let width = ui.available_width().min(640.0);
    let (download, share) = two_button_row(ui, width, "⬇ Baixar Foto", share_label);
    if download {
        app.download_stamp();
    }
    if share {
        app.share_stamp();
    }

    if let Some(location) = app.stamper.as_ref().and_then(|s| s.saved_to.as_deref()) {
        ui.label(RichText::new(format!("Foto salva: {location}")).small());
    }
    if ui.small_button("Escolher outra foto").clicked() {
        if let Some(stamper) = &mut app.stamper {
            stamper.stamped = None;
            stamper.texture = None;
            stamper.png = None;
        }
    }
}

#[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
fn photo_prompt(app: &mut TrilhasApp, ui: &mut Ui) {
    egui::Frame::default()
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("📷").size(36.0));
                ui.label("Selecione uma foto sua na trilha para carimbar");
                ui.add_space(6.0);

                #[cfg(target_arch = "wasm32")]
                if ui.button("Escolher foto").clicked() {
                    open_file_dialog(ui.ctx(), PickPurpose::StampPhoto);
                }

                #[cfg(not(target_arch = "wasm32"))]
                {
                    let mut load = false;
                    if let Some(stamper) = &mut app.stamper {
                        ui.horizontal(|ui| {
                            ui.label("Arquivo:");
                            let edit = ui.text_edit_singleline(&mut stamper.photo_path);
                            load = ui.button("Carregar").clicked()
                                || (edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                        });
                    }
                    if load {
                        load_from_path(app);
                    }
                }

                ui.label(RichText::new("Ou arraste uma imagem para a janela.").small().weak());
            });
        });
}

#[cfg(not(target_arch = "wasm32"))]
fn load_from_path(app: &mut TrilhasApp) {
    let Some(path) = app.stamper.as_ref().map(|s| s.photo_path.clone()) else {
        return;
    };
    match crate::ui::picker::read_path(&path) {
        Ok(bytes) => app.stamp_photo(&bytes),
        Err(err) => {
            log::warn!("could not read photo {path}: {err}");
            app.notice = Some("Não foi possível abrir essa foto. Escolha outra imagem.".to_owned());
        }
    }
}
