// src/ui/helpers.rs
use crate::model::Difficulty;
use crate::scanner::Frame as ScanFrame;
use egui::{Button, Color32, ColorImage, Context, RichText, TextureHandle, TextureOptions, Ui, Vec2};
use image::RgbaImage;

pub const EMERALD: Color32 = Color32::from_rgb(16, 185, 129);
pub const EMERALD_DARK: Color32 = Color32::from_rgb(4, 120, 87);

pub fn big_list_button(ui: &mut Ui, label: impl Into<String>, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label.into()).min_size(Vec2::new(width, height)))
        .clicked()
}

/// Botão "pílula" das barras de filtro.
pub fn filter_chip(ui: &mut Ui, label: &str, selected: bool) -> bool {
    let text = if selected {
        RichText::new(label).strong().color(Color32::WHITE)
    } else {
        RichText::new(label)
    };
    let mut button = Button::new(text).corner_radius(12.0);
    if selected {
        button = button.fill(EMERALD);
    }
    ui.add(button).clicked()
}

pub fn difficulty_color(d: Difficulty) -> Color32 {
    match d {
        Difficulty::Easy => Color32::from_rgb(22, 101, 52),
        Difficulty::Moderate => Color32::from_rgb(133, 77, 14),
        Difficulty::Hard => Color32::from_rgb(153, 27, 27),
    }
}

pub fn difficulty_chip(ui: &mut Ui, d: Difficulty) {
    egui::Frame::default()
        .fill(difficulty_color(d).gamma_multiply(0.25))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.label(RichText::new(d.label()).color(difficulty_color(d)).strong());
        });
}

pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).heading().strong().color(EMERALD_DARK));
}

pub fn scan_frame_image(frame: &ScanFrame) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([frame.width, frame.height], &frame.rgba)
}

pub fn rgba_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// Atualiza (ou cria) a textura guardada em `slot`.
pub fn refresh_texture(ctx: &Context, slot: &mut Option<TextureHandle>, name: &str, image: ColorImage) {
    match slot {
        Some(handle) => handle.set(image, TextureOptions::LINEAR),
        None => *slot = Some(ctx.load_texture(name, image, TextureOptions::LINEAR)),
    }
}

/// Desenha a textura na largura disponível, mantendo a proporção.
pub fn fitted_image(ui: &mut Ui, texture: &TextureHandle, max_width: f32) {
    let size = texture.size_vec2();
    let w = ui.available_width().min(max_width).min(size.x.max(1.0));
    let scale = w / size.x.max(1.0);
    ui.image((texture.id(), size * scale));
}
