// src/stamp/mod.rs
//
// "Carimbe sua Foto": foto do usuário + ícone do badge + nome + data.

pub mod export;

use crate::error::StampError;
use crate::model::Badge;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use chrono::NaiveDate;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};
use std::path::Path;

const OVERLAY_HEIGHT: u32 = 150;
const MAX_CANVAS_HEIGHT: u64 = 8192;
const OVERLAY_MAX_ALPHA: f32 = 0.7;
const ICON_X: i64 = 30;
const ICON_BOTTOM_OFFSET: i64 = 120;
const ICON_SIZE: u32 = 100;
const TEXT_X: i32 = 150;
const NAME_BASELINE_OFFSET: i32 = 85;
const DATE_BASELINE_OFFSET: i32 = 45;
const NAME_PX: f32 = 32.0;
const DATE_PX: f32 = 24.0;
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const EMERALD: Rgba<u8> = Rgba([16, 185, 129, 255]);

/// Fonte usada no carimbo. Vem das fontes embutidas no egui.
pub struct StampFonts {
    text: FontVec,
}

impl StampFonts {
    pub fn from_egui() -> Result<Self, StampError> {
        let defs = egui::FontDefinitions::default();
        let data = defs
            .font_data
            .get("Ubuntu-Light")
            .or_else(|| defs.font_data.values().next())
            .ok_or_else(|| StampError::Font("egui ships no fonts".into()))?;
        let text = FontVec::try_from_vec(data.font.to_vec()).map_err(|e| StampError::Font(e.to_string()))?;
        Ok(Self { text })
    }
}

pub fn date_caption(date: NaiveDate) -> String {
    format!("Conquistado em: {}", date.format("%d/%m/%Y"))
}

pub fn today_caption() -> String {
    date_caption(chrono::Local::now().date_naive())
}

pub fn decode_photo(bytes: &[u8]) -> Result<DynamicImage, StampError> {
    let photo = image::load_from_memory(bytes)?;
    if photo.width() == 0 || photo.height() == 0 {
        return Err(StampError::EmptyImage);
    }
    Ok(photo)
}

/// Ícone do badge a partir da pasta de assets. Ausente ou ilegível: `None`.
pub fn load_icon(assets_dir: &Path, badge: &Badge) -> Option<RgbaImage> {
    let path = assets_dir.join(&badge.icon);
    match image::open(&path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(err) => {
            log::debug!("badge icon {} unavailable: {err}", path.display());
            None
        }
    }
}

/// Altura do quadro para a largura fixa, mantendo a proporção da foto.
/// Fotos estreitas demais gerariam um quadro gigante e são recusadas.
pub fn canvas_size(photo_w: u32, photo_h: u32, width: u32) -> Result<(u32, u32), StampError> {
    let h = (u64::from(width) * u64::from(photo_h) + u64::from(photo_w) / 2) / u64::from(photo_w.max(1));
    if h > MAX_CANVAS_HEIGHT {
        return Err(StampError::TooLarge { width, height: h });
    }
    Ok((width, h.max(1) as u32))
}

pub fn compose(
    photo: &DynamicImage,
    badge: &Badge,
    icon: Option<&RgbaImage>,
    caption: &str,
    width: u32,
    fonts: &StampFonts,
) -> Result<RgbaImage, StampError> {
    if photo.width() == 0 || photo.height() == 0 || width == 0 {
        return Err(StampError::EmptyImage);
    }
    let (w, h) = canvas_size(photo.width(), photo.height(), width)?;
    let mut canvas = imageops::resize(&photo.to_rgba8(), w, h, FilterType::Triangle);

    darken_bottom(&mut canvas);

    let icon_y = i64::from(h) - ICON_BOTTOM_OFFSET;
    match icon {
        Some(icon) => {
            let icon = imageops::resize(icon, ICON_SIZE, ICON_SIZE, FilterType::Triangle);
            imageops::overlay(&mut canvas, &icon, ICON_X, icon_y);
        }
        None => {
            let r = (ICON_SIZE / 2) as i32;
            let center = (ICON_X as i32 + r, icon_y as i32 + r);
            draw_filled_circle_mut(&mut canvas, center, r, EMERALD);
        }
    }

    let h = h as i32;
    draw_line(&mut canvas, fonts, NAME_PX, h - NAME_BASELINE_OFFSET, &badge.name);
    draw_line(&mut canvas, fonts, DATE_PX, h - DATE_BASELINE_OFFSET, caption);
    Ok(canvas)
}

/// Degradê de transparente até 70% de preto nos últimos 150 px. Em fotos
/// mais baixas que isso o degradê começa acima da borda, já parcialmente escuro.
fn darken_bottom(canvas: &mut RgbaImage) {
    let h = canvas.height();
    let top = h.saturating_sub(OVERLAY_HEIGHT);
    let start = i64::from(h) - i64::from(OVERLAY_HEIGHT);
    for y in top..h {
        let t = ((i64::from(y) - start) as f32 + 0.5) / OVERLAY_HEIGHT as f32;
        let keep = 1.0 - OVERLAY_MAX_ALPHA * t.min(1.0);
        for x in 0..canvas.width() {
            let px = canvas.get_pixel_mut(x, y);
            for c in &mut px.0[..3] {
                *c = (f32::from(*c) * keep).round() as u8;
            }
        }
    }
}

fn draw_line(canvas: &mut RgbaImage, fonts: &StampFonts, px: f32, baseline: i32, text: &str) {
    let scale = PxScale::from(px);
    let ascent = fonts.text.as_scaled(scale).ascent();
    let top = baseline - ascent.round() as i32;
    draw_text_mut(canvas, WHITE, TEXT_X, top, scale, &fonts.text, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge() -> Badge {
        Badge {
            id: "cachoeira-1".into(),
            name: "Cachoeira".into(),
            description: String::new(),
            icon: "icons/cachoeira-1.png".into(),
        }
    }

    fn gray_photo(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([100, 100, 100, 255])))
    }

    fn fonts() -> StampFonts {
        StampFonts::from_egui().expect("egui bundles default fonts")
    }

    #[test]
    fn canvas_keeps_aspect_ratio_at_fixed_width() {
        assert_eq!(canvas_size(400, 300, 800).unwrap(), (800, 600));
        assert_eq!(canvas_size(1080, 1920, 800).unwrap(), (800, 1422));
        assert_eq!(canvas_size(4000, 1, 800).unwrap(), (800, 1));
    }

    #[test]
    fn very_tall_photo_is_rejected_before_allocating() {
        let err = canvas_size(1, 2_000_000, 800).unwrap_err();
        assert!(matches!(err, StampError::TooLarge { width: 800, height: 1_600_000_000 }));
        assert!(canvas_size(1, u32::MAX, u32::MAX).is_err());

        let tall = gray_photo(1, 2_000_000);
        let err = compose(&tall, &badge(), None, "", 800, &fonts()).unwrap_err();
        assert!(matches!(err, StampError::TooLarge { .. }));
        assert_eq!(err.user_message(), "Essa foto é estreita demais para o carimbo. Escolha outra imagem.");
    }

    #[test]
    fn short_photo_starts_partly_dark() {
        let mut canvas = RgbaImage::from_pixel(4, 100, Rgba([200, 200, 200, 255]));
        darken_bottom(&mut canvas);
        // topo fica 50 px dentro do degradê de 150 px
        let top = canvas.get_pixel(0, 0).0[0];
        let expected = (200.0 * (1.0 - OVERLAY_MAX_ALPHA * 50.5 / 150.0)).round() as u8;
        assert_eq!(top, expected);
        let bottom = canvas.get_pixel(0, 99).0[0];
        assert!(bottom <= 62, "bottom pixel {bottom}");
    }

    #[test]
    fn composed_photo_has_fixed_width_and_dark_bottom() {
        let out = compose(&gray_photo(400, 300), &badge(), None, "Conquistado em: 01/02/2025", 800, &fonts())
            .unwrap();
        assert_eq!(out.dimensions(), (800, 600));

        // acima do degradê a foto fica intacta
        assert_eq!(out.get_pixel(400, 10).0, [100, 100, 100, 255]);
        // última linha: ~70% mais escura, longe do texto
        let bottom = out.get_pixel(790, 599).0[0];
        assert!(bottom <= 32, "bottom pixel {bottom}");
        let mid = out.get_pixel(790, 525).0[0];
        assert!(mid < 100 && mid > bottom);
    }

    #[test]
    fn icon_is_drawn_in_its_box() {
        let icon = RgbaImage::from_pixel(50, 50, Rgba([200, 0, 0, 255]));
        let out = compose(&gray_photo(800, 600), &badge(), Some(&icon), "", 800, &fonts()).unwrap();
        assert_eq!(out.get_pixel(80, 600 - 70).0, [200, 0, 0, 255]);
        assert_ne!(out.get_pixel(20, 600 - 70).0, [200, 0, 0, 255]);
    }

    #[test]
    fn missing_icon_uses_emerald_placeholder() {
        let out = compose(&gray_photo(800, 600), &badge(), None, "", 800, &fonts()).unwrap();
        assert_eq!(out.get_pixel(80, 600 - 70).0, EMERALD.0);
    }

    #[test]
    fn badge_name_is_written_in_white() {
        let out = compose(&gray_photo(800, 600), &badge(), None, "", 800, &fonts()).unwrap();
        let bright = (150..400)
            .flat_map(|x| (600 - 85 - 32..600 - 85).map(move |y| (x, y)))
            .any(|(x, y)| out.get_pixel(x, y).0[0] > 200);
        assert!(bright, "expected white glyph pixels near the name baseline");
    }

    #[test]
    fn caption_uses_brazilian_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date_caption(date), "Conquistado em: 07/03/2025");
    }

    #[test]
    fn undecodable_photo_is_an_error() {
        let err = decode_photo(b"definitely not a png").unwrap_err();
        assert!(matches!(err, StampError::Decode(_)));
        assert_eq!(err.user_message(), "Não foi possível abrir essa foto. Escolha outra imagem.");
    }
}
