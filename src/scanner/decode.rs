// src/scanner/decode.rs
//
// Decodificação de QR Code num quadro RGBA. Sem estado: cada quadro é
// tentado de forma independente.

use super::Frame;

/// Quais versões do quadro (normal, invertida) tentar. O app usa `DontInvert`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InversionAttempts {
    #[default]
    DontInvert,
    OnlyInvert,
    AttemptBoth,
    InvertFirst,
}

impl InversionAttempts {
    /// Ordem das passadas: `false` = imagem normal, `true` = invertida.
    fn passes(self) -> &'static [bool] {
        match self {
            InversionAttempts::DontInvert => &[false],
            InversionAttempts::OnlyInvert => &[true],
            InversionAttempts::AttemptBoth => &[false, true],
            InversionAttempts::InvertFirst => &[true, false],
        }
    }
}

pub trait QrDecoder {
    fn decode(&self, frame: &Frame, policy: InversionAttempts) -> Option<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RqrrDecoder;

impl QrDecoder for RqrrDecoder {
    fn decode(&self, frame: &Frame, policy: InversionAttempts) -> Option<String> {
        if frame.width == 0 || frame.height == 0 {
            return None;
        }
        let luma = luminance(frame);
        policy
            .passes()
            .iter()
            .find_map(|&inverted| decode_luma(&luma, frame.width, frame.height, inverted))
    }
}

/// Luminância Rec. 709: 0.2126 R + 0.7152 G + 0.0722 B.
pub fn luminance(frame: &Frame) -> Vec<u8> {
    frame
        .rgba
        .chunks_exact(4)
        .map(|px| {
            let l = 0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2]);
            l.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

fn decode_luma(luma: &[u8], width: usize, height: usize, inverted: bool) -> Option<String> {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
        let v = luma.get(y * width + x).copied().unwrap_or(255);
        if inverted { 255 - v } else { v }
    });
    prepared
        .detect_grids()
        .into_iter()
        .find_map(|grid| match grid.decode() {
            Ok((_meta, content)) => Some(content),
            Err(err) => {
                log::debug!("QR grid found but not decodable: {err:?}");
                None
            }
        })
}
