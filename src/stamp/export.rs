// src/stamp/export.rs
//
// Saída da foto carimbada: PNG, download e compartilhamento.

use crate::config::{AppConfig, ARTIFACT_PREFIX};
use crate::error::{ExportError, ShareError};
use crate::model::Badge;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

pub fn artifact_file_name(badge_id: &str) -> String {
    format!("{ARTIFACT_PREFIX}-{badge_id}.png")
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub file_name: String,
    pub png: Vec<u8>,
}

impl ShareRequest {
    pub fn for_badge(badge: &Badge, png: Vec<u8>) -> Self {
        Self {
            title: format!("Conquistei o badge {}!", badge.name),
            text: format!(
                "Eu explorei os parques de Minas Gerais e ganhei o badge \"{}\" com o app Trilhas de Minas! #TrilhasDeMinas",
                badge.name
            ),
            file_name: artifact_file_name(&badge.id),
            png,
        }
    }
}

pub trait ShareTarget {
    fn is_supported(&self) -> bool;
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Compartilhamento nativo do sistema (Web Share API no navegador).
#[derive(Default)]
pub struct PlatformShare;

#[cfg(not(target_arch = "wasm32"))]
impl ShareTarget for PlatformShare {
    fn is_supported(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}

#[cfg(target_arch = "wasm32")]
impl ShareTarget for PlatformShare {
    fn is_supported(&self) -> bool {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w.navigator(), &"share".into()).ok())
            .is_some_and(|f| f.is_function())
    }

    fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        use wasm_bindgen::{JsCast, JsValue};

        if !self.is_supported() {
            return Err(ShareError::Unsupported);
        }
        let failed = |e: JsValue| ShareError::Failed(e.as_string().unwrap_or_else(|| format!("{e:?}")));
        let navigator = web_sys::window().ok_or(ShareError::Unsupported)?.navigator();

        let file = web::png_file(&request.png, &request.file_name).map_err(failed)?;
        let files = js_sys::Array::of1(&file);
        let data = js_sys::Object::new();
        js_sys::Reflect::set(&data, &"title".into(), &request.title.as_str().into()).map_err(failed)?;
        js_sys::Reflect::set(&data, &"text".into(), &request.text.as_str().into()).map_err(failed)?;
        js_sys::Reflect::set(&data, &"files".into(), &files).map_err(failed)?;

        let share_fn: js_sys::Function = js_sys::Reflect::get(&navigator, &"share".into())
            .map_err(failed)?
            .dyn_into()
            .map_err(|_| ShareError::Unsupported)?;
        let promise: js_sys::Promise = share_fn
            .call1(&navigator, &data)
            .map_err(failed)?
            .dyn_into()
            .map_err(failed)?;

        // o usuário pode fechar a folha de compartilhamento; só registramos
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::warn!("share dismissed or failed: {err:?}");
            }
        });
        Ok(())
    }
}

/// Grava o PNG na pasta de exportação e devolve o caminho.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_artifact(config: &AppConfig, file_name: &str, png: &[u8]) -> Result<String, ExportError> {
    std::fs::create_dir_all(&config.export_dir)?;
    let path = config.export_dir.join(file_name);
    std::fs::write(&path, png)?;
    log::info!("stamped photo saved to {}", path.display());
    Ok(path.display().to_string())
}

/// Dispara o download do PNG no navegador.
#[cfg(target_arch = "wasm32")]
pub fn save_artifact(_config: &AppConfig, file_name: &str, png: &[u8]) -> Result<String, ExportError> {
    use wasm_bindgen::JsCast;

    let browser = |e: wasm_bindgen::JsValue| ExportError::Browser(format!("{e:?}"));
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Browser("no document".into()))?;
    let blob = web::png_blob(png).map_err(browser)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(browser)?
        .dyn_into()
        .map_err(|_| ExportError::Browser("anchor element".into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(browser)?;
    log::info!("stamped photo download started: {file_name}");
    Ok(file_name.to_owned())
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, File, FilePropertyBag};

    fn png_parts(png: &[u8]) -> js_sys::Array {
        js_sys::Array::of1(&js_sys::Uint8Array::from(png))
    }

    pub fn png_blob(png: &[u8]) -> Result<Blob, JsValue> {
        let opts = BlobPropertyBag::new();
        opts.set_type("image/png");
        Blob::new_with_u8_array_sequence_and_options(&png_parts(png), &opts)
    }

    pub fn png_file(png: &[u8], name: &str) -> Result<File, JsValue> {
        let opts = FilePropertyBag::new();
        opts.set_type("image/png");
        File::new_with_u8_array_sequence_and_options(&png_parts(png), name, &opts)
    }
}
