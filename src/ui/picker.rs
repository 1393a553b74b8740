// src/ui/picker.rs
//
// Entrada de imagens: arquivos arrastados para a janela (todas as
// plataformas), caminho digitado (desktop) ou o seletor do navegador.

use egui::Context;

/// Para onde vai a imagem escolhida.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickPurpose {
    QrImage,
    StampPhoto,
}

/// Primeiro arquivo solto na janela neste quadro, se houver.
pub fn dropped_file(ctx: &Context) -> Option<Vec<u8>> {
    let file = ctx.input(|i| i.raw.dropped_files.first().cloned())?;
    if let Some(bytes) = file.bytes {
        return Some(bytes.to_vec());
    }
    let path = file.path?;
    match std::fs::read(&path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::warn!("could not read dropped file {}: {err}", path.display());
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_path(path: &str) -> std::io::Result<Vec<u8>> {
    std::fs::read(path.trim())
}

#[cfg(target_arch = "wasm32")]
pub use web::{open_file_dialog, take_picked};

#[cfg(target_arch = "wasm32")]
mod web {
    use super::PickPurpose;
    use egui::{Context, Id};
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlInputElement;

    type Picked = Option<(PickPurpose, Vec<u8>)>;

    thread_local! {
        /// Callback do seletor aberto. Abrir outro seletor descarta o anterior.
        static PENDING: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
    }

    fn release_pending() {
        PENDING.with(|slot| slot.borrow_mut().take());
    }

    /// Caixa de entrada guardada na memória do egui; o callback do
    /// navegador preenche, o próximo quadro consome.
    #[derive(Clone, Default)]
    struct Inbox(Arc<Mutex<Picked>>);

    fn inbox(ctx: &Context) -> Inbox {
        ctx.data_mut(|d| d.get_temp_mut_or_default::<Inbox>(Id::new("trilhas_file_inbox")).clone())
    }

    pub fn take_picked(ctx: &Context) -> Picked {
        inbox(ctx).0.lock().ok().and_then(|mut slot| slot.take())
    }

    pub fn open_file_dialog(ctx: &Context, purpose: PickPurpose) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(input) = document
            .create_element("input")
            .ok()
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        input.set_type("file");
        input.set_accept("image/*");

        let inbox = inbox(ctx);
        let ctx = ctx.clone();
        let target = input.clone();
        let on_change = Closure::<dyn FnMut()>::new(move || {
            target.set_onchange(None);
            let file = target.files().and_then(|files| files.get(0));
            let inbox = inbox.clone();
            let ctx = ctx.clone();
            // o callback não pode se soltar enquanto roda; a tarefa solta depois
            wasm_bindgen_futures::spawn_local(async move {
                release_pending();
                let Some(file) = file else {
                    return;
                };
                match JsFuture::from(file.array_buffer()).await {
                    Ok(buffer) => {
                        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                        if let Ok(mut slot) = inbox.0.lock() {
                            *slot = Some((purpose, bytes));
                        }
                        ctx.request_repaint();
                    }
                    Err(err) => log::warn!("could not read picked file: {err:?}"),
                }
            });
        });
        input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        PENDING.with(|slot| *slot.borrow_mut() = Some(on_change));
        input.click();
    }
}
