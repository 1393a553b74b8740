use trilhas_de_minas::TrilhasApp;
use trilhas_de_minas::config::APP_NAME;
use trilhas_de_minas::data::read_catalog_embedded;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // catálogo inválido é erro de build dos dados: não abre a janela
    let catalog = match read_catalog_embedded() {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("embedded catalog is invalid: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([480.0, 820.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(TrilhasApp::new(cc, catalog)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let catalog = match read_catalog_embedded() {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("embedded catalog is invalid: {err}");
            return;
        }
    };

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async move {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("the_canvas_id"))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("canvas `the_canvas_id` not found");
            return;
        };

        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(TrilhasApp::new(cc, catalog)))),
            )
            .await;
        if let Err(err) = started {
            log::error!("failed to start {APP_NAME}: {err:?}");
        }
    });
}
