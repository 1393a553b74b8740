use crate::badges::{CollectedBadges, UnlockTrigger};
use crate::catalog::{BadgeFilter, Catalog, ParkFilter};
use crate::config::AppConfig;
use crate::deep_link::take_startup_badge;
use crate::model::Page;
use crate::quiz::QuizSession;
use crate::scanner::ScanSession;
use crate::stamp::StampFonts;
use crate::stamp::export::{PlatformShare, ShareTarget};
use crate::storage::{KeyValueStore, SHOW_WELCOME, USER_NAME, open_platform_store};
use image::RgbaImage;
use std::time::Duration;

// Submódulos
pub mod actions;
pub mod navigation;
pub mod progress;
pub mod queries;

pub use crate::view_models::{BadgeCard, ParkBadgeRow, ParkCard};
pub use navigation::Navigator;
pub use progress::{Carousel, ProfileStats};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ParkTab {
    #[default]
    Badges, // "Atividades (Badges)"
    Quiz,
}

/// Estado do detalhe de um parque. Some junto com o detalhe, e com ele
/// qualquer avanço de quiz pendente.
pub struct ParkView {
    pub park_id: String,
    pub tab: ParkTab,
    pub carousel: Carousel,
    pub quiz: Option<QuizSession>,
}

/// Leitor de QR aberto. No desktop começa sem sessão até o usuário
/// indicar uma foto com o código.
#[derive(Default)]
pub struct ScanView {
    pub session: Option<ScanSession>,
    pub image_path: String,
    pub preview: Option<egui::TextureHandle>,
}

/// Badge selecionado na página "Meus Badges", com o carimbador.
pub struct StamperState {
    pub badge_id: String,
    pub photo_path: String,
    pub stamped: Option<RgbaImage>,
    pub png: Option<Vec<u8>>,
    pub texture: Option<egui::TextureHandle>,
    pub saved_to: Option<String>,
}

impl StamperState {
    pub fn new(badge_id: &str) -> Self {
        Self {
            badge_id: badge_id.to_owned(),
            photo_path: String::new(),
            stamped: None,
            png: None,
            texture: None,
            saved_to: None,
        }
    }
}

pub struct TrilhasApp {
    pub catalog: Catalog,
    pub config: AppConfig,
    store: Box<dyn KeyValueStore>,
    pub collected: CollectedBadges,
    pub user_name: String,
    pub show_welcome: bool,
    pub navigator: Navigator,
    pub park_view: Option<ParkView>,
    pub park_filter: ParkFilter,
    pub badge_filter: BadgeFilter,
    pub stamper: Option<StamperState>,
    pub scan_view: Option<ScanView>,
    pub notice: Option<String>,
    pub share: Box<dyn ShareTarget>,
    fonts: Option<StampFonts>,
    /// Relógio de entrada do egui, atualizado a cada quadro.
    pub clock: Duration,
}

impl TrilhasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, catalog: Catalog) -> Self {
        let config = AppConfig::load();
        let store = open_platform_store(&config);
        let startup_badge = take_startup_badge(&config.deep_link_param);

        let mut app = Self::with_store(catalog, config, store);
        if let Some(badge_id) = startup_badge {
            app.handle_unlock(&badge_id, UnlockTrigger::DeepLink);
        }
        app
    }

    /// Monta o app sobre um store já aberto. Lê cada chave uma vez.
    pub fn with_store(catalog: Catalog, config: AppConfig, store: Box<dyn KeyValueStore>) -> Self {
        let collected = CollectedBadges::load(store.as_ref());
        let user_name = USER_NAME.load(store.as_ref());
        let show_welcome = SHOW_WELCOME.load(store.as_ref());
        log::info!(
            "loaded {} parks, {} badges ({} collected)",
            catalog.parks().len(),
            catalog.badges().len(),
            collected.len()
        );

        Self {
            catalog,
            config,
            store,
            collected,
            user_name,
            show_welcome,
            navigator: Navigator::default(),
            park_view: None,
            park_filter: ParkFilter::All,
            badge_filter: BadgeFilter::All,
            stamper: None,
            scan_view: None,
            notice: None,
            share: Box::new(PlatformShare),
            fonts: None,
            clock: Duration::ZERO,
        }
    }

    pub fn page(&self) -> Page {
        self.navigator.page()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::data::read_catalog_embedded;
    use crate::storage::MemoryStore;

    pub fn app() -> TrilhasApp {
        TrilhasApp::with_store(
            read_catalog_embedded().unwrap(),
            AppConfig::default(),
            Box::new(MemoryStore::new()),
        )
    }
}
