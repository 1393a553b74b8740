use super::*;
use crate::badges::apply_unlock;
use crate::error::StampError;
use crate::model::Badge;
use crate::scanner::decode::RqrrDecoder;
use crate::scanner::{ScanPoll, StillImageSource, platform_camera};
use crate::stamp::export::{ShareRequest, artifact_file_name, encode_png, save_artifact};
use crate::stamp::{compose, decode_photo, load_icon, today_caption};

pub const NO_CODE_IN_IMAGE: &str = "Nenhum QR Code encontrado nesta imagem.";

impl TrilhasApp {
    /// Ponto único de desbloqueio para QR Code e deep link.
    /// Badge válido (novo ou repetido) abre o modal; inválido vira alerta.
    pub fn handle_unlock(&mut self, badge_id: &str, trigger: UnlockTrigger) {
        match apply_unlock(
            &self.catalog,
            self.store.as_mut(),
            &mut self.collected,
            badge_id,
            trigger,
        ) {
            Ok(outcome) => self.navigator.show_unlocked(&outcome.badge.id),
            Err(err) => self.notice = Some(err.user_message().to_owned()),
        }
    }

    pub fn dismiss_unlocked(&mut self) {
        self.navigator.dismiss_unlocked();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --- Boas-vindas e perfil ---

    pub fn finish_welcome(&mut self) {
        self.show_welcome = false;
        if let Err(err) = SHOW_WELCOME.save(self.store.as_mut(), &false) {
            log::error!("failed to persist welcome flag: {err}");
        }
    }

    /// Chamado a cada edição do campo de nome.
    pub fn save_user_name(&mut self) {
        let trimmed = self.user_name.trim().to_owned();
        if let Err(err) = USER_NAME.save(self.store.as_mut(), &trimmed) {
            log::error!("failed to persist user name: {err}");
            self.notice = Some("Não foi possível salvar o seu nome.".to_owned());
        }
    }

    // --- Leitor de QR Code ---

    pub fn start_scan(&mut self) {
        self.cancel_scan();
        let mut view = ScanView::default();
        if let Some(camera) = platform_camera() {
            match ScanSession::start(camera, Box::new(RqrrDecoder)) {
                Ok(session) => view.session = Some(session),
                Err(err) => {
                    self.notice = Some(err.user_message().to_owned());
                    return;
                }
            }
        }
        self.scan_view = Some(view);
    }

    /// Procura o QR Code numa foto (desktop ou arquivo arrastado).
    pub fn scan_image(&mut self, bytes: &[u8]) {
        let Some(view) = &mut self.scan_view else {
            return;
        };
        let started = StillImageSource::from_bytes(bytes)
            .and_then(|source| ScanSession::start(Box::new(source), Box::new(RqrrDecoder)));
        match started {
            Ok(session) => view.session = Some(session),
            Err(err) => self.notice = Some(err.user_message().to_owned()),
        }
    }

    pub fn cancel_scan(&mut self) {
        if let Some(session) = self.scan_view.take().and_then(|v| v.session) {
            session.cancel();
        }
    }

    /// Uma tentativa de leitura por quadro. Devolve `true` enquanto a câmera
    /// continua ativa (a UI pede outro quadro).
    pub fn poll_scan(&mut self) -> bool {
        let Some(session) = self.scan_view.as_mut().and_then(|v| v.session.as_mut()) else {
            return false;
        };
        match session.poll() {
            ScanPoll::Pending => true,
            ScanPoll::Found(payload) => {
                self.cancel_scan();
                self.handle_unlock(&payload, UnlockTrigger::QrScan);
                false
            }
            ScanPoll::Exhausted => {
                if let Some(view) = &mut self.scan_view {
                    view.session = None;
                }
                self.notice = Some(NO_CODE_IN_IMAGE.to_owned());
                false
            }
            ScanPoll::Failed(err) => {
                self.cancel_scan();
                self.notice = Some(err.user_message().to_owned());
                false
            }
        }
    }

    // --- Quiz ---

    pub fn answer_quiz(&mut self, option: &str) {
        let now = self.clock;
        let Some(quiz) = self.park_view.as_mut().and_then(|v| v.quiz.as_mut()) else {
            return;
        };
        if let Err(err) = quiz.answer(option, now) {
            log::debug!("quiz answer ignored: {err}");
        }
    }

    /// Aplica o avanço agendado. Devolve quanto falta para o próximo, se houver.
    pub fn tick_quiz(&mut self) -> Option<Duration> {
        let now = self.clock;
        let quiz = self.park_view.as_mut()?.quiz.as_mut()?;
        quiz.tick(now);
        quiz.time_until_advance(now)
    }

    pub fn restart_quiz(&mut self) {
        if let Some(quiz) = self.park_view.as_mut().and_then(|v| v.quiz.as_mut()) {
            quiz.restart();
        }
    }

    // --- Carimbo de foto ---

    /// Só badges conquistados abrem o carimbador.
    pub fn open_stamper(&mut self, badge_id: &str) {
        if self.collected.contains(badge_id) {
            self.stamper = Some(StamperState::new(badge_id));
        }
    }

    pub fn close_stamper(&mut self) {
        self.stamper = None;
    }

    pub fn stamp_photo(&mut self, bytes: &[u8]) {
        let Some(badge) = self.stamper_badge().cloned() else {
            return;
        };
        match self.compose_stamp(&badge, bytes) {
            Ok(image) => {
                if let Some(stamper) = &mut self.stamper {
                    stamper.stamped = Some(image);
                    stamper.png = None;
                    stamper.texture = None;
                    stamper.saved_to = None;
                }
            }
            Err(err) => {
                log::warn!("stamping `{}` failed: {err}", badge.id);
                self.notice = Some(err.user_message().to_owned());
            }
        }
    }

    fn compose_stamp(&mut self, badge: &Badge, bytes: &[u8]) -> Result<RgbaImage, StampError> {
        let photo = decode_photo(bytes)?;
        let fonts = match self.fonts.take() {
            Some(fonts) => fonts,
            None => StampFonts::from_egui()?,
        };
        let icon = load_icon(&self.config.assets_dir, badge);
        let stamped = compose(
            &photo,
            badge,
            icon.as_ref(),
            &today_caption(),
            self.config.stamp_width,
            &fonts,
        );
        self.fonts = Some(fonts);
        stamped
    }

    /// PNG da foto carimbada, codificado uma vez e reaproveitado.
    fn stamped_png(&mut self) -> Option<Vec<u8>> {
        let stamper = self.stamper.as_mut()?;
        if stamper.png.is_none() {
            let image = stamper.stamped.as_ref()?;
            match encode_png(image) {
                Ok(png) => stamper.png = Some(png),
                Err(err) => {
                    log::error!("PNG encode failed: {err}");
                    self.notice = Some(err.user_message().to_owned());
                    return None;
                }
            }
        }
        stamper.png.clone()
    }

    pub fn download_stamp(&mut self) {
        let Some(png) = self.stamped_png() else {
            return;
        };
        let Some(stamper) = &mut self.stamper else {
            return;
        };
        let file_name = artifact_file_name(&stamper.badge_id);
        match save_artifact(&self.config, &file_name, &png) {
            Ok(location) => stamper.saved_to = Some(location),
            Err(err) => {
                log::error!("saving `{file_name}` failed: {err}");
                self.notice = Some(err.user_message().to_owned());
            }
        }
    }

    pub fn share_stamp(&mut self) {
        let Some(badge) = self.stamper_badge().cloned() else {
            return;
        };
        let Some(png) = self.stamped_png() else {
            return;
        };
        let request = ShareRequest::for_badge(&badge, png);
        match self.share.share(&request) {
            Ok(()) => log::info!("shared stamped photo for `{}`", badge.id),
            Err(err) => {
                log::warn!("share failed: {err}");
                self.notice = Some(err.user_message().to_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app;
    use crate::data::read_catalog_embedded;
    use crate::storage::{COLLECTED_BADGES, MemoryStore};

    #[test]
    fn deep_link_unlock_persists_and_opens_modal() {
        let mut app = app();
        app.handle_unlock("cachoeira-1", UnlockTrigger::DeepLink);
        assert!(app.collected.contains("cachoeira-1"));
        assert_eq!(app.navigator.unlocked_badge(), Some("cachoeira-1"));
        assert_eq!(COLLECTED_BADGES.load(app.store.as_ref()), vec!["cachoeira-1".to_owned()]);
        assert!(app.notice.is_none());
    }

    #[test]
    fn rescanning_owned_badge_shows_modal_again() {
        let mut app = app();
        app.handle_unlock("janela-ceu", UnlockTrigger::QrScan);
        app.dismiss_unlocked();
        app.handle_unlock("janela-ceu", UnlockTrigger::QrScan);
        assert_eq!(app.navigator.unlocked_badge(), Some("janela-ceu"));
        assert_eq!(app.collected.len(), 1);
    }

    #[test]
    fn invalid_payload_raises_alert_without_mutation() {
        let mut app = app();
        app.handle_unlock("nao-existe", UnlockTrigger::QrScan);
        assert!(app.collected.is_empty());
        assert_eq!(app.navigator.unlocked_badge(), None);
        assert_eq!(
            app.notice.as_deref(),
            Some("QR Code inválido ou não corresponde a um badge.")
        );
    }

    #[test]
    fn state_is_restored_from_store() {
        let mut store = MemoryStore::new();
        COLLECTED_BADGES
            .save(&mut store, &vec!["trilha-ouro".to_owned()])
            .unwrap();
        SHOW_WELCOME.save(&mut store, &false).unwrap();
        USER_NAME.save(&mut store, &"Ana".to_owned()).unwrap();

        let app = TrilhasApp::with_store(
            read_catalog_embedded().unwrap(),
            AppConfig::default(),
            Box::new(store),
        );
        assert!(app.collected.contains("trilha-ouro"));
        assert!(!app.show_welcome);
        assert_eq!(app.user_name, "Ana");
    }

    #[test]
    fn welcome_and_name_are_persisted() {
        let mut app = app();
        assert!(app.show_welcome);
        app.finish_welcome();
        assert!(!SHOW_WELCOME.load(app.store.as_ref()));

        app.user_name = "  Bia ".into();
        app.save_user_name();
        assert_eq!(USER_NAME.load(app.store.as_ref()), "Bia");
    }

    #[test]
    fn quiz_runs_on_app_clock() {
        let mut app = app();
        app.open_park("ibitipoca");
        app.clock = Duration::from_millis(100);
        app.answer_quiz("Lima Duarte");

        app.clock = Duration::from_millis(600);
        assert_eq!(app.tick_quiz(), Some(Duration::from_millis(1000)));

        app.clock = Duration::from_millis(1600);
        assert_eq!(app.tick_quiz(), None);
        let quiz = app.park_view.as_ref().and_then(|v| v.quiz.as_ref()).unwrap();
        assert_eq!(quiz.score(), 1);
        assert!(matches!(quiz.state(), crate::quiz::QuizState::InProgress { index: 1, score: 1 }));

        app.restart_quiz();
        let quiz = app.park_view.as_ref().and_then(|v| v.quiz.as_ref()).unwrap();
        assert_eq!(quiz.state(), crate::quiz::QuizState::InProgress { index: 0, score: 0 });
    }

    #[test]
    fn stamper_only_opens_for_collected_badges() {
        let mut app = app();
        app.open_stamper("cachoeira-1");
        assert!(app.stamper.is_none());

        app.handle_unlock("cachoeira-1", UnlockTrigger::QrScan);
        app.open_stamper("cachoeira-1");
        assert_eq!(app.stamper_badge().map(|b| b.name.as_str()), Some("Cachoeira"));
    }

    #[test]
    fn bad_photo_shows_alert() {
        let mut app = app();
        app.handle_unlock("cachoeira-1", UnlockTrigger::QrScan);
        app.open_stamper("cachoeira-1");
        app.stamp_photo(b"nope");
        assert!(app.stamper.as_ref().unwrap().stamped.is_none());
        assert_eq!(
            app.notice.as_deref(),
            Some("Não foi possível abrir essa foto. Escolha outra imagem.")
        );
    }

    #[test]
    fn desktop_share_falls_back_to_message() {
        let mut app = app();
        app.handle_unlock("cachoeira-1", UnlockTrigger::QrScan);
        app.open_stamper("cachoeira-1");
        if let Some(s) = &mut app.stamper {
            s.stamped = Some(RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255])));
        }
        app.share_stamp();
        assert_eq!(
            app.notice.as_deref(),
            Some("A API de compartilhamento não é suportada neste navegador. Tente baixar a imagem.")
        );
    }

    #[test]
    fn image_without_code_reports_and_keeps_scanner_open() {
        let mut app = app();
        app.start_scan();
        assert!(app.scan_view.is_some());

        let blank = RgbaImage::from_pixel(40, 40, image::Rgba([255, 255, 255, 255]));
        let png = encode_png(&blank).unwrap();
        app.scan_image(&png);
        assert!(!app.poll_scan());
        assert_eq!(app.notice.as_deref(), Some(NO_CODE_IN_IMAGE));
        assert!(app.scan_view.as_ref().unwrap().session.is_none());

        app.cancel_scan();
        assert!(app.scan_view.is_none());
    }
}
