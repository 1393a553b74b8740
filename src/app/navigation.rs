use super::*;

/// Rota atual: página de topo, parque aberto e o modal de badge desbloqueado.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    page: Page,
    park: Option<String>,
    unlocked_badge: Option<String>,
}

impl Navigator {
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn park(&self) -> Option<&str> {
        self.park.as_deref()
    }

    pub fn unlocked_badge(&self) -> Option<&str> {
        self.unlocked_badge.as_deref()
    }

    /// Navegação de topo: sempre fecha o detalhe.
    pub fn nav(&mut self, page: Page) {
        self.park = None;
        self.page = page;
    }

    pub fn select_park(&mut self, park_id: &str) {
        self.park = Some(park_id.to_owned());
    }

    /// Com detalhe aberto, fecha o detalhe. Senão volta para Parques.
    pub fn back(&mut self) {
        if self.park.is_some() {
            self.park = None;
        } else if self.page != Page::Parks {
            self.page = Page::Parks;
        }
    }

    pub fn show_back(&self) -> bool {
        self.park.is_some() || self.page != Page::Parks
    }

    pub fn show_unlocked(&mut self, badge_id: &str) {
        self.unlocked_badge = Some(badge_id.to_owned());
    }

    pub fn dismiss_unlocked(&mut self) {
        self.unlocked_badge = None;
    }
}

impl TrilhasApp {
    pub fn go_to(&mut self, page: Page) {
        self.navigator.nav(page);
        self.sync_views();
    }

    pub fn go_back(&mut self) {
        self.navigator.back();
        self.sync_views();
    }

    pub fn open_park(&mut self, park_id: &str) {
        let Some(park) = self.catalog.park(park_id) else {
            log::warn!("unknown park `{park_id}`");
            return;
        };
        let quiz = QuizSession::new(park.quiz.clone(), self.config.feedback_delay).ok();
        self.park_view = Some(ParkView {
            park_id: park.id.clone(),
            tab: ParkTab::default(),
            carousel: Carousel::new(park.images.len()),
            quiz,
        });
        self.navigator.select_park(park_id);
    }

    /// Sair da aba do quiz o encerra: a próxima visita começa do zero.
    pub fn set_park_tab(&mut self, tab: ParkTab) {
        let Some(view) = &mut self.park_view else {
            return;
        };
        if view.tab == ParkTab::Quiz && tab != ParkTab::Quiz {
            if let Some(quiz) = &mut view.quiz {
                quiz.restart();
            }
        }
        view.tab = tab;
    }

    /// Descarta o estado de telas que deixaram de estar visíveis.
    fn sync_views(&mut self) {
        if self.navigator.park().is_none() {
            self.park_view = None;
        }
        if self.navigator.page() != Page::Badges {
            self.stamper = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app;
    use crate::quiz::QuizState;

    #[test]
    fn back_closes_detail_before_leaving_page() {
        let mut nav = Navigator::default();
        nav.nav(Page::Badges);
        nav.select_park("ibitipoca");
        assert!(nav.show_back());

        nav.back();
        assert_eq!(nav.park(), None);
        assert_eq!(nav.page(), Page::Badges);

        nav.back();
        assert_eq!(nav.page(), Page::Parks);
        assert!(!nav.show_back());

        nav.back();
        assert_eq!(nav.page(), Page::Parks);
    }

    #[test]
    fn top_level_navigation_clears_detail() {
        let mut nav = Navigator::default();
        nav.select_park("itacolomi");
        nav.nav(Page::Profile);
        assert_eq!(nav.park(), None);
        assert_eq!(nav.page(), Page::Profile);

        nav.select_park("itacolomi");
        nav.nav(Page::Parks);
        assert_eq!(nav.park(), None);
        assert!(!nav.show_back());
    }

    #[test]
    fn unlocked_badge_overlay_is_independent_of_routing() {
        let mut nav = Navigator::default();
        nav.show_unlocked("cachoeira-1");
        nav.nav(Page::Badges);
        assert_eq!(nav.unlocked_badge(), Some("cachoeira-1"));
        nav.dismiss_unlocked();
        assert_eq!(nav.unlocked_badge(), None);
    }

    #[test]
    fn closing_park_drops_its_quiz() {
        let mut app = app();
        app.open_park("ibitipoca");
        app.set_park_tab(ParkTab::Quiz);
        let now = Duration::from_secs(1);
        app.clock = now;
        app.answer_quiz("Ouro Preto");
        assert!(app.park_view.as_ref().and_then(|v| v.quiz.as_ref()).is_some());

        app.go_back();
        assert!(app.park_view.is_none());
        assert_eq!(app.navigator.park(), None);
    }

    #[test]
    fn leaving_quiz_tab_discards_pending_advance() {
        let mut app = app();
        app.open_park("ibitipoca");
        app.set_park_tab(ParkTab::Quiz);
        app.clock = Duration::ZERO;
        app.answer_quiz("Lima Duarte");

        app.set_park_tab(ParkTab::Badges);
        app.clock = Duration::from_millis(5000);
        assert_eq!(app.tick_quiz(), None);

        app.set_park_tab(ParkTab::Quiz);
        let quiz = app.park_view.as_ref().and_then(|v| v.quiz.as_ref()).unwrap();
        assert_eq!(quiz.state(), QuizState::InProgress { index: 0, score: 0 });
        assert!(!quiz.feedback_visible());
    }

    #[test]
    fn park_without_questions_has_no_session() {
        let mut app = app();
        app.open_park("rola-moca");
        let view = app.park_view.as_ref().unwrap();
        assert_eq!(view.tab, ParkTab::Badges);
        assert!(view.quiz.is_none());
    }

    #[test]
    fn leaving_badges_page_closes_stamper() {
        let mut app = app();
        app.go_to(Page::Badges);
        app.stamper = Some(StamperState::new("cachoeira-1"));
        app.go_to(Page::Profile);
        assert!(app.stamper.is_none());
    }
}
