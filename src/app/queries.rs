use super::*;
use crate::model::{Badge, Park};

impl TrilhasApp {
    pub fn current_park(&self) -> Option<&Park> {
        self.navigator.park().and_then(|id| self.catalog.park(id))
    }

    /// Badge do modal "Parabéns!". Fica guardado até a tela de boas-vindas sair.
    pub fn unlocked_badge(&self) -> Option<&Badge> {
        if self.show_welcome {
            return None;
        }
        self.navigator
            .unlocked_badge()
            .and_then(|id| self.catalog.badge(id))
    }

    pub fn stamper_badge(&self) -> Option<&Badge> {
        self.stamper
            .as_ref()
            .and_then(|s| self.catalog.badge(&s.badge_id))
    }

    /// Nome exibido: vazio cai no padrão.
    pub fn display_name(&self) -> &str {
        let name = self.user_name.trim();
        if name.is_empty() {
            crate::storage::DEFAULT_USER_NAME
        } else {
            name
        }
    }

    /// Cards da grade de parques, já filtrados.
    pub fn park_cards(&self) -> Vec<ParkCard> {
        self.catalog
            .filter_parks(&self.park_filter)
            .into_iter()
            .map(|park| ParkCard {
                id: park.id.clone(),
                short_name: park.short_name().to_owned(),
                location: park.location.clone(),
                difficulty: park.difficulty,
                cover: park.images.first().cloned(),
                badges_total: park.badge_ids.len(),
                badges_collected: park
                    .badge_ids
                    .iter()
                    .filter(|id| self.collected.contains(id))
                    .count(),
            })
            .collect()
    }

    pub fn badge_cards(&self) -> Vec<BadgeCard> {
        self.catalog
            .filter_badges(self.badge_filter, &self.collected)
            .into_iter()
            .map(|b| BadgeCard {
                id: b.id.clone(),
                name: b.name.clone(),
                description: b.description.clone(),
                collected: self.collected.contains(&b.id),
            })
            .collect()
    }

    pub fn park_badge_rows(&self, park: &Park) -> Vec<ParkBadgeRow> {
        self.catalog
            .badges_for_park(park)
            .into_iter()
            .map(|b| ParkBadgeRow {
                id: b.id.clone(),
                name: b.name.clone(),
                description: b.description.clone(),
                collected: self.collected.contains(&b.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::app;
    use crate::badges::{CollectedBadges, UnlockTrigger};
    use crate::catalog::{BadgeFilter, ParkFilter};
    use crate::model::Difficulty;

    #[test]
    fn unlock_modal_waits_for_welcome_screen() {
        let mut app = app();
        app.show_welcome = true;
        app.handle_unlock("cachoeira-1", UnlockTrigger::DeepLink);
        assert!(app.unlocked_badge().is_none());

        app.finish_welcome();
        assert_eq!(app.unlocked_badge().map(|b| b.id.as_str()), Some("cachoeira-1"));
    }

    #[test]
    fn park_cards_follow_filter_and_count_badges() {
        let mut app = app();
        app.collected = CollectedBadges::from_ids(vec!["cachoeira-1".into()]);
        app.park_filter = ParkFilter::Difficulty(Difficulty::Moderate);

        let cards = app.park_cards();
        assert!(cards.iter().all(|c| c.difficulty == Difficulty::Moderate));
        let ibitipoca = cards.iter().find(|c| c.id == "ibitipoca").unwrap();
        assert_eq!(ibitipoca.short_name, "do Ibitipoca");
        assert_eq!(ibitipoca.progress_label(), "1/3 badges");
    }

    #[test]
    fn badge_cards_mark_collected() {
        let mut app = app();
        app.collected = CollectedBadges::from_ids(vec!["janela-ceu".into()]);
        app.badge_filter = BadgeFilter::Collected;
        let cards = app.badge_cards();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].collected);
        assert_eq!(cards[0].label(), "🏅 Janela do Céu");
    }

    #[test]
    fn blank_user_name_displays_default() {
        let mut app = app();
        app.user_name = "   ".into();
        assert_eq!(app.display_name(), "Aventureiro(a)");
        app.user_name = " Ana ".into();
        assert_eq!(app.display_name(), "Ana");
    }
}
