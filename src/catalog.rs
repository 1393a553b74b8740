use crate::badges::CollectedBadges;
use crate::model::{Badge, Difficulty, Park};

/// Catálogo estático de parques e badges. Só leitura depois de carregado.
#[derive(Debug, Clone)]
pub struct Catalog {
    parks: Vec<Park>,
    badges: Vec<Badge>,
}

/// Rótulos da barra de filtros da lista de parques, na ordem exibida.
pub const PARK_FILTER_LABELS: [&str; 8] = [
    "Todos",
    "Fácil",
    "Moderada",
    "Difícil",
    "Cachoeira",
    "Gruta",
    "Pico",
    "Trilha Histórica",
];

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ParkFilter {
    #[default]
    All,
    Difficulty(Difficulty),
    Tag(String),
}

impl ParkFilter {
    /// "Todos" e as dificuldades têm significado próprio; qualquer outro rótulo é tag.
    pub fn from_label(label: &str) -> Self {
        if label == "Todos" {
            ParkFilter::All
        } else if let Some(d) = Difficulty::from_label(label) {
            ParkFilter::Difficulty(d)
        } else {
            ParkFilter::Tag(label.to_owned())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ParkFilter::All => "Todos",
            ParkFilter::Difficulty(d) => d.label(),
            ParkFilter::Tag(t) => t,
        }
    }

    pub fn matches(&self, park: &Park) -> bool {
        match self {
            ParkFilter::All => true,
            ParkFilter::Difficulty(d) => park.difficulty == *d,
            ParkFilter::Tag(t) => park.has_tag(t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BadgeFilter {
    #[default]
    All,
    Collected,
    NotCollected,
}

impl BadgeFilter {
    pub const ALL: [BadgeFilter; 3] = [
        BadgeFilter::All,
        BadgeFilter::Collected,
        BadgeFilter::NotCollected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BadgeFilter::All => "Todos",
            BadgeFilter::Collected => "Conquistados",
            BadgeFilter::NotCollected => "Não Conquistados",
        }
    }
}

impl Catalog {
    pub fn new(parks: Vec<Park>, badges: Vec<Badge>) -> Self {
        Self { parks, badges }
    }

    pub fn parks(&self) -> &[Park] {
        &self.parks
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn park(&self, id: &str) -> Option<&Park> {
        self.parks.iter().find(|p| p.id == id)
    }

    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// Badges do parque na ordem declarada; ids sem badge são ignorados.
    pub fn badges_for_park(&self, park: &Park) -> Vec<&Badge> {
        park.badge_ids.iter().filter_map(|id| self.badge(id)).collect()
    }

    pub fn filter_parks(&self, filter: &ParkFilter) -> Vec<&Park> {
        self.parks.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn filter_badges(&self, filter: BadgeFilter, collected: &CollectedBadges) -> Vec<&Badge> {
        self.badges
            .iter()
            .filter(|b| match filter {
                BadgeFilter::All => true,
                BadgeFilter::Collected => collected.contains(&b.id),
                BadgeFilter::NotCollected => !collected.contains(&b.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_catalog_embedded;

    fn catalog() -> Catalog {
        read_catalog_embedded().unwrap()
    }

    #[test]
    fn todos_returns_every_park() {
        let c = catalog();
        let all = c.filter_parks(&ParkFilter::from_label("Todos"));
        assert_eq!(all.len(), c.parks().len());
    }

    #[test]
    fn difficulty_filter_returns_exactly_matching_parks() {
        let c = catalog();
        for d in Difficulty::ALL {
            let filtered = c.filter_parks(&ParkFilter::from_label(d.label()));
            let expected: Vec<&str> = c
                .parks()
                .iter()
                .filter(|p| p.difficulty == d)
                .map(|p| p.id.as_str())
                .collect();
            let got: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(got, expected, "filter {d}");
        }
    }

    #[test]
    fn tag_filter_uses_park_tags() {
        let c = catalog();
        let caves = c.filter_parks(&ParkFilter::from_label("Gruta"));
        assert!(!caves.is_empty());
        assert!(caves.iter().all(|p| p.has_tag("Gruta")));
    }

    #[test]
    fn badge_filter_splits_collected_and_missing() {
        let c = catalog();
        let mut collected = CollectedBadges::default();
        collected.insert("cachoeira-1");

        let got = c.filter_badges(BadgeFilter::Collected, &collected);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "cachoeira-1");

        let missing = c.filter_badges(BadgeFilter::NotCollected, &collected);
        assert_eq!(missing.len(), c.badges().len() - 1);
        assert_eq!(c.filter_badges(BadgeFilter::All, &collected).len(), c.badges().len());
    }

    #[test]
    fn badges_for_park_follow_declared_order() {
        let c = catalog();
        let park = c.park("ibitipoca").unwrap();
        let ids: Vec<&str> = c.badges_for_park(park).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["cachoeira-1", "janela-ceu", "gruta-bromelias"]);
    }
}
