use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileStats {
    pub collected: usize,
    pub total: usize,
}

impl ProfileStats {
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.collected as f32 / self.total as f32 * 100.0
        }
    }

    /// Fração 0..=1 para a barra de progresso.
    pub fn fraction(&self) -> f32 {
        (self.percent() / 100.0).clamp(0.0, 1.0)
    }
}

/// Índice da foto no carrossel do parque. Dá a volta nos dois sentidos.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Setas e pontos só aparecem com mais de uma foto.
    pub fn has_controls(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }
}

impl TrilhasApp {
    pub fn profile_stats(&self) -> ProfileStats {
        let total = self.catalog.badges().len();
        // ids órfãos no store não contam
        let collected = self
            .catalog
            .badges()
            .iter()
            .filter(|b| self.collected.contains(&b.id))
            .count();
        ProfileStats { collected, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_empty_catalog() {
        assert_eq!(ProfileStats { collected: 0, total: 0 }.percent(), 0.0);
        assert_eq!(ProfileStats { collected: 2, total: 8 }.percent(), 25.0);
        assert_eq!(ProfileStats { collected: 8, total: 8 }.fraction(), 1.0);
    }

    #[test]
    fn carousel_wraps_both_ways() {
        let mut c = Carousel::new(3);
        c.prev();
        assert_eq!(c.index(), 2);
        c.next();
        assert_eq!(c.index(), 0);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.index(), 0);
        assert!(c.has_controls());
    }

    #[test]
    fn carousel_without_photos_stays_put() {
        let mut c = Carousel::new(0);
        c.next();
        c.prev();
        assert_eq!(c.index(), 0);
        assert!(!Carousel::new(1).has_controls());
    }

    #[test]
    fn profile_counts_only_catalog_badges() {
        let mut app = crate::app::test_support::app();
        app.collected = CollectedBadges::from_ids(vec!["cachoeira-1".into(), "removido".into()]);
        let stats = app.profile_stats();
        assert_eq!(stats.collected, 1);
        assert_eq!(stats.total, 8);
    }
}
