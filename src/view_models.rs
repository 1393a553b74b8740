// src/view_models.rs

use crate::model::Difficulty;

#[derive(Clone, Debug)]
pub struct ParkCard {
    pub id: String,
    pub short_name: String,
    pub location: String,
    pub difficulty: Difficulty,
    pub cover: Option<String>, // primeira foto
    pub badges_total: usize,
    pub badges_collected: usize,
}

#[derive(Clone, Debug)]
pub struct BadgeCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub collected: bool,
}

/// Linha da aba "Atividades (Badges)" no detalhe do parque.
#[derive(Clone, Debug)]
pub struct ParkBadgeRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub collected: bool,
}

impl ParkCard {
    pub fn label(&self) -> String {
        if self.badges_total > 0 && self.badges_collected == self.badges_total {
            format!("{} ✅", self.short_name)
        } else {
            self.short_name.clone()
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{} badges", self.badges_collected, self.badges_total)
    }
}

impl BadgeCard {
    pub fn label(&self) -> String {
        if self.collected {
            format!("🏅 {}", self.name)
        } else {
            format!("🔒 {}", self.name)
        }
    }
}
