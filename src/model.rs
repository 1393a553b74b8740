use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[serde(rename = "Fácil")]
    Easy,
    #[serde(rename = "Moderada")]
    Moderate,
    #[serde(rename = "Difícil")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Moderate => "Moderada",
            Difficulty::Hard => "Difícil",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String, // caminho relativo dentro de assets/
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub images: Vec<String>,
    pub difficulty: Difficulty,
    pub duration: String,
    #[serde(default)]
    pub badge_ids: Vec<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Park {
    /// Nome sem o prefixo "Parque Estadual", usado nos cards da grade.
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix("Parque Estadual ")
            .or_else(|| self.name.strip_prefix("Parque Estadual"))
            .unwrap_or(&self.name)
            .trim()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Páginas de topo. O detalhe de parque fica por cima delas, ver `app::navigation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Parks,
    Badges,
    Profile,
}
