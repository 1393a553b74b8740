// src/data.rs

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{Badge, Park};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Deserialize)]
struct CatalogFile {
    badges: Vec<Badge>,
    parks: Vec<Park>,
}

/// Carrega o catálogo embutido no binário.
pub fn read_catalog_embedded() -> Result<Catalog, CatalogError> {
    parse_catalog(include_str!("data/catalog.yaml"))
}

/// Faz o parse e valida os invariantes do catálogo antes de entregá-lo ao app.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    validate(&file)?;
    log::debug!(
        "catalog loaded: {} parks, {} badges",
        file.parks.len(),
        file.badges.len()
    );
    Ok(Catalog::new(file.parks, file.badges))
}

fn validate(file: &CatalogFile) -> Result<(), CatalogError> {
    let mut badge_ids = HashSet::new();
    for badge in &file.badges {
        if !badge_ids.insert(badge.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                kind: "badge",
                id: badge.id.clone(),
            });
        }
    }

    let mut park_ids = HashSet::new();
    for park in &file.parks {
        if !park_ids.insert(park.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                kind: "park",
                id: park.id.clone(),
            });
        }

        if let Some(missing) = park.badge_ids.iter().find(|id| !badge_ids.contains(id.as_str())) {
            return Err(CatalogError::UnknownBadge {
                park: park.id.clone(),
                badge: missing.clone(),
            });
        }

        for (index, q) in park.quiz.iter().enumerate() {
            let invalid = |reason| CatalogError::InvalidQuestion {
                park: park.id.clone(),
                index,
                reason,
            };
            if q.options.is_empty() {
                return Err(invalid("question has no options"));
            }
            let unique: HashSet<&str> = q.options.iter().map(String::as_str).collect();
            if unique.len() != q.options.len() {
                return Err(invalid("options are not unique"));
            }
            if !q.has_option(&q.correct_answer) {
                return Err(invalid("correct answer is not one of the options"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = read_catalog_embedded().expect("embedded catalog must parse");
        assert!(!catalog.parks().is_empty());
        assert_eq!(
            catalog.badge("cachoeira-1").map(|b| b.name.as_str()),
            Some("Cachoeira")
        );
    }

    #[test]
    fn rejects_correct_answer_outside_options() {
        let yaml = r#"
badges: []
parks:
  - id: p1
    name: Parque
    location: MG
    description: d
    images: []
    difficulty: Fácil
    duration: 1h
    quiz:
      - question: q?
        options: [a, b]
        correctAnswer: c
"#;
        let err = parse_catalog(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuestion { index: 0, .. }));
    }

    #[test]
    fn rejects_duplicated_options() {
        let yaml = r#"
badges: []
parks:
  - id: p1
    name: Parque
    location: MG
    description: d
    images: []
    difficulty: Fácil
    duration: 1h
    quiz:
      - question: q?
        options: [a, a]
        correctAnswer: a
"#;
        assert!(matches!(
            parse_catalog(yaml),
            Err(CatalogError::InvalidQuestion { .. })
        ));
    }

    #[test]
    fn rejects_dangling_badge_reference() {
        let yaml = r#"
badges:
  - { id: b1, name: B, description: d, icon: i.png }
parks:
  - id: p1
    name: Parque
    location: MG
    description: d
    images: []
    difficulty: Moderada
    duration: 1h
    badgeIds: [b1, b2]
"#;
        match parse_catalog(yaml) {
            Err(CatalogError::UnknownBadge { park, badge }) => {
                assert_eq!(park, "p1");
                assert_eq!(badge, "b2");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejects_duplicate_badge_ids() {
        let yaml = r#"
badges:
  - { id: b1, name: B, description: d, icon: i.png }
  - { id: b1, name: C, description: d, icon: j.png }
parks: []
"#;
        assert!(matches!(
            parse_catalog(yaml),
            Err(CatalogError::DuplicateId { kind: "badge", .. })
        ));
    }
}
