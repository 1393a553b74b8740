// src/badges.rs
//
// Motor de desbloqueio de badges. QR Code e deep link passam pela mesma
// função, então o comportamento não depende da origem.

use crate::catalog::Catalog;
use crate::error::UnlockError;
use crate::model::Badge;
use crate::storage::{COLLECTED_BADGES, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conjunto ordenado de ids coletados. Só cresce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedBadges(Vec<String>);

impl CollectedBadges {
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut set = Self::default();
        for id in ids {
            set.insert(&id);
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|b| b == id)
    }

    /// Devolve `true` se o id era novo.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            false
        } else {
            self.0.push(id.to_owned());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn is_superset_of(&self, other: &CollectedBadges) -> bool {
        other.0.iter().all(|id| self.contains(id))
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self::from_ids(COLLECTED_BADGES.load(store))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockTrigger {
    QrScan,
    DeepLink,
}

impl fmt::Display for UnlockTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnlockTrigger::QrScan => "qr-scan",
            UnlockTrigger::DeepLink => "deep-link",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockOutcome {
    pub collected: CollectedBadges,
    pub badge: Badge,
    pub already_owned: bool,
}

/// Decisão pura: não toca no store.
pub fn unlock(
    catalog: &Catalog,
    badge_id: &str,
    collected: &CollectedBadges,
) -> Result<UnlockOutcome, UnlockError> {
    let badge = catalog
        .badge(badge_id)
        .ok_or_else(|| UnlockError::NotFound(badge_id.to_owned()))?;

    let mut next = collected.clone();
    let already_owned = !next.insert(&badge.id);

    Ok(UnlockOutcome {
        collected: next,
        badge: badge.clone(),
        already_owned,
    })
}

/// Aplica o desbloqueio ao conjunto do usuário e persiste.
/// Uma escrita por badge novo; nenhuma quando já era dele ou o id é inválido.
/// Se a escrita falhar, o conjunto em memória fica como estava.
pub fn apply_unlock(
    catalog: &Catalog,
    store: &mut dyn KeyValueStore,
    collected: &mut CollectedBadges,
    badge_id: &str,
    trigger: UnlockTrigger,
) -> Result<UnlockOutcome, UnlockError> {
    let outcome = match unlock(catalog, badge_id, collected) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("unlock via {trigger} rejected: {err}");
            return Err(err);
        }
    };

    if outcome.already_owned {
        log::info!("badge `{}` re-displayed via {trigger} (already owned)", outcome.badge.id);
        return Ok(outcome);
    }

    COLLECTED_BADGES
        .save(store, &outcome.collected.ids().to_vec())
        .inspect_err(|err| log::error!("failed to persist badge `{badge_id}`: {err}"))?;

    *collected = outcome.collected.clone();
    log::info!(
        "badge `{}` unlocked via {trigger} ({} collected)",
        outcome.badge.id,
        collected.len()
    );
    Ok(outcome)
}
