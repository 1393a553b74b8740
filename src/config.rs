// src/config.rs
//
// Configuração do app. No desktop vem de variáveis de ambiente; no WASM, dos
// valores fixados no build (`option_env!`). Valores inválidos caem no padrão.

use crate::quiz::DEFAULT_FEEDBACK_DELAY;
use std::path::PathBuf;
use std::time::Duration;

pub const APP_NAME: &str = "Trilhas de Minas";
pub const ARTIFACT_PREFIX: &str = "trilhas-de-minas";
pub const DEFAULT_STAMP_WIDTH: u32 = 800;
pub const DEFAULT_DEEP_LINK_PARAM: &str = "unlock_badge";
const STORE_FILE: &str = "trilhas_progress.json";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub feedback_delay: Duration,
    pub stamp_width: u32,
    pub store_path: PathBuf,
    pub assets_dir: PathBuf,
    pub export_dir: PathBuf,
    pub deep_link_param: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            stamp_width: DEFAULT_STAMP_WIDTH,
            store_path: PathBuf::from(STORE_FILE),
            assets_dir: PathBuf::from("assets"),
            export_dir: PathBuf::from("."),
            deep_link_param: DEFAULT_DEEP_LINK_PARAM.to_owned(),
        }
    }
}

impl AppConfig {
    /// Monta a configuração a partir de uma função de consulta de chaves.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        if let Some(ms) = get("TRILHAS_QUIZ_FEEDBACK_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => config.feedback_delay = Duration::from_millis(ms),
                Err(err) => log::warn!("invalid TRILHAS_QUIZ_FEEDBACK_MS `{ms}`: {err}"),
            }
        }
        if let Some(width) = get("TRILHAS_STAMP_WIDTH") {
            match width.parse::<u32>() {
                Ok(w) if w > 0 => config.stamp_width = w,
                _ => log::warn!("invalid TRILHAS_STAMP_WIDTH `{width}`, using {DEFAULT_STAMP_WIDTH}"),
            }
        }
        if let Some(path) = get("TRILHAS_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }
        if let Some(dir) = get("TRILHAS_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("TRILHAS_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        if let Some(param) = get("TRILHAS_DEEP_LINK_PARAM") {
            config.deep_link_param = param;
        }
        config
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok());
        if std::env::var("TRILHAS_STORE_PATH").is_err() {
            if let Some(dir) = eframe::storage_dir(APP_NAME) {
                config.store_path = dir.join(STORE_FILE);
            }
        }
        config
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "TRILHAS_QUIZ_FEEDBACK_MS" => option_env!("TRILHAS_QUIZ_FEEDBACK_MS"),
                "TRILHAS_STAMP_WIDTH" => option_env!("TRILHAS_STAMP_WIDTH"),
                "TRILHAS_DEEP_LINK_PARAM" => option_env!("TRILHAS_DEEP_LINK_PARAM"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_app_constants() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.feedback_delay, Duration::from_millis(1500));
        assert_eq!(config.stamp_width, 800);
        assert_eq!(config.deep_link_param, "unlock_badge");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TRILHAS_QUIZ_FEEDBACK_MS", "250"),
            ("TRILHAS_STAMP_WIDTH", "1080"),
            ("TRILHAS_EXPORT_DIR", "/tmp/fotos"),
        ]));
        assert_eq!(config.feedback_delay, Duration::from_millis(250));
        assert_eq!(config.stamp_width, 1080);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/fotos"));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TRILHAS_QUIZ_FEEDBACK_MS", "soon"),
            ("TRILHAS_STAMP_WIDTH", "0"),
            ("TRILHAS_DEEP_LINK_PARAM", "   "),
        ]));
        assert_eq!(config, AppConfig::default());
    }
}
