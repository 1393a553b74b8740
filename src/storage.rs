// src/storage.rs
//
// Armazenamento chave-valor persistente. No navegador é o localStorage; no
// desktop é um arquivo JSON. Os valores são sempre JSON, como no localStorage.

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Chave tipada: nome no store + valor padrão quando ausente ou corrompido.
pub struct Key<T> {
    pub name: &'static str,
    default: fn() -> T,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> Key<T> {
    pub const fn new(name: &'static str, default: fn() -> T) -> Self {
        Self {
            name,
            default,
            _marker: PhantomData,
        }
    }

    pub fn default_value(&self) -> T {
        (self.default)()
    }

    pub fn load(&self, store: &dyn KeyValueStore) -> T {
        match store.get_raw(self.name) {
            None => self.default_value(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring corrupt value for `{}`: {err}", self.name);
                self.default_value()
            }),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        store.set_raw(self.name, raw)
    }
}

pub const DEFAULT_USER_NAME: &str = "Aventureiro(a)";

fn default_true() -> bool {
    true
}

fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_owned()
}

pub const SHOW_WELCOME: Key<bool> = Key::new("showWelcome", default_true);
pub const COLLECTED_BADGES: Key<Vec<String>> = Key::new("collectedBadges", Vec::new);
pub const USER_NAME: Key<String> = Key::new("userName", default_user_name);

/// Store em memória; conta as escritas para os testes.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}

/// Arquivo JSON `{ chave: "valor-json" }`, regravado inteiro a cada escrita.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Abre o arquivo; se não existir, começa vazio. Arquivo ilegível também começa vazio.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("store file {} is corrupt, starting empty: {err}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let previous = self.values.insert(key.to_owned(), value);
        if let Err(err) = self.flush() {
            // mantém memória e disco coerentes
            match previous {
                Some(v) => self.values.insert(key.to_owned(), v),
                None => self.values.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Browser("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Browser(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Browser("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.storage
            .set_item(key, &value)
            .map_err(|e| StoreError::Browser(format!("{e:?}")))
    }
}

/// Store da plataforma: localStorage no navegador, arquivo JSON no desktop.
/// Se o localStorage estiver bloqueado, o app segue só em memória.
#[cfg(target_arch = "wasm32")]
pub fn open_platform_store(_config: &crate::config::AppConfig) -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::error!("falling back to in-memory store: {err}");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_platform_store(config: &crate::config::AppConfig) -> Box<dyn KeyValueStore> {
    let store = JsonFileStore::open(&config.store_path);
    log::info!("progress store: {}", store.path().display());
    Box::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let store = MemoryStore::new();
        assert!(SHOW_WELCOME.load(&store));
        assert!(COLLECTED_BADGES.load(&store).is_empty());
        assert_eq!(USER_NAME.load(&store), "Aventureiro(a)");
    }

    #[test]
    fn values_are_stored_as_json() {
        let mut store = MemoryStore::new();
        COLLECTED_BADGES
            .save(&mut store, &vec!["cachoeira-1".to_owned()])
            .unwrap();
        assert_eq!(
            store.get_raw("collectedBadges").as_deref(),
            Some(r#"["cachoeira-1"]"#)
        );
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn corrupt_value_yields_default() {
        let mut store = MemoryStore::new();
        store.set_raw("showWelcome", "not json".into()).unwrap();
        assert!(SHOW_WELCOME.load(&store));
    }

    #[test]
    fn json_file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("trilhas-store-{}", std::process::id()));
        let path = dir.join("progress.json");
        let _ = std::fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path);
            USER_NAME.save(&mut store, &"Ana".to_owned()).unwrap();
            SHOW_WELCOME.save(&mut store, &false).unwrap();
        }

        let reopened = JsonFileStore::open(&path);
        assert_eq!(USER_NAME.load(&reopened), "Ana");
        assert!(!SHOW_WELCOME.load(&reopened));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
