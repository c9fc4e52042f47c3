//! Saved Pokemon roster and its key-value JSON persistence.
//!
//! The whole roster is stored as one JSON array under [`STORAGE_KEY`]. Reads
//! never fail outright: a missing or unreadable blob falls back to the
//! bundled default roster.

use crate::errors::{RosterError, RosterResult};
use serde_json::Map;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{error, info, warn};

pub use schema::{BaseStats, RosterEntry};

/// Key the roster blob is stored under.
pub const STORAGE_KEY: &str = "POKEMON_DATA";

const BUNDLED_ROSTER: &str = include_str!("../data/default_roster.ron");

static DEFAULT_ROSTER: LazyLock<Result<Vec<RosterEntry>, String>> =
    LazyLock::new(|| ron::from_str(BUNDLED_ROSTER).map_err(|e| e.to_string()));

/// The three starter Pokemon shipped with the app.
pub fn default_roster() -> RosterResult<Vec<RosterEntry>> {
    DEFAULT_ROSTER.clone().map_err(RosterError::Bundled)
}

fn fallback_roster() -> Vec<RosterEntry> {
    default_roster().unwrap_or_else(|e| {
        error!("{}", e);
        Vec::new()
    })
}

/// Read-only access to the Pokemon a combatant can be filled from.
pub trait RosterProvider {
    fn list_pokemon(&self) -> Vec<RosterEntry>;
}

impl RosterProvider for Vec<RosterEntry> {
    fn list_pokemon(&self) -> Vec<RosterEntry> {
        self.clone()
    }
}

/// String blobs stored under string keys.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> RosterResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: String) -> RosterResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> RosterResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> RosterResult<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> RosterResult<Map<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> RosterResult<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    fn set_item(&mut self, key: &str, value: String) -> RosterResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), serde_json::Value::String(value));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

/// Roster persistence on top of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PokemonStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PokemonStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the saved roster without writing anything.
    ///
    /// Missing or unreadable data yields the default roster.
    pub fn read_all(&self) -> Vec<RosterEntry> {
        match self.store.get_item(STORAGE_KEY) {
            Ok(Some(data)) => match serde_json::from_str(&data) {
                Ok(roster) => roster,
                Err(e) => {
                    error!("error parsing saved roster, using defaults: {}", e);
                    fallback_roster()
                }
            },
            Ok(None) => fallback_roster(),
            Err(e) => {
                error!("error loading roster, using defaults: {}", e);
                fallback_roster()
            }
        }
    }

    /// Like [`read_all`](Self::read_all), but seeds the store with the default
    /// roster the first time it is read.
    pub fn get_all(&mut self) -> Vec<RosterEntry> {
        match self.store.get_item(STORAGE_KEY) {
            Ok(None) => {
                let roster = fallback_roster();
                info!("no saved roster; seeding {} default entries", roster.len());
                if let Err(e) = self.save_all(&roster) {
                    error!("error saving default roster: {}", e);
                }
                roster
            }
            _ => self.read_all(),
        }
    }

    pub fn save_all(&mut self, roster: &[RosterEntry]) -> RosterResult<()> {
        let data = serde_json::to_string(roster)?;
        self.store.set_item(STORAGE_KEY, data)
    }

    /// Adds a Pokemon with the next free id and returns the stored entry.
    pub fn add_pokemon(&mut self, mut entry: RosterEntry) -> RosterResult<RosterEntry> {
        validate_entry(&entry)?;
        let mut roster = self.get_all();
        entry.id = roster.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        roster.push(entry.clone());
        self.save_all(&roster)?;
        Ok(entry)
    }

    /// Replaces the entry with the same id. Returns whether one was found.
    pub fn update_pokemon(&mut self, entry: RosterEntry) -> RosterResult<bool> {
        validate_entry(&entry)?;
        let mut roster = self.get_all();
        let Some(slot) = roster.iter_mut().find(|p| p.id == entry.id) else {
            warn!(id = entry.id, "update for unknown roster id ignored");
            return Ok(false);
        };
        *slot = entry;
        self.save_all(&roster)?;
        Ok(true)
    }

    /// Removes the entry with `id`. Returns whether one was removed.
    pub fn delete_pokemon(&mut self, id: u32) -> RosterResult<bool> {
        let mut roster = self.get_all();
        let before = roster.len();
        roster.retain(|p| p.id != id);
        if roster.len() == before {
            return Ok(false);
        }
        self.save_all(&roster)?;
        Ok(true)
    }
}

impl<S: KeyValueStore> RosterProvider for PokemonStorage<S> {
    fn list_pokemon(&self) -> Vec<RosterEntry> {
        self.read_all()
    }
}

fn validate_entry(entry: &RosterEntry) -> RosterResult<()> {
    if entry.name.trim().is_empty() {
        return Err(RosterError::InvalidEntry("name is required".to_string()));
    }
    if entry.types.is_empty() || entry.types.len() > 2 {
        return Err(RosterError::InvalidEntry(format!(
            "{} needs one or two types, has {}",
            entry.name,
            entry.types.len()
        )));
    }
    Ok(())
}
