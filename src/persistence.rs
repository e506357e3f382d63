//! Named systems in a local key-value JSON store.
//!
//! The store keeps every saved system under the `savedSystems` key as one
//! list; saving rewrites the whole list. There is no versioning.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy::log::{debug, info};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{OrreryError, Result};
use crate::generators::CustomBody;

/// Key under which saved systems live in the store.
pub const SAVED_SYSTEMS_KEY: &str = "savedSystems";

/// Persisted form of one body.
pub type SavedBody = CustomBody;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSystem {
    pub name: String,
    #[serde(rename = "planets")]
    pub bodies: Vec<SavedBody>,
    pub created_at: DateTime<Utc>,
}

/// Backend holding the list of saved systems.
pub trait SystemStore {
    fn load_named_systems(&self) -> Result<Vec<SavedSystem>>;

    fn save_named_systems(&mut self, systems: &[SavedSystem]) -> Result<()>;
}

/// Replace the entry with the same name in place, or append.
pub fn upsert(systems: &mut Vec<SavedSystem>, system: SavedSystem) {
    match systems.iter_mut().find(|existing| existing.name == system.name) {
        Some(existing) => *existing = system,
        None => systems.push(system),
    }
}

/// JSON object file acting as a key-value store. Other keys are preserved.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No store at {}, starting empty", self.path.display());
                return Ok(Map::new());
            }
            Err(source) => {
                return Err(OrreryError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(OrreryError::StoreNotObject {
                path: self.path.clone(),
            }),
        }
    }
}

impl SystemStore for JsonFileStore {
    fn load_named_systems(&self) -> Result<Vec<SavedSystem>> {
        let mut object = self.read_object()?;
        match object.remove(SAVED_SYSTEMS_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_named_systems(&mut self, systems: &[SavedSystem]) -> Result<()> {
        let mut object = self.read_object()?;
        object.insert(SAVED_SYSTEMS_KEY.to_string(), serde_json::to_value(systems)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| OrreryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(object))?;
        fs::write(&self.path, text).map_err(|source| OrreryError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Wrote {} saved systems to {}", systems.len(), self.path.display());
        Ok(())
    }
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub systems: Vec<SavedSystem>,
    pub writes: usize,
}

impl SystemStore for MemoryStore {
    fn load_named_systems(&self) -> Result<Vec<SavedSystem>> {
        Ok(self.systems.clone())
    }

    fn save_named_systems(&mut self, systems: &[SavedSystem]) -> Result<()> {
        self.systems = systems.to_vec();
        self.writes += 1;
        Ok(())
    }
}
