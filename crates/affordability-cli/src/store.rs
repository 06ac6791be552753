use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use affordability_core::generation::GenerationStore;
use affordability_core::{AffordabilityError, AffordabilityResult};

/// Generation store backed by a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> AffordabilityResult<BTreeMap<String, u64>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            AffordabilityError::Store(format!("failed to read '{}': {}", self.path.display(), e))
        })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            AffordabilityError::Store(format!("failed to parse '{}': {}", self.path.display(), e))
        })
    }

    fn save(&self, values: &BTreeMap<String, u64>) -> AffordabilityResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AffordabilityError::Store(format!("failed to create '{}': {}", parent.display(), e))
            })?;
        }
        let contents = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, contents).map_err(|e| {
            AffordabilityError::Store(format!("failed to write '{}': {}", self.path.display(), e))
        })
    }
}

impl GenerationStore for JsonFileStore {
    fn get(&self, key: &str) -> AffordabilityResult<Option<u64>> {
        Ok(self.load()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> AffordabilityResult<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.save(&values)
    }

    fn clear(&mut self, key: &str) -> AffordabilityResult<()> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}
