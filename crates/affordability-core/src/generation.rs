//! Generation counter: how many computation sheets have been produced.
//!
//! The counter lives in an external key-value store so it survives between
//! sessions. The core only needs `get`/`set`/`clear` on one fixed key.

use std::collections::HashMap;
use tracing::info;

use crate::AffordabilityResult;

/// Key the counter is stored under.
pub const GENERATION_KEY: &str = "computeMeGeneration";

/// Minimal key-value store the counter persists through.
pub trait GenerationStore {
    fn get(&self, key: &str) -> AffordabilityResult<Option<u64>>;
    fn set(&mut self, key: &str, value: u64) -> AffordabilityResult<()>;
    fn clear(&mut self, key: &str) -> AffordabilityResult<()>;
}

/// Process-local store, used by tests and one-shot runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryGenerationStore {
    values: HashMap<String, u64>,
}

impl GenerationStore for MemoryGenerationStore {
    fn get(&self, key: &str) -> AffordabilityResult<Option<u64>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> AffordabilityResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&mut self, key: &str) -> AffordabilityResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Monotonic counter over a [`GenerationStore`].
pub struct GenerationCounter<S: GenerationStore> {
    store: S,
}

impl<S: GenerationStore> GenerationCounter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current generation; 0 before anything has been generated.
    pub fn current(&self) -> AffordabilityResult<u64> {
        Ok(self.store.get(GENERATION_KEY)?.unwrap_or(0))
    }

    /// Generation the next [`advance`](Self::advance) will produce. Nothing
    /// is persisted.
    pub fn peek_next(&self) -> AffordabilityResult<u64> {
        Ok(self.current()?.saturating_add(1))
    }

    /// Bump and persist the counter, returning the new generation.
    pub fn advance(&mut self) -> AffordabilityResult<u64> {
        let next = self.peek_next()?;
        self.store.set(GENERATION_KEY, next)?;
        info!(generation = next, "advanced generation counter");
        Ok(next)
    }

    /// Forget the counter entirely; the next advance yields 1.
    pub fn reset(&mut self) -> AffordabilityResult<()> {
        self.store.clear(GENERATION_KEY)?;
        info!("cleared generation counter");
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
