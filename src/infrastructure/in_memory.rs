use crate::domain::ports::PersistenceAdapter;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory slot store.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>`, so clones share the same
/// slots. A clone handed to a second `Wallet` behaves like a restart against
/// the same device storage.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceAdapter for InMemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.read().await;
        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, value: String) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}
