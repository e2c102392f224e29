use crate::domain::ports::PersistenceAdapter;
use crate::error::{Result, WalletError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

/// All slots kept in a single JSON object file.
///
/// Every save rewrites the whole file through a temp file in the same
/// directory followed by a rename, so a crash leaves either the old or the
/// new contents on disk.
pub struct JsonFileStore {
    path: PathBuf,
    slots: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the file at `path`, starting empty if it does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let slots = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text).map_err(|e| {
                WalletError::Storage(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_atomic(path: &Path, slots: &BTreeMap<String, String>) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut temp, slots)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| {
        WalletError::Storage(format!("failed to replace {}: {}", path.display(), e.error))
    })?;
    Ok(())
}

#[async_trait]
impl PersistenceAdapter for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().await;
        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, value: String) -> Result<()> {
        // Held across the write so saves reach the file in order.
        let mut slots = self.slots.lock().await;
        let mut next = slots.clone();
        next.insert(key.to_string(), value);

        let path = self.path.clone();
        let next = tokio::task::spawn_blocking(move || write_atomic(&path, &next).map(|_| next))
            .await
            .map_err(|e| WalletError::Storage(format!("write task failed: {}", e)))??;

        *slots = next;
        debug!(key, path = %self.path.display(), "slot written");
        Ok(())
    }
}
