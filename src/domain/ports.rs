use super::view::{Alert, AlertId, FlowSnapshot};
use crate::error::Result;
use async_trait::async_trait;

/// Durable string-keyed slots that survive process restarts.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>>;
    async fn save(&self, key: &str, value: String) -> Result<()>;
}

pub type PersistenceBox = Box<dyn PersistenceAdapter>;

/// The presentation side of the wallet.
pub trait ViewPort: Send {
    fn render(&mut self, snapshot: &FlowSnapshot);
    fn show_alert(&mut self, alert: &Alert);
    fn hide_alert(&mut self, id: AlertId);
}

pub type ViewPortBox = Box<dyn ViewPort>;
