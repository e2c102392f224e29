use crate::domain::ledger::Balance;
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Tunables of the simulated wallet.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Balance used when nothing has been persisted yet.
    pub starting_balance: Decimal,
    /// How long the processing spinner runs.
    pub processing_delay_ms: u64,
    /// Gap between a success screen and its history entry.
    pub success_notification_delay_ms: u64,
    /// How long a transient alert stays up.
    pub alert_duration_ms: u64,
    /// Destination named in cash-out copy.
    pub bank_name: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: dec!(8854.22),
            processing_delay_ms: 2500,
            success_notification_delay_ms: 1000,
            alert_duration_ms: 5000,
            bank_name: "Chase Bank".to_string(),
        }
    }
}

impl WalletConfig {
    /// Reads a JSON config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            WalletError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn starting_balance(&self) -> Result<Balance> {
        Balance::new(self.starting_balance)
            .map_err(|e| WalletError::Config(format!("starting_balance: {}", e)))
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn success_notification_delay(&self) -> Duration {
        Duration::from_millis(self.success_notification_delay_ms)
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_millis(self.alert_duration_ms)
    }
}
