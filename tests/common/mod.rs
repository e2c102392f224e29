#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use walletflow::application::controller::FlowController;
use walletflow::application::wallet::Wallet;
use walletflow::config::WalletConfig;
use walletflow::domain::contact::ContactDirectory;
use walletflow::domain::flow::{Intent, Outcome};
use walletflow::domain::ledger::Balance;
use walletflow::domain::ports::{PersistenceAdapter, PersistenceBox};
use walletflow::error::{Result, WalletError};
use walletflow::infrastructure::in_memory::InMemoryStore;
use walletflow::interfaces::headless::HeadlessView;

pub struct Harness {
    pub controller: FlowController,
    pub wallet: Wallet,
    pub view: HeadlessView,
}

impl Harness {
    pub async fn with_store(store: PersistenceBox, starting_balance: Decimal) -> Self {
        let view = HeadlessView::new();
        let wallet = Wallet::hydrate(store, Balance::new(starting_balance).unwrap())
            .await
            .unwrap();
        let controller = FlowController::new(
            WalletConfig::default(),
            ContactDirectory::default(),
            Box::new(view.clone()),
        );
        Self {
            controller,
            wallet,
            view,
        }
    }

    pub async fn new() -> Self {
        let starting = WalletConfig::default().starting_balance;
        Self::with_store(Box::new(InMemoryStore::new()), starting).await
    }

    pub async fn send(&mut self, intent: Intent) -> Outcome {
        self.controller
            .handle(&mut self.wallet, intent)
            .await
            .unwrap()
    }

    pub async fn keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.send(Intent::AppendDigit(c)).await;
        }
    }

    /// Applies the next timer event; false when nothing is scheduled.
    pub async fn tick(&mut self) -> bool {
        self.controller.advance(&mut self.wallet).await.unwrap()
    }

    pub async fn settle(&mut self) {
        self.controller.settle(&mut self.wallet).await.unwrap();
    }
}

/// An in-memory store whose writes can be switched off.
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PersistenceAdapter for FlakyStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, value: String) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(WalletError::Storage(format!("cannot write '{}'", key)));
        }
        self.inner.save(key, value).await
    }
}
