use crate::domain::ledger::Balance;
use crate::domain::notification::{Notification, NotificationStore};
use crate::domain::ports::PersistenceBox;
use crate::error::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Slot holding the balance as decimal text.
pub const BALANCE_KEY: &str = "cash_balance";
/// Slot holding the notification history as a JSON array.
pub const NOTIFICATIONS_KEY: &str = "notification_history";

/// The process-wide state of the wallet: balance and notification history.
///
/// Passed explicitly to the flow controller. Every mutation commits in
/// memory first and is then written through to the persistence adapter,
/// each slot independently.
pub struct Wallet {
    balance: Balance,
    notifications: NotificationStore,
    store: PersistenceBox,
}

impl Wallet {
    /// Loads both slots, falling back to `starting_balance` and an empty
    /// history for slots that were never written.
    pub async fn hydrate(store: PersistenceBox, starting_balance: Balance) -> Result<Self> {
        let balance = match store.load(BALANCE_KEY).await? {
            Some(text) => Balance::from_storage_string(&text)?,
            None => starting_balance,
        };
        let notifications = match store.load(NOTIFICATIONS_KEY).await? {
            Some(text) => serde_json::from_str(&text)?,
            None => NotificationStore::new(),
        };
        info!(
            balance = %balance,
            notifications = notifications.len(),
            unread = notifications.unread_count(),
            "wallet hydrated"
        );
        Ok(Self {
            balance,
            notifications,
            store,
        })
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Adds `amount` to the balance. Guard failures leave everything untouched.
    pub async fn credit(&mut self, amount: Decimal) -> Result<Balance> {
        let next = self.balance.credit(amount)?;
        self.commit_balance(next).await?;
        info!(amount = %amount, balance = %self.balance, "credit committed");
        Ok(self.balance)
    }

    /// Removes `amount` from the balance. Guard failures leave everything untouched.
    pub async fn debit(&mut self, amount: Decimal) -> Result<Balance> {
        let next = self.balance.debit(amount)?;
        self.commit_balance(next).await?;
        info!(amount = %amount, balance = %self.balance, "debit committed");
        Ok(self.balance)
    }

    /// Records a delivered notification and returns a copy of it.
    pub async fn notify(&mut self, message: &str, at: DateTime<Utc>) -> Result<Notification> {
        let mut next = self.notifications.clone();
        let notification = next.append(message, at).clone();
        self.commit_notifications(next).await?;
        debug!(unread = self.notifications.unread_count(), "notification appended");
        Ok(notification)
    }

    /// Marks the whole history read. Writes only when something changed.
    pub async fn mark_all_read(&mut self) -> Result<bool> {
        let mut next = self.notifications.clone();
        if !next.mark_all_read() {
            return Ok(false);
        }
        self.commit_notifications(next).await?;
        Ok(true)
    }

    // The in-memory value only moves once the store has accepted it.
    async fn commit_balance(&mut self, next: Balance) -> Result<()> {
        self.store
            .save(BALANCE_KEY, next.to_storage_string())
            .await?;
        self.balance = next;
        Ok(())
    }

    async fn commit_notifications(&mut self, next: NotificationStore) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.store.save(NOTIFICATIONS_KEY, json).await?;
        self.notifications = next;
        Ok(())
    }
}
