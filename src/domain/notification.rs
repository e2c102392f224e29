use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A delivered notification as it is kept in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Newest-first notification history with a cached unread counter.
///
/// Only the `read` flag of an entry ever changes, and only from `false` to
/// `true`. Serializes as the bare entry list; the counter is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Notification>", into = "Vec<Notification>")]
pub struct NotificationStore {
    entries: Vec<Notification>,
    unread: usize,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Notification>) -> Self {
        let unread = entries.iter().filter(|n| !n.read).count();
        Self { entries, unread }
    }

    /// Prepends an unread notification and returns it.
    pub fn append(&mut self, message: impl Into<String>, timestamp: DateTime<Utc>) -> &Notification {
        self.entries.insert(
            0,
            Notification {
                message: message.into(),
                timestamp,
                read: false,
            },
        );
        self.unread += 1;
        &self.entries[0]
    }

    /// Marks every entry read. Returns whether anything changed.
    pub fn mark_all_read(&mut self) -> bool {
        if self.unread == 0 {
            return false;
        }
        for entry in &mut self.entries {
            entry.read = true;
        }
        self.unread = 0;
        true
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the cached counter agrees with the entries.
    pub fn is_consistent(&self) -> bool {
        self.unread == self.entries.iter().filter(|n| !n.read).count()
    }
}

impl From<Vec<Notification>> for NotificationStore {
    fn from(entries: Vec<Notification>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<NotificationStore> for Vec<Notification> {
    fn from(store: NotificationStore) -> Self {
        store.entries
    }
}
