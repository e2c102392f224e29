use super::contact::Contact;
use super::flow::FlowState;
use super::notification::Notification;
use std::fmt;

/// Everything a view needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSnapshot {
    pub state: FlowState,
    /// `$8,854.22`
    pub balance: String,
    /// `$8.9K`
    pub balance_short: String,
    pub unread_count: usize,
    /// Keypad text of the active entry screen.
    pub entry_display: Option<String>,
    /// Whether the primary button of the current screen is enabled.
    pub can_confirm: bool,
    pub notification_surface_open: bool,
    /// Newest first.
    pub notifications: Vec<Notification>,
    /// Contacts matching the current query on the send-to screen.
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// A short-lived banner mirroring a freshly delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
}
