use super::amount_entry::AmountEntry;
use super::contact::Contact;
use super::ledger::Amount;
use crate::error::{Result, WalletError};
use std::fmt;

/// Which cash flow produced a success screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashKind {
    CashOut,
    AddCash,
}

impl CashKind {
    /// Text of the history entry delivered after the success screen.
    pub fn notification_message(self, amount: &Amount, bank_name: &str) -> String {
        match self {
            CashKind::CashOut => format!(
                "You successfully cashed out ${} to {}. Funds will be available instantly.",
                amount.to_grouped_string(),
                bank_name
            ),
            CashKind::AddCash => format!(
                "A deposit of ${} is now available in your Cash App. Open the app to view details.",
                amount.to_grouped_string()
            ),
        }
    }
}

/// What happens when the processing spinner finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    CashOut { amount: Amount },
    AddCash { amount: Amount },
    Confirmation { payee: Contact, amount: String },
}

impl Completion {
    /// A peer payment carries only the display amount, never a ledger change.
    pub fn confirmation(payee: Option<&Contact>, amount: &str) -> Result<Self> {
        let payee = payee.ok_or(WalletError::NoPayeeSelected)?;
        Ok(Completion::Confirmation {
            payee: payee.clone(),
            amount: amount.to_string(),
        })
    }
}

/// The screen the wallet is on. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Search {
        query: String,
    },
    CashOutEntry {
        entry: AmountEntry,
    },
    AddCashEntry {
        entry: AmountEntry,
    },
    DollarEntry {
        entry: AmountEntry,
    },
    SendToSelect {
        /// Display string captured from the dollar keypad, e.g. `$12.5`.
        amount: String,
        payee: Option<Contact>,
        query: String,
    },
    Processing {
        title: String,
        subtitle: String,
        completion: Completion,
    },
    CashSuccess {
        kind: CashKind,
        amount: String,
    },
    PeerConfirmation {
        payee: Contact,
        amount: String,
    },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Search { .. } => "search",
            FlowState::CashOutEntry { .. } => "cash_out_entry",
            FlowState::AddCashEntry { .. } => "add_cash_entry",
            FlowState::DollarEntry { .. } => "dollar_entry",
            FlowState::SendToSelect { .. } => "send_to_select",
            FlowState::Processing { .. } => "processing",
            FlowState::CashSuccess { .. } => "cash_success",
            FlowState::PeerConfirmation { .. } => "peer_confirmation",
        }
    }

    /// The keypad buffer of an entry screen.
    pub fn entry(&self) -> Option<&AmountEntry> {
        match self {
            FlowState::CashOutEntry { entry }
            | FlowState::AddCashEntry { entry }
            | FlowState::DollarEntry { entry } => Some(entry),
            _ => None,
        }
    }

    pub fn entry_mut(&mut self) -> Option<&mut AmountEntry> {
        match self {
            FlowState::CashOutEntry { entry }
            | FlowState::AddCashEntry { entry }
            | FlowState::DollarEntry { entry } => Some(entry),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FlowState::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, FlowState::Processing { .. })
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user action forwarded by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenCashOut,
    OpenAddCash,
    OpenDollarPay,
    OpenSearch,
    Close,
    AppendDigit(char),
    Backspace,
    Confirm,
    Pay,
    /// Pick a contact from the dropdown; always selects.
    SelectPayee(String),
    /// Tap a contact in the roster; a second tap clears the selection.
    TogglePayee(String),
    SearchQueryChanged(String),
    OpenNotifications,
    CloseNotifications,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::OpenCashOut => "open_cash_out",
            Intent::OpenAddCash => "open_add_cash",
            Intent::OpenDollarPay => "open_dollar_pay",
            Intent::OpenSearch => "open_search",
            Intent::Close => "close",
            Intent::AppendDigit(_) => "append_digit",
            Intent::Backspace => "backspace",
            Intent::Confirm => "confirm",
            Intent::Pay => "pay",
            Intent::SelectPayee(_) => "select_payee",
            Intent::TogglePayee(_) => "toggle_payee",
            Intent::SearchQueryChanged(_) => "search_query_changed",
            Intent::OpenNotifications => "open_notifications",
            Intent::CloseNotifications => "close_notifications",
        }
    }
}

/// Why an intent was absorbed without a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InvalidAmount,
    InsufficientFunds,
    NoPayeeSelected,
    UnknownPayee(String),
    /// The keypad refused the key (length limit, second `.`, non-digit).
    KeyIgnored,
    /// The intent has no transition from the current screen.
    NotAvailable {
        state: &'static str,
        intent: &'static str,
    },
}

impl From<&WalletError> for Rejection {
    fn from(err: &WalletError) -> Self {
        match err {
            WalletError::InsufficientFunds { .. } => Rejection::InsufficientFunds,
            WalletError::NoPayeeSelected => Rejection::NoPayeeSelected,
            _ => Rejection::InvalidAmount,
        }
    }
}

/// Result of feeding one intent to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cash_out_message() {
        let amount = Amount::new(dec!(1250)).unwrap();
        assert_eq!(
            CashKind::CashOut.notification_message(&amount, "Chase Bank"),
            "You successfully cashed out $1,250.00 to Chase Bank. Funds will be available instantly."
        );
    }

    #[test]
    fn test_add_cash_message() {
        let amount = Amount::new(dec!(40)).unwrap();
        let message = CashKind::AddCash.notification_message(&amount, "Chase Bank");
        assert!(message.starts_with("A deposit of $40.00 is now available"));
    }

    #[test]
    fn test_entry_accessor() {
        let state = FlowState::DollarEntry {
            entry: AmountEntry::decimal(),
        };
        assert!(state.entry().is_some());
        assert!(FlowState::Idle.entry().is_none());
        assert_eq!(state.to_string(), "dollar_entry");
    }

    #[test]
    fn test_rejection_from_guard_error() {
        let err = WalletError::InsufficientFunds {
            requested: dec!(2),
            available: dec!(1),
        };
        assert_eq!(Rejection::from(&err), Rejection::InsufficientFunds);
        assert_eq!(
            Rejection::from(&WalletError::InvalidAmount("x".into())),
            Rejection::InvalidAmount
        );
    }

    #[test]
    fn test_confirmation_needs_payee() {
        let err = Completion::confirmation(None, "$5").unwrap_err();
        assert!(matches!(err, WalletError::NoPayeeSelected));
        assert!(err.is_guard_failure());
        assert_eq!(Rejection::from(&err), Rejection::NoPayeeSelected);

        let payee = Contact::new("Ava Patel", "$avapatel", "#16a085");
        let completion = Completion::confirmation(Some(&payee), "$5").unwrap();
        assert_eq!(
            completion,
            Completion::Confirmation {
                payee,
                amount: "$5".to_string()
            }
        );
    }
}
