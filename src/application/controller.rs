use super::scheduler::Scheduler;
use super::wallet::Wallet;
use crate::config::WalletConfig;
use crate::domain::amount_entry::AmountEntry;
use crate::domain::contact::ContactDirectory;
use crate::domain::flow::{CashKind, Completion, FlowState, Intent, Outcome, Rejection};
use crate::domain::ledger::Amount;
use crate::domain::ports::ViewPortBox;
use crate::domain::view::{Alert, AlertId, FlowSnapshot};
use crate::error::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Deferred work the controller schedules for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The processing spinner has run its course.
    ProcessingElapsed,
    /// Time to record the history entry that follows a success screen.
    DeliverNotification { message: String },
    DismissAlert(AlertId),
}

/// The wallet's screen state machine.
///
/// Intents come in through [`FlowController::handle`] and timer events
/// through [`FlowController::advance`]; both take the [`Wallet`] explicitly.
/// Ledger changes for cash flows happen when the user confirms, before the
/// processing spinner starts. Only the success screen and the notification
/// are delayed.
pub struct FlowController {
    config: WalletConfig,
    directory: ContactDirectory,
    state: FlowState,
    notification_surface_open: bool,
    scheduler: Scheduler<TimerEvent>,
    view: ViewPortBox,
    next_alert: u64,
}

impl FlowController {
    pub fn new(config: WalletConfig, directory: ContactDirectory, view: ViewPortBox) -> Self {
        Self {
            config,
            directory,
            state: FlowState::Idle,
            notification_surface_open: false,
            scheduler: Scheduler::new(),
            view,
            next_alert: 0,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn notification_surface_open(&self) -> bool {
        self.notification_surface_open
    }

    pub fn directory(&self) -> &ContactDirectory {
        &self.directory
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Applies one user intent. Guard failures come back as
    /// `Outcome::Rejected` with the state untouched; `Err` means the
    /// persistence layer failed.
    pub async fn handle(&mut self, wallet: &mut Wallet, intent: Intent) -> Result<Outcome> {
        let intent_name = intent.name();
        let outcome = match intent {
            Intent::OpenCashOut => self.open_from_home(
                intent_name,
                true,
                FlowState::CashOutEntry {
                    entry: AmountEntry::integer(),
                },
            ),
            Intent::OpenAddCash => self.open_from_home(
                intent_name,
                true,
                FlowState::AddCashEntry {
                    entry: AmountEntry::integer(),
                },
            ),
            Intent::OpenDollarPay => self.open_from_home(
                intent_name,
                false,
                FlowState::DollarEntry {
                    entry: AmountEntry::decimal(),
                },
            ),
            Intent::OpenSearch => self.open_from_home(
                intent_name,
                false,
                FlowState::Search {
                    query: String::new(),
                },
            ),
            Intent::Close => self.close(intent_name),
            Intent::AppendDigit(c) => self.edit_entry(intent_name, |entry| entry.append_digit(c)),
            Intent::Backspace => self.edit_entry(intent_name, AmountEntry::backspace),
            Intent::Confirm => self.confirm(wallet, intent_name).await?,
            Intent::Pay => self.pay(intent_name),
            Intent::SelectPayee(handle) => self.choose_payee(intent_name, &handle, false),
            Intent::TogglePayee(handle) => self.choose_payee(intent_name, &handle, true),
            Intent::SearchQueryChanged(text) => self.change_query(intent_name, text),
            Intent::OpenNotifications => {
                wallet.mark_all_read().await?;
                self.notification_surface_open = true;
                Outcome::Applied
            }
            Intent::CloseNotifications => {
                self.notification_surface_open = false;
                Outcome::Applied
            }
        };

        match &outcome {
            Outcome::Applied => {
                debug!(intent = intent_name, state = %self.state, "intent applied");
                self.render(wallet);
            }
            Outcome::Rejected(reason) => {
                debug!(intent = intent_name, state = %self.state, ?reason, "intent rejected");
            }
        }
        Ok(outcome)
    }

    /// Whether the primary button of the current screen would be accepted.
    pub fn can_confirm(&self, wallet: &Wallet) -> bool {
        match &self.state {
            FlowState::CashOutEntry { entry } => Amount::parse_whole(entry.as_str())
                .is_ok_and(|amount| amount.value() <= wallet.balance().value()),
            FlowState::AddCashEntry { entry } => Amount::parse_whole(entry.as_str()).is_ok(),
            FlowState::DollarEntry { entry } => !entry.is_empty(),
            FlowState::SendToSelect { payee, .. } => payee.is_some(),
            _ => false,
        }
    }

    /// Waits for the next timer and applies it. Returns `false` once no
    /// timers are pending.
    pub async fn advance(&mut self, wallet: &mut Wallet) -> Result<bool> {
        match self.scheduler.next().await {
            Some(event) => {
                self.on_timer(wallet, event).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Waits for the next timer without applying it. Cancel-safe, for use in
    /// `tokio::select!` next to an intent source.
    pub async fn next_timer(&mut self) -> Option<TimerEvent> {
        self.scheduler.next().await
    }

    /// Runs every pending timer, including ones scheduled along the way.
    pub async fn settle(&mut self, wallet: &mut Wallet) -> Result<()> {
        while self.advance(wallet).await? {}
        Ok(())
    }

    /// Cancels all outstanding timers. Already committed ledger and
    /// notification writes stay.
    pub fn shutdown(&mut self) {
        let pending = self.scheduler.pending();
        if pending > 0 {
            warn!(pending, state = %self.state, "abandoning scheduled work");
        }
        self.scheduler.cancel_all();
    }

    pub async fn on_timer(&mut self, wallet: &mut Wallet, event: TimerEvent) -> Result<()> {
        match event {
            TimerEvent::ProcessingElapsed => self.complete_processing(),
            TimerEvent::DeliverNotification { message } => {
                wallet.notify(&message, Utc::now()).await?;
                let alert = Alert {
                    id: AlertId(self.next_alert),
                    message,
                };
                self.next_alert += 1;
                info!(alert = %alert.id, "notification delivered");
                self.view.show_alert(&alert);
                self.scheduler.schedule(
                    self.config.alert_duration(),
                    TimerEvent::DismissAlert(alert.id),
                );
            }
            TimerEvent::DismissAlert(id) => {
                self.view.hide_alert(id);
                return Ok(());
            }
        }
        self.render(wallet);
        Ok(())
    }

    pub fn snapshot(&self, wallet: &Wallet) -> FlowSnapshot {
        let contacts = match &self.state {
            FlowState::SendToSelect { query, .. } => {
                self.directory.search(query).into_iter().cloned().collect()
            }
            _ => Vec::new(),
        };
        FlowSnapshot {
            state: self.state.clone(),
            balance: wallet.balance().format(),
            balance_short: wallet.balance().format_short(),
            unread_count: wallet.notifications().unread_count(),
            entry_display: self.state.entry().map(AmountEntry::display_value),
            can_confirm: self.can_confirm(wallet),
            notification_surface_open: self.notification_surface_open,
            notifications: wallet.notifications().entries().to_vec(),
            contacts,
        }
    }

    fn render(&mut self, wallet: &Wallet) {
        let snapshot = self.snapshot(wallet);
        self.view.render(&snapshot);
    }

    fn unavailable(&self, intent: &'static str) -> Outcome {
        not_available(self.state.name(), intent)
    }

    fn open_from_home(
        &mut self,
        intent: &'static str,
        from_search: bool,
        next: FlowState,
    ) -> Outcome {
        let allowed = match self.state {
            FlowState::Idle => true,
            FlowState::Search { .. } => from_search,
            _ => false,
        };
        if !allowed {
            return self.unavailable(intent);
        }
        self.state = next;
        Outcome::Applied
    }

    fn close(&mut self, intent: &'static str) -> Outcome {
        match self.state {
            FlowState::Idle | FlowState::Processing { .. } => self.unavailable(intent),
            _ => {
                self.state = FlowState::Idle;
                Outcome::Applied
            }
        }
    }

    fn edit_entry(
        &mut self,
        intent: &'static str,
        edit: impl FnOnce(&AmountEntry) -> AmountEntry,
    ) -> Outcome {
        let state = self.state.name();
        let Some(entry) = self.state.entry_mut() else {
            return not_available(state, intent);
        };
        let edited = edit(entry);
        if edited == *entry {
            return Outcome::Rejected(Rejection::KeyIgnored);
        }
        *entry = edited;
        Outcome::Applied
    }

    async fn confirm(&mut self, wallet: &mut Wallet, intent: &'static str) -> Result<Outcome> {
        let (kind, entry) = match &self.state {
            FlowState::CashOutEntry { entry } => (CashKind::CashOut, entry),
            FlowState::AddCashEntry { entry } => (CashKind::AddCash, entry),
            _ => return Ok(self.unavailable(intent)),
        };
        let amount = match Amount::parse_whole(entry.as_str()) {
            Ok(amount) => amount,
            Err(_) => return Ok(Outcome::Rejected(Rejection::InvalidAmount)),
        };

        let committed = match kind {
            CashKind::CashOut => wallet.debit(amount.value()).await,
            CashKind::AddCash => wallet.credit(amount.value()).await,
        };
        if let Err(err) = committed {
            if err.is_guard_failure() {
                return Ok(Outcome::Rejected(Rejection::from(&err)));
            }
            return Err(err);
        }

        let (title, subtitle, completion) = match kind {
            CashKind::CashOut => (
                "Processing Cash Out".to_string(),
                format!("Transferring to {}...", self.config.bank_name),
                Completion::CashOut { amount },
            ),
            CashKind::AddCash => (
                "Adding Cash".to_string(),
                "Processing your deposit...".to_string(),
                Completion::AddCash { amount },
            ),
        };
        self.enter_processing(title, subtitle, completion);
        Ok(Outcome::Applied)
    }

    fn pay(&mut self, intent: &'static str) -> Outcome {
        match &self.state {
            FlowState::DollarEntry { entry } => {
                if entry.is_empty() {
                    return Outcome::Rejected(Rejection::InvalidAmount);
                }
                self.state = FlowState::SendToSelect {
                    amount: entry.display_value(),
                    payee: None,
                    query: String::new(),
                };
                Outcome::Applied
            }
            FlowState::SendToSelect { amount, payee, .. } => {
                let completion = match Completion::confirmation(payee.as_ref(), amount) {
                    Ok(completion) => completion,
                    Err(err) => return Outcome::Rejected(Rejection::from(&err)),
                };
                self.enter_processing(
                    "Processing Payment".to_string(),
                    "Sending payment...".to_string(),
                    completion,
                );
                Outcome::Applied
            }
            _ => self.unavailable(intent),
        }
    }

    fn choose_payee(&mut self, intent: &'static str, handle: &str, toggle: bool) -> Outcome {
        let state = self.state.name();
        let FlowState::SendToSelect { payee, query, .. } = &mut self.state else {
            return not_available(state, intent);
        };
        let Some(contact) = self.directory.find(handle) else {
            return Outcome::Rejected(Rejection::UnknownPayee(handle.to_string()));
        };

        if toggle {
            let already = payee.as_ref().is_some_and(|p| p.handle == contact.handle);
            *payee = if already { None } else { Some(contact.clone()) };
        } else {
            *query = contact.label();
            *payee = Some(contact.clone());
        }
        Outcome::Applied
    }

    fn change_query(&mut self, intent: &'static str, text: String) -> Outcome {
        let state = self.state.name();
        match &mut self.state {
            FlowState::Search { query } | FlowState::SendToSelect { query, .. } => {
                *query = text;
                Outcome::Applied
            }
            _ => not_available(state, intent),
        }
    }

    fn enter_processing(&mut self, title: String, subtitle: String, completion: Completion) {
        info!(title = %title, "processing started");
        self.state = FlowState::Processing {
            title,
            subtitle,
            completion,
        };
        self.scheduler
            .schedule(self.config.processing_delay(), TimerEvent::ProcessingElapsed);
    }

    fn complete_processing(&mut self) {
        let completion = match std::mem::take(&mut self.state) {
            FlowState::Processing { completion, .. } => completion,
            other => {
                warn!(state = %other, "processing timer fired outside processing");
                self.state = other;
                return;
            }
        };

        match completion {
            Completion::CashOut { amount } => self.show_cash_success(CashKind::CashOut, amount),
            Completion::AddCash { amount } => self.show_cash_success(CashKind::AddCash, amount),
            Completion::Confirmation { payee, amount } => {
                info!(payee = %payee.handle, amount = %amount, "peer payment confirmed");
                self.state = FlowState::PeerConfirmation { payee, amount };
            }
        }
    }

    fn show_cash_success(&mut self, kind: CashKind, amount: Amount) {
        let message = kind.notification_message(&amount, &self.config.bank_name);
        self.state = FlowState::CashSuccess {
            kind,
            amount: amount.to_string(),
        };
        self.scheduler.schedule(
            self.config.success_notification_delay(),
            TimerEvent::DeliverNotification { message },
        );
    }
}

fn not_available(state: &'static str, intent: &'static str) -> Outcome {
    Outcome::Rejected(Rejection::NotAvailable { state, intent })
}
