use crate::domain::flow::{CashKind, FlowState, Intent};
use crate::domain::ports::ViewPort;
use crate::domain::view::{Alert, AlertId, FlowSnapshot};
use std::io::Write;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("command '{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Turns one input line into intents.
///
/// `digit` takes several keys at once (`digit 100`); blank lines and lines
/// starting with `#` produce nothing.
pub fn parse_command(line: &str) -> Result<Vec<Intent>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Vec::new());
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let intent = match command {
        "cash-out" => Intent::OpenCashOut,
        "add-cash" => Intent::OpenAddCash,
        "dollar" => Intent::OpenDollarPay,
        "search" => Intent::OpenSearch,
        "back" => Intent::Backspace,
        "confirm" => Intent::Confirm,
        "pay" => Intent::Pay,
        "close" => Intent::Close,
        "inbox" => Intent::OpenNotifications,
        "inbox-close" => Intent::CloseNotifications,
        "query" => Intent::SearchQueryChanged(rest.to_string()),
        "select" => Intent::SelectPayee(required(rest, "select")?),
        "toggle" => Intent::TogglePayee(required(rest, "toggle")?),
        "digit" => {
            let keys = required(rest, "digit")?;
            return Ok(keys.chars().map(Intent::AppendDigit).collect());
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(vec![intent])
}

fn required(rest: &str, command: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest.to_string())
    }
}

/// Line-oriented view writing to any `Write` sink.
pub struct ConsoleView<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "console write failed");
        }
    }
}

fn describe(state: &FlowState) -> String {
    match state {
        FlowState::Idle => String::new(),
        FlowState::Search { query } => format!("query={:?}", query),
        FlowState::CashOutEntry { .. }
        | FlowState::AddCashEntry { .. }
        | FlowState::DollarEntry { .. } => String::new(),
        FlowState::SendToSelect { amount, payee, .. } => match payee {
            Some(p) => format!("amount={} payee={}", amount, p.handle),
            None => format!("amount={} payee=none", amount),
        },
        FlowState::Processing { title, subtitle, .. } => format!("{} - {}", title, subtitle),
        FlowState::CashSuccess { kind, amount } => match kind {
            CashKind::CashOut => format!("cashed out ${}", amount),
            CashKind::AddCash => format!("added ${}", amount),
        },
        FlowState::PeerConfirmation { payee, amount } => {
            format!("sent {} to {} {}", amount, payee.display_name, payee.handle)
        }
    }
}

impl<W: Write + Send> ViewPort for ConsoleView<W> {
    fn render(&mut self, snapshot: &FlowSnapshot) {
        let mut text = format!(
            "[{}] balance={} unread={}",
            snapshot.state, snapshot.balance, snapshot.unread_count
        );
        if let Some(entry) = &snapshot.entry_display {
            text.push_str(&format!(" entry={}", entry));
        }
        let detail = describe(&snapshot.state);
        if !detail.is_empty() {
            text.push(' ');
            text.push_str(&detail);
        }
        self.line(&text);

        if let FlowState::SendToSelect { .. } = snapshot.state {
            let handles: Vec<&str> = snapshot.contacts.iter().map(|c| c.handle.as_str()).collect();
            self.line(&format!("  contacts: {}", handles.join(" ")));
        }
        if snapshot.notification_surface_open {
            for n in &snapshot.notifications {
                let mark = if n.read { ' ' } else { '*' };
                self.line(&format!("  {} {} {}", mark, n.timestamp.to_rfc3339(), n.message));
            }
        }
    }

    fn show_alert(&mut self, alert: &Alert) {
        self.line(&format!("ALERT {}: {}", alert.id, alert.message));
    }

    fn hide_alert(&mut self, id: AlertId) {
        self.line(&format!("ALERT {} dismissed", id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("cash-out").unwrap(), vec![Intent::OpenCashOut]);
        assert_eq!(parse_command("  confirm  ").unwrap(), vec![Intent::Confirm]);
        assert_eq!(parse_command("inbox").unwrap(), vec![Intent::OpenNotifications]);
    }

    #[test]
    fn test_parse_digits_expand() {
        assert_eq!(
            parse_command("digit 1.5").unwrap(),
            vec![
                Intent::AppendDigit('1'),
                Intent::AppendDigit('.'),
                Intent::AppendDigit('5')
            ]
        );
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            parse_command("select $LKhowz").unwrap(),
            vec![Intent::SelectPayee("$LKhowz".to_string())]
        );
        assert_eq!(
            parse_command("query kate howard").unwrap(),
            vec![Intent::SearchQueryChanged("kate howard".to_string())]
        );
        assert_eq!(
            parse_command("query").unwrap(),
            vec![Intent::SearchQueryChanged(String::new())]
        );
        assert_eq!(
            parse_command("toggle"),
            Err(CommandError::MissingArgument("toggle"))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert!(parse_command("").unwrap().is_empty());
        assert!(parse_command("# cash out a hundred").unwrap().is_empty());
        assert_eq!(
            parse_command("withdraw"),
            Err(CommandError::Unknown("withdraw".to_string()))
        );
    }

    #[test]
    fn test_console_alert_lines() {
        let mut view = ConsoleView::new(Vec::new());
        view.show_alert(&Alert {
            id: AlertId(3),
            message: "hello".to_string(),
        });
        view.hide_alert(AlertId(3));
        let text = String::from_utf8(view.out).unwrap();
        assert_eq!(text, "ALERT alert-3: hello\nALERT alert-3 dismissed\n");
    }
}
