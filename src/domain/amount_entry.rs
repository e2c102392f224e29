use super::ledger::group_digits;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Input rules for an amount keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Whole dollars only (cash out, add cash).
    Integer,
    /// Dollars with an optional fractional part (peer pay).
    Decimal,
}

impl EntryMode {
    pub fn max_len(self) -> usize {
        match self {
            EntryMode::Integer => 10,
            EntryMode::Decimal => 9,
        }
    }
}

/// The text typed on an amount keypad.
///
/// Every operation returns a new buffer; a rejected keypress returns an
/// unchanged copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountEntry {
    text: String,
    mode: EntryMode,
}

impl AmountEntry {
    pub fn new(mode: EntryMode) -> Self {
        Self {
            text: String::new(),
            mode,
        }
    }

    pub fn integer() -> Self {
        Self::new(EntryMode::Integer)
    }

    pub fn decimal() -> Self {
        Self::new(EntryMode::Decimal)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn append_digit(&self, c: char) -> Self {
        if self.text.len() >= self.mode.max_len() {
            return self.clone();
        }
        let accepted = match self.mode {
            EntryMode::Integer => c.is_ascii_digit(),
            EntryMode::Decimal => c.is_ascii_digit() || (c == '.' && !self.text.contains('.')),
        };
        if !accepted {
            return self.clone();
        }

        let mut text = self.text.clone();
        if c == '.' && text.is_empty() {
            text.push_str("0.");
        } else {
            text.push(c);
        }
        Self {
            text,
            mode: self.mode,
        }
    }

    pub fn backspace(&self) -> Self {
        let mut text = self.text.clone();
        text.pop();
        Self {
            text,
            mode: self.mode,
        }
    }

    /// Keypad display string, e.g. `$1,250` or `$12.5`.
    pub fn display_value(&self) -> String {
        if self.text.is_empty() {
            return "$0".to_string();
        }
        match self.mode {
            EntryMode::Integer => match self.text.parse::<u64>() {
                Ok(value) => format!("${}", group_digits(&value.to_string())),
                Err(_) => "$0".to_string(),
            },
            EntryMode::Decimal => {
                let trimmed = self.text.trim_end_matches('.');
                match Decimal::from_str(trimmed) {
                    Ok(value) => format!("${}", group_loose(value)),
                    Err(_) => "$0".to_string(),
                }
            }
        }
    }
}

/// Up to three fraction digits, no trailing zeros, grouped integer part.
fn group_loose(value: Decimal) -> String {
    let text = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_digits(int_part), frac_part),
        None => group_digits(&text),
    }
}
