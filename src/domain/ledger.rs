use crate::error::{Result, WalletError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The wallet's cash balance.
///
/// This is a wrapper around `rust_decimal::Decimal` that can only be built
/// non-negative and only changes through [`Balance::credit`] and
/// [`Balance::debit`], so a committed balance is never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Balance(Decimal);

/// Represents a positive monetary amount moved by a flow.
///
/// Ensures that ledger operations are always fed a strictly positive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(WalletError::InvalidAmount(format!(
                "amount must be positive, got {}",
                value
            )))
        }
    }

    /// Parses the whole-dollar text typed into an integer entry buffer.
    pub fn parse_whole(text: &str) -> Result<Self> {
        let dollars: u64 = text
            .parse()
            .map_err(|_| WalletError::InvalidAmount(format!("'{}' is not a whole amount", text)))?;
        Self::new(Decimal::from(dollars))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Two-decimal grouped form without the currency sign, e.g. `1,250.00`.
    pub fn to_grouped_string(&self) -> String {
        group_fixed(self.0, 2)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = WalletError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(WalletError::InvalidAmount(format!(
                "balance cannot be negative, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adds `amount` to the balance.
    pub fn credit(self, amount: Decimal) -> Result<Self> {
        let amount = Amount::new(amount)?;
        Ok(Self(self.0 + amount.value()))
    }

    /// Removes `amount` from the balance if it is covered.
    pub fn debit(self, amount: Decimal) -> Result<Self> {
        let amount = Amount::new(amount)?;
        if amount.value() > self.0 {
            return Err(WalletError::InsufficientFunds {
                requested: amount.value(),
                available: self.0,
            });
        }
        Ok(Self(self.0 - amount.value()))
    }

    /// Full display form: `$8,854.22`.
    pub fn format(&self) -> String {
        format!("${}", group_fixed(self.0, 2))
    }

    /// Compact display form: `$8.9K` from a thousand up, `$742` below.
    pub fn format_short(&self) -> String {
        if self.0 >= Decimal::ONE_THOUSAND {
            let thousands = (self.0 / Decimal::ONE_THOUSAND)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("${:.1}K", thousands)
        } else {
            let whole = self
                .0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            format!("${:.0}", whole)
        }
    }

    /// Text form stored in the balance slot.
    pub fn to_storage_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_storage_string(text: &str) -> Result<Self> {
        let value = Decimal::from_str(text.trim()).map_err(|e| {
            WalletError::Storage(format!("stored balance '{}' is not a number: {}", text, e))
        })?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Balance {
    type Error = WalletError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Renders `value` with exactly `scale` fraction digits and en-US thousands
/// separators on the integer part.
pub(crate) fn group_fixed(value: Decimal, scale: u32) -> String {
    let rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", scale as usize, rounded);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => format!("{}{}.{}", sign, group_digits(int_part), frac_part),
        None => format!("{}{}", sign, group_digits(unsigned)),
    }
}

/// Inserts a comma every three digits from the right.
pub(crate) fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
