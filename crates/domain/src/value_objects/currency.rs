//! Currency value objects for character balances

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A strictly positive currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` for zero.
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::invalid_amount("amount must be greater than zero"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> u64 {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    /// Parses a user-typed amount. Negative numbers, zero and anything that is
    /// not an integer are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i128 = trimmed
            .parse()
            .map_err(|_| DomainError::invalid_amount(format!("'{}' is not a number", trimmed)))?;
        if value <= 0 {
            return Err(DomainError::invalid_amount(format!(
                "'{}' must be greater than zero",
                trimmed
            )));
        }
        let value = u64::try_from(value)
            .map_err(|_| DomainError::invalid_amount(format!("'{}' is too large", trimmed)))?;
        Self::new(value)
    }
}

/// How much currency to take from a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Withdrawal {
    /// Empty the balance
    All,
    /// Take up to this amount; clamped to the balance
    Amount(Amount),
}

impl FromStr for Withdrawal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Amount)
    }
}

/// Outcome of a withdrawal: `removed + current == previous` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyChange {
    pub previous: u64,
    pub removed: u64,
    pub current: u64,
}

impl CurrencyChange {
    /// Applies `withdrawal` to `balance`, never going below zero.
    pub fn withdraw(balance: u64, withdrawal: Withdrawal) -> Self {
        let removed = match withdrawal {
            Withdrawal::All => balance,
            Withdrawal::Amount(amount) => amount.get().min(balance),
        };
        Self {
            previous: balance,
            removed,
            current: balance - removed,
        }
    }
}
