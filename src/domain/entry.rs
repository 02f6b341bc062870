use chrono::NaiveDate;
use std::fmt;

use crate::common::{error::LedgerError, money::Money};

/// Descriptions must be strictly shorter than this many characters.
pub const MAX_DESCRIPTION_LEN: usize = 64;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: usize,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }

    /// `amount` as a contribution to the balance.
    pub fn signed(&self, amount: Money) -> Option<Money> {
        match self {
            Category::Income => Some(amount),
            Category::Expense => amount.checked_neg(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = LedgerError;

    /// Accepts the English labels in any case, plus the legacy labels
    /// written by older wallet files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_lowercase().as_str() {
            "income" | "доход" => Ok(Category::Income),
            "expense" | "расход" => Ok(Category::Expense),
            _ => Err(LedgerError::validation(format!(
                "unknown category {t:?}, expected Income or Expense"
            ))),
        }
    }
}

/// True when `s` has the `YYYY-MM-DD` shape, whether or not it is a real date.
pub fn looks_like_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

pub fn parse_date(s: &str) -> Result<NaiveDate, LedgerError> {
    let t = s.trim();
    if !looks_like_date(t) {
        return Err(LedgerError::validation(format!(
            "date {t:?} is not in YYYY-MM-DD form"
        )));
    }
    NaiveDate::parse_from_str(t, DATE_FORMAT)
        .map_err(|e| LedgerError::validation(format!("date {t:?} is invalid: {e}")))
}

pub fn validate_description(s: &str) -> Result<(), LedgerError> {
    if s.trim().is_empty() {
        return Err(LedgerError::validation("description is empty"));
    }
    let len = s.chars().count();
    if len >= MAX_DESCRIPTION_LEN {
        return Err(LedgerError::validation(format!(
            "description is {len} characters, must be under {MAX_DESCRIPTION_LEN}"
        )));
    }
    Ok(())
}

pub fn validate_amount(amount: Money) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}
