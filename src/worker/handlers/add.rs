use chrono::NaiveDate;
use std::str::FromStr;

use crate::{
    common::{error::LedgerError, request::NewEntry},
    domain::{
        balance,
        entry::{self, Category, Entry},
        ledger::Ledger,
    },
};

pub fn handle(ledger: &mut Ledger, req: NewEntry, today: NaiveDate) -> Result<Entry, LedgerError> {
    let category = non_empty(req.category.as_deref())
        .ok_or_else(|| LedgerError::validation("category is required"))?;
    let amount = req
        .amount
        .ok_or_else(|| LedgerError::validation("amount is required"))?;
    let description = req.description.unwrap_or_default().trim().to_string();
    entry::validate_description(&description)?;
    entry::validate_amount(amount)?;

    // An unknown category has no balance rule, so the add is rejected here.
    let category = Category::from_str(category)?;
    let date = resolve_date(req.date.as_deref(), today)?;

    let new_balance = balance::apply(category, ledger.balance(), amount)?;

    let entry = Entry {
        id: ledger.next_id(),
        date,
        category,
        amount,
        description,
    };
    ledger.push(entry.clone(), new_balance);
    Ok(entry)
}

/// A `YYYY-MM-DD` value must be a real date; anything else falls back to today.
fn resolve_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, LedgerError> {
    match raw.map(str::trim) {
        Some(s) if entry::looks_like_date(s) => entry::parse_date(s),
        _ => Ok(today),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
