use std::str::FromStr;

use crate::{
    common::{error::LedgerError, request::SearchQuery},
    domain::{
        entry::{self, Category, Entry},
        ledger::Ledger,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    One(Entry),
    Many(Vec<Entry>),
}

impl SearchResult {
    pub fn entries(&self) -> &[Entry] {
        match self {
            SearchResult::One(e) => std::slice::from_ref(e),
            SearchResult::Many(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Looks entries up by the first supplied criterion, in the order id,
/// category, date, amount. With no criterion every entry matches.
pub fn handle(ledger: &Ledger, query: &SearchQuery) -> Result<SearchResult, LedgerError> {
    if let Some(id) = query.id {
        return ledger.get(id).cloned().map(SearchResult::One);
    }
    if let Some(raw) = present(&query.category) {
        let category = Category::from_str(raw)?;
        return Ok(matching(ledger, |e| e.category == category));
    }
    if let Some(raw) = present(&query.date) {
        let date = entry::parse_date(raw)?;
        return Ok(matching(ledger, |e| e.date == date));
    }
    if let Some(amount) = query.amount {
        return Ok(matching(ledger, |e| e.amount == amount));
    }
    Ok(SearchResult::Many(ledger.entries().to_vec()))
}

fn present(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn matching(ledger: &Ledger, pred: impl Fn(&Entry) -> bool) -> SearchResult {
    SearchResult::Many(ledger.entries().iter().filter(|e| pred(e)).cloned().collect())
}
