use crate::{
    common::{error::LedgerError, money::Money},
    domain::entry::{Category, Entry},
};

/// In-memory ledger: entries in insertion order and the cached balance.
///
/// An entry's id is its index in `entries`. The balance is updated
/// incrementally by the handlers; `recomputed_balance` sums the rows from
/// scratch and is what `is_consistent` compares against.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<Entry>,
    balance: Money,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            balance: Money::zero(),
        }
    }

    /// Builds a ledger from persisted rows. Ids are renumbered to row order
    /// and the balance is derived from the rows; totals that do not fit in
    /// `Money` are a validation error.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, LedgerError> {
        let entries: Vec<Entry> = entries
            .into_iter()
            .enumerate()
            .map(|(id, entry)| Entry { id, ..entry })
            .collect();
        let mut ledger = Self {
            entries,
            balance: Money::zero(),
        };
        ledger.balance = ledger
            .recomputed_balance()
            .ok_or_else(|| LedgerError::validation("ledger totals are too large"))?;
        Ok(ledger)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn get(&self, id: usize) -> Result<&Entry, LedgerError> {
        self.entries.get(id).ok_or(LedgerError::NotFound(id))
    }

    pub fn next_id(&self) -> usize {
        self.entries.len()
    }

    /// `None` if the totals overflow.
    pub fn recomputed_balance(&self) -> Option<Money> {
        self.total(Category::Income)?
            .checked_sub(self.total(Category::Expense)?)
    }

    pub fn total(&self, category: Category) -> Option<Money> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .try_fold(Money::zero(), |acc, e| acc.checked_add(e.amount))
    }

    pub fn is_consistent(&self) -> bool {
        !self.balance.is_negative() && self.recomputed_balance() == Some(self.balance)
    }

    /// Appends `entry` and stores `new_balance`. The caller has already
    /// applied the balance rule for the entry.
    pub(crate) fn push(&mut self, entry: Entry, new_balance: Money) {
        debug_assert_eq!(entry.id, self.entries.len());
        self.entries.push(entry);
        self.balance = new_balance;
    }

    pub(crate) fn entry_mut(&mut self, id: usize) -> Result<&mut Entry, LedgerError> {
        self.entries.get_mut(id).ok_or(LedgerError::NotFound(id))
    }

    pub(crate) fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(id: usize, category: Category, amount: i64) -> Entry {
        Entry {
            id,
            date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            category,
            amount: Money::units(amount),
            description: "row".into(),
        }
    }

    #[test]
    fn new_ledger_is_empty_with_zero_balance() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.balance(), Money::zero());
        assert!(ledger.is_consistent());
    }

    #[test]
    fn from_entries_recomputes_balance_and_renumbers() {
        let ledger = Ledger::from_entries(vec![
            entry(4, Category::Income, 100),
            entry(9, Category::Expense, 30),
            entry(2, Category::Income, 5),
        ])
        .unwrap();
        assert_eq!(ledger.balance(), Money::units(75));
        let ids: Vec<usize> = ledger.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(ledger.total(Category::Income), Some(Money::units(105)));
        assert!(ledger.is_consistent());
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let ledger = Ledger::from_entries(vec![entry(0, Category::Income, 1)]).unwrap();
        assert!(ledger.get(0).is_ok());
        assert_eq!(ledger.get(1).unwrap_err(), LedgerError::NotFound(1));
    }

    #[test]
    fn drift_is_detected() {
        let mut ledger = Ledger::from_entries(vec![entry(0, Category::Income, 10)]).unwrap();
        ledger.set_balance(Money::units(11));
        assert!(!ledger.is_consistent());
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let big = Entry {
            amount: Money::from_i64(i64::MAX),
            ..entry(0, Category::Income, 0)
        };
        let err = Ledger::from_entries(vec![big.clone(), big]).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}
