use crate::common::money::Money;

/// Fields for a new entry. Everything is optional here because the menu hands
/// over whatever the user typed; the add handler decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub category: Option<String>,
    pub date: Option<String>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

/// Partial update of an existing entry. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub id: usize,
    pub category: Option<String>,
    pub date: Option<String>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

/// Search criteria. Only the first supplied one (in field order) is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub id: Option<usize>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub amount: Option<Money>,
}

/// Represents one menu action that is sent to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerRequest {
    Balance,
    Edit(EntryPatch),
    Search(SearchQuery),
    Add(NewEntry),
}
