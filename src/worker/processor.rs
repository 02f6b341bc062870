use crate::{
    common::{
        error::{AppError, LedgerError},
        money::Money,
        request::{EntryPatch, LedgerRequest, NewEntry, SearchQuery},
    },
    domain::{entry::Entry, ledger::Ledger},
    io::store::CsvStore,
    worker::handlers::{
        add,
        edit::{self, EditReport},
        search::{self, SearchResult},
    },
};

#[derive(Debug)]
pub enum Response {
    Balance(Money),
    Edited(EditReport),
    Found(SearchResult),
    Added(Entry),
}

/// Owns the ledger and its file. Every successful mutation is written back
/// before the call returns.
///
/// Recoverable failures come back as `AppError::Ledger`; anything else is an
/// I/O problem with the ledger file.
#[derive(Debug)]
pub struct Processor {
    ledger: Ledger,
    store: CsvStore,
}

impl Processor {
    pub fn open(store: CsvStore) -> Result<Self, AppError> {
        let ledger = store.load()?;
        Ok(Self { ledger, store })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance()
    }

    pub fn add_entry(&mut self, req: NewEntry) -> Result<Entry, AppError> {
        let today = chrono::Local::now().date_naive();
        let entry = add::handle(&mut self.ledger, req, today).or_else(|e| reject("add", e))?;
        tracing::info!(
            id = entry.id,
            category = %entry.category,
            amount = %entry.amount,
            balance = %self.ledger.balance(),
            "entry added"
        );
        self.store.save(&self.ledger)?;
        Ok(entry)
    }

    pub fn edit_entry(&mut self, patch: EntryPatch) -> Result<EditReport, AppError> {
        let id = patch.id;
        let report = edit::handle(&mut self.ledger, patch).or_else(|e| reject("edit", e))?;
        for (field, err) in &report.rejected {
            tracing::warn!(id, %field, error = %err, "edit field rejected");
        }
        if report.changed() {
            tracing::info!(
                id,
                fields = ?report.applied,
                balance = %self.ledger.balance(),
                "entry edited"
            );
            self.store.save(&self.ledger)?;
        }
        Ok(report)
    }

    pub fn search_entries(&self, query: &SearchQuery) -> Result<SearchResult, AppError> {
        search::handle(&self.ledger, query).or_else(|e| reject("search", e))
    }

    pub fn process(&mut self, request: LedgerRequest) -> Result<Response, AppError> {
        match request {
            LedgerRequest::Balance => Ok(Response::Balance(self.balance())),
            LedgerRequest::Edit(patch) => self.edit_entry(patch).map(Response::Edited),
            LedgerRequest::Search(query) => self.search_entries(&query).map(Response::Found),
            LedgerRequest::Add(req) => self.add_entry(req).map(Response::Added),
        }
    }

    /// Ends the session. Every mutation is already on disk, so this only
    /// checks the cached balance against the rows one last time.
    pub fn close(self) -> Result<(), AppError> {
        let recomputed = self.ledger.recomputed_balance();
        if recomputed != Some(self.ledger.balance()) {
            tracing::error!(
                cached = %self.ledger.balance(),
                recomputed = ?recomputed,
                "balance drifted from rows, rewriting file"
            );
            self.store.save(&self.ledger)?;
        }
        tracing::info!(path = %self.store.path().display(), "ledger closed");
        Ok(())
    }
}

fn reject<T>(op: &'static str, err: LedgerError) -> Result<T, AppError> {
    tracing::warn!(op, error = %err, "operation rejected");
    Err(AppError::Ledger(err))
}
