use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::{
    common::error::AppError,
    domain::{entry::Entry, ledger::Ledger},
    io::{reader, writer},
};

const TMP_SUFFIX: &str = "tmp";

/// The ledger's CSV file. Every save rewrites the whole table.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger, or returns an empty one when the file does not exist
    /// yet. The file itself is only created by the first `save`.
    pub fn load(&self) -> Result<Ledger, AppError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no ledger file yet, starting empty");
            return Ok(Ledger::new());
        }

        let file = File::open(&self.path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut entries: Vec<Entry> = Vec::new();
        for row in reader::read_entries(&mut rdr) {
            let entry = row.map_err(AppError::Parse)?;
            if entry.id != entries.len() {
                tracing::warn!(
                    persisted = entry.id,
                    position = entries.len(),
                    "row id does not match its position, renumbering"
                );
            }
            entries.push(entry);
        }

        let ledger = Ledger::from_entries(entries)
            .map_err(|e| AppError::Parse(format!("{}: {e}", self.path.display())))?;
        if ledger.balance().is_negative() {
            tracing::warn!(balance = %ledger.balance(), "loaded ledger has a negative balance");
        }
        tracing::info!(
            path = %self.path.display(),
            rows = ledger.len(),
            balance = %ledger.balance(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// Writes the table to a sibling temp file and renames it over the
    /// ledger file, so the file on disk is always a complete table.
    pub fn save(&self, ledger: &Ledger) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = tmp_path(&self.path);
        {
            let file = File::create(&tmp)?;
            writer::write_entries(BufWriter::new(file), ledger.entries())?;
        }
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), rows = ledger.len(), "ledger saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}
