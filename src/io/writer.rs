use std::io::Write;

use crate::domain::entry::{DATE_FORMAT, Entry};

#[derive(serde::Serialize)]
/// Internal CSV output row representation matching the ledger file headers.
///
/// Headers written (in this order): `id,date,category,amount,description`.
struct OutputRow<'a> {
    id: usize,
    date: String,
    category: &'static str,
    amount: String,
    description: &'a str,
}

/// Writes the whole ledger table to a CSV writer, one row per entry in id
/// order. Amounts are formatted with exactly 4 decimal places.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use wallet_ledger::common::money::Money;
/// use wallet_ledger::domain::entry::{Category, Entry};
/// use wallet_ledger::io::writer::write_entries;
///
/// let entries = vec![Entry {
///     id: 0,
///     date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     category: Category::Income,
///     amount: Money::units(100),
///     description: "Salary".into(),
/// }];
///
/// let mut out = Vec::new();
/// write_entries(&mut out, &entries).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "id,date,category,amount,description\n0,2022-01-01,Income,100.0000,Salary\n");
/// ```
pub fn write_entries<W: Write>(writer: W, entries: &[Entry]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    if entries.is_empty() {
        // serialize() only emits headers alongside the first row
        wtr.write_record(["id", "date", "category", "amount", "description"])?;
    }

    for entry in entries {
        let row = OutputRow {
            id: entry.id,
            date: entry.date.format(DATE_FORMAT).to_string(),
            category: entry.category.as_str(),
            amount: entry.amount.to_string_4dp(),
            description: &entry.description,
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
