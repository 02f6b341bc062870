use crate::{
    common::money::Money,
    domain::entry::{Category, DATE_FORMAT, Entry},
};
use chrono::NaiveDate;
use std::{io::Read, str::FromStr};

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the ledger file headers.
struct CsvRow {
    id: usize,
    date: String,
    category: String,
    amount: String,
    description: String,
}

/// Reads ledger rows from a CSV reader.
///
/// Expected headers: `id,date,category,amount,description`. The `date` column
/// may carry a time suffix (`2022-01-01 00:00:00`), which is dropped. Errors
/// name the offending row id.
///
/// # Examples
///
/// ```
/// use wallet_ledger::io::reader::read_entries;
/// use wallet_ledger::domain::entry::Category;
/// use csv::ReaderBuilder;
///
/// let data = "id,date,category,amount,description\n\
/// 0,2022-01-01,Income,100,Salary\n\
/// 1,2022-01-02,Expense,12.5,Lunch\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let entries: Vec<_> = read_entries(&mut rdr).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].category, Category::Expense);
/// ```
pub fn read_entries<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<Entry, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;

        let date_part = row.date.trim().split(' ').next().unwrap_or_default();
        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map_err(|e| format!("bad date {:?} in row {}: {e}", row.date, row.id))?;
        let category = Category::from_str(&row.category)
            .map_err(|e| format!("{e} in row {}", row.id))?;
        let amount = Money::from_str(&row.amount)
            .map_err(|e| format!("bad amount {:?} in row {}: {e}", row.amount, row.id))?;

        Ok(Entry {
            id: row.id,
            date,
            category,
            amount,
            description: row.description,
        })
    })
}
