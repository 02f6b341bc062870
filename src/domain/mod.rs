pub mod balance;
pub mod entry;
pub mod ledger;
