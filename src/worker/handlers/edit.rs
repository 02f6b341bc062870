use std::{fmt, str::FromStr};

use crate::{
    common::{error::LedgerError, money::Money, request::EntryPatch},
    domain::{
        balance,
        entry::{self, Category},
        ledger::Ledger,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Category,
    Date,
    Amount,
    Description,
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditField::Category => "category",
            EditField::Date => "date",
            EditField::Amount => "amount",
            EditField::Description => "description",
        })
    }
}

/// Outcome of an edit: which fields changed and which were refused.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EditReport {
    pub applied: Vec<EditField>,
    pub rejected: Vec<(EditField, LedgerError)>,
}

impl EditReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// One field's change. Each update checks and commits on its own.
#[derive(Debug)]
enum FieldUpdate {
    /// `amount` is the amount supplied in the same edit, folded into the
    /// category's balance check.
    Category { raw: String, amount: Option<Money> },
    Date(String),
    Amount(Money),
    Description(String),
}

impl FieldUpdate {
    fn field(&self) -> EditField {
        match self {
            FieldUpdate::Category { .. } => EditField::Category,
            FieldUpdate::Date(_) => EditField::Date,
            FieldUpdate::Amount(_) => EditField::Amount,
            FieldUpdate::Description(_) => EditField::Description,
        }
    }

    /// Returns the fields that actually changed. A category change that
    /// also stores the supplied amount reports both.
    fn apply(self, ledger: &mut Ledger, id: usize) -> Result<Vec<EditField>, LedgerError> {
        match self {
            FieldUpdate::Category { raw, amount } => {
                let new_category = Category::from_str(&raw)?;
                let current = ledger.get(id)?;
                if current.category == new_category {
                    return Ok(Vec::new());
                }
                let old = (current.category, current.amount);
                let new_amount = amount.filter(Money::is_positive).unwrap_or(current.amount);
                let new_balance =
                    balance::replace(ledger.balance(), old, (new_category, new_amount))?;

                let entry = ledger.entry_mut(id)?;
                let mut changed = vec![EditField::Category];
                if entry.amount != new_amount {
                    changed.push(EditField::Amount);
                }
                entry.category = new_category;
                entry.amount = new_amount;
                ledger.set_balance(new_balance);
                Ok(changed)
            }
            FieldUpdate::Date(raw) => {
                let date = entry::parse_date(&raw)?;
                let entry = ledger.entry_mut(id)?;
                let changed = entry.date != date;
                entry.date = date;
                Ok(changed_if(changed, EditField::Date))
            }
            FieldUpdate::Amount(amount) => {
                entry::validate_amount(amount)?;
                let current = ledger.get(id)?;
                if current.amount == amount {
                    return Ok(Vec::new());
                }
                let category = current.category;
                let new_balance = balance::replace(
                    ledger.balance(),
                    (category, current.amount),
                    (category, amount),
                )?;

                ledger.entry_mut(id)?.amount = amount;
                ledger.set_balance(new_balance);
                Ok(vec![EditField::Amount])
            }
            FieldUpdate::Description(text) => {
                let text = text.trim();
                entry::validate_description(text)?;
                let entry = ledger.entry_mut(id)?;
                let changed = entry.description != text;
                if changed {
                    entry.description = text.to_string();
                }
                Ok(changed_if(changed, EditField::Description))
            }
        }
    }
}

fn changed_if(changed: bool, field: EditField) -> Vec<EditField> {
    if changed { vec![field] } else { Vec::new() }
}

/// Turns a patch into the ordered list of field updates. Blank values are
/// treated as not supplied.
fn plan(patch: EntryPatch) -> Vec<FieldUpdate> {
    let present = |s: Option<String>| s.filter(|s| !s.trim().is_empty());

    let mut updates = Vec::with_capacity(4);
    if let Some(raw) = present(patch.category) {
        updates.push(FieldUpdate::Category {
            raw,
            amount: patch.amount,
        });
    }
    if let Some(raw) = present(patch.date) {
        updates.push(FieldUpdate::Date(raw));
    }
    if let Some(amount) = patch.amount {
        updates.push(FieldUpdate::Amount(amount));
    }
    if let Some(text) = present(patch.description) {
        updates.push(FieldUpdate::Description(text));
    }
    updates
}

pub fn handle(ledger: &mut Ledger, patch: EntryPatch) -> Result<EditReport, LedgerError> {
    let id = patch.id;
    ledger.get(id)?;

    let mut report = EditReport::default();
    for update in plan(patch) {
        let field = update.field();
        match update.apply(ledger, id) {
            Ok(changed) => report.applied.extend(changed),
            Err(e) => report.rejected.push((field, e)),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::Entry;
    use chrono::NaiveDate;

    fn m(v: i64) -> Money {
        Money::units(v)
    }

    fn seeded(rows: &[(Category, i64)]) -> Ledger {
        Ledger::from_entries(
            rows.iter()
                .enumerate()
                .map(|(id, (category, amount))| Entry {
                    id,
                    date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                    category: *category,
                    amount: m(*amount),
                    description: format!("row {id}"),
                })
                .collect(),
        )
        .unwrap()
    }

    fn patch(id: usize) -> EntryPatch {
        EntryPatch {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut ledger = seeded(&[(Category::Income, 100)]);
        let err = handle(&mut ledger, patch(5)).unwrap_err();
        assert_eq!(err, LedgerError::NotFound(5));
    }

    #[test]
    fn category_flip_that_would_go_negative_keeps_category_but_applies_amount() {
        let mut ledger = seeded(&[(Category::Income, 100)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                category: Some("Expense".into()),
                amount: Some(m(50)),
                ..patch(0)
            },
        )
        .unwrap();

        assert_eq!(report.applied, vec![EditField::Amount]);
        assert!(matches!(
            report.rejected.as_slice(),
            [(EditField::Category, LedgerError::InsufficientFunds { .. })]
        ));
        assert_eq!(ledger.balance(), m(50));
        let row = ledger.get(0).unwrap();
        assert_eq!((row.category, row.amount), (Category::Income, m(50)));
        assert!(ledger.is_consistent());
    }

    #[test]
    fn category_and_amount_commit_together_when_affordable() {
        let mut ledger = seeded(&[(Category::Income, 100), (Category::Income, 100)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                category: Some("Expense".into()),
                amount: Some(m(50)),
                ..patch(0)
            },
        )
        .unwrap();

        // the amount step then sees it already committed
        assert_eq!(report.applied, vec![EditField::Category, EditField::Amount]);
        assert!(report.rejected.is_empty());
        assert_eq!(ledger.balance(), m(50));
        let row = ledger.get(0).unwrap();
        assert_eq!((row.category, row.amount), (Category::Expense, m(50)));
        assert!(ledger.is_consistent());
    }

    #[test]
    fn net_effect_uses_new_amount_not_old() {
        // 150 total; flipping the 100 income to a 10 expense leaves 40
        let mut ledger = seeded(&[(Category::Income, 100), (Category::Income, 50)]);
        handle(
            &mut ledger,
            EntryPatch {
                category: Some("expense".into()),
                amount: Some(m(10)),
                ..patch(0)
            },
        )
        .unwrap();
        assert_eq!(ledger.balance(), m(40));
        assert_eq!(ledger.get(0).unwrap().category, Category::Expense);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn expense_to_income_raises_balance() {
        let mut ledger = seeded(&[(Category::Income, 100), (Category::Expense, 30)]);
        handle(
            &mut ledger,
            EntryPatch {
                category: Some("Income".into()),
                ..patch(1)
            },
        )
        .unwrap();
        assert_eq!(ledger.balance(), m(130));
        assert!(ledger.is_consistent());
    }

    #[test]
    fn amount_change_that_would_go_negative_is_rejected() {
        let mut ledger = seeded(&[(Category::Income, 100), (Category::Expense, 80)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                amount: Some(m(120)),
                description: Some("bigger rent".into()),
                ..patch(1)
            },
        )
        .unwrap();

        assert_eq!(report.applied, vec![EditField::Description]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(ledger.balance(), m(20));
        assert_eq!(ledger.get(1).unwrap().amount, m(80));
        assert_eq!(ledger.get(1).unwrap().description, "bigger rent");
    }

    #[test]
    fn lowering_an_income_below_spent_total_is_rejected() {
        let mut ledger = seeded(&[(Category::Income, 100), (Category::Expense, 80)]);
        let report = handle(
            &mut ledger,
            EntryPatch {
                amount: Some(m(70)),
                ..patch(0)
            },
        )
        .unwrap();
        assert!(!report.changed());
        assert_eq!(ledger.balance(), m(20));
    }

    #[test]
    fn invalid_fields_are_rejected_individually() {
        let mut ledger = seeded(&[(Category::Income, 100)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                category: Some("Transfer".into()),
                date: Some("2023-02-30".into()),
                amount: Some(m(0)),
                description: Some("z".repeat(80)),
                ..patch(0)
            },
        )
        .unwrap();

        assert!(!report.changed());
        let fields: Vec<EditField> = report.rejected.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![
                EditField::Category,
                EditField::Date,
                EditField::Amount,
                EditField::Description
            ]
        );
        assert!(
            report
                .rejected
                .iter()
                .all(|(_, e)| matches!(e, LedgerError::Validation(_)))
        );
        assert_eq!(ledger.balance(), m(100));
    }

    #[test]
    fn date_and_description_update_without_balance_effect() {
        let mut ledger = seeded(&[(Category::Income, 100)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                date: Some("2023-05-17".into()),
                description: Some("salary".into()),
                ..patch(0)
            },
        )
        .unwrap();

        assert_eq!(report.applied, vec![EditField::Date, EditField::Description]);
        let row = ledger.get(0).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2023, 5, 17).unwrap());
        assert_eq!(row.description, "salary");
        assert_eq!(ledger.balance(), m(100));
    }

    #[test]
    fn category_flip_without_new_amount_reports_only_category() {
        let mut ledger = seeded(&[(Category::Income, 100), (Category::Expense, 30)]);
        let report = handle(
            &mut ledger,
            EntryPatch {
                category: Some("Income".into()),
                amount: Some(m(30)),
                ..patch(1)
            },
        )
        .unwrap();
        assert_eq!(report.applied, vec![EditField::Category]);
    }

    #[test]
    fn description_is_stored_trimmed() {
        let mut ledger = seeded(&[(Category::Income, 100)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                description: Some("  salary  ".into()),
                ..patch(0)
            },
        )
        .unwrap();
        assert_eq!(report.applied, vec![EditField::Description]);
        assert_eq!(ledger.get(0).unwrap().description, "salary");

        let again = handle(
            &mut ledger,
            EntryPatch {
                description: Some("salary ".into()),
                ..patch(0)
            },
        )
        .unwrap();
        assert!(!again.changed());
    }

    #[test]
    fn blank_and_unchanged_fields_are_skipped() {
        let mut ledger = seeded(&[(Category::Income, 100)]);

        let report = handle(
            &mut ledger,
            EntryPatch {
                category: Some("Income".into()),
                date: Some("  ".into()),
                amount: Some(m(100)),
                description: Some(String::new()),
                ..patch(0)
            },
        )
        .unwrap();

        assert_eq!(report, EditReport::default());
    }
}
