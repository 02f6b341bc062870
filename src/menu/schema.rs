use std::str::FromStr;

use crate::common::{
    error::LedgerError,
    money::Money,
    request::{EntryPatch, LedgerRequest, NewEntry, SearchQuery},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    Amount,
}

/// One question asked before a command runs.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn prompt(label: &'static str, kind: FieldKind, required: bool) -> Prompt {
    Prompt {
        label,
        kind,
        required,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Id(usize),
    Text(String),
    Amount(Money),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Balance,
    Edit,
    Search,
    Add,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuOption {
    pub label: &'static str,
    pub command: Command,
    pub prompts: &'static [Prompt],
}

const EDIT_PROMPTS: &[Prompt] = &[
    prompt("id", FieldKind::Id, true),
    prompt("category (Income/Expense)", FieldKind::Text, false),
    prompt("date (YYYY-MM-DD)", FieldKind::Text, false),
    prompt("amount", FieldKind::Amount, false),
    prompt("description", FieldKind::Text, false),
];

const SEARCH_PROMPTS: &[Prompt] = &[
    prompt("id", FieldKind::Id, false),
    prompt("category (Income/Expense)", FieldKind::Text, false),
    prompt("date (YYYY-MM-DD)", FieldKind::Text, false),
    prompt("amount", FieldKind::Amount, false),
];

const ADD_PROMPTS: &[Prompt] = &[
    prompt("category (Income/Expense)", FieldKind::Text, true),
    prompt("date (YYYY-MM-DD)", FieldKind::Text, false),
    prompt("amount", FieldKind::Amount, true),
    prompt("description", FieldKind::Text, true),
];

/// Menu items in display order; the user picks them 1-based.
pub const OPTIONS: &[MenuOption] = &[
    MenuOption {
        label: "Show balance",
        command: Command::Balance,
        prompts: &[],
    },
    MenuOption {
        label: "Edit entry",
        command: Command::Edit,
        prompts: EDIT_PROMPTS,
    },
    MenuOption {
        label: "Search entries",
        command: Command::Search,
        prompts: SEARCH_PROMPTS,
    },
    MenuOption {
        label: "Add entry",
        command: Command::Add,
        prompts: ADD_PROMPTS,
    },
    MenuOption {
        label: "Exit",
        command: Command::Exit,
        prompts: &[],
    },
];

impl Prompt {
    /// Converts one raw answer. Blank means "not supplied".
    pub fn parse(&self, raw: &str) -> Result<Option<Value>, LedgerError> {
        let t = raw.trim();
        if t.is_empty() {
            if self.required {
                return Err(LedgerError::validation(format!("{} is required", self.label)));
            }
            return Ok(None);
        }
        let format_err = || LedgerError::InputFormat {
            field: self.label.to_string(),
            value: t.to_string(),
        };
        let value = match self.kind {
            FieldKind::Id => Value::Id(t.parse::<usize>().map_err(|_| format_err())?),
            FieldKind::Amount => Value::Amount(Money::from_str(t).map_err(|_| format_err())?),
            FieldKind::Text => Value::Text(t.to_string()),
        };
        Ok(Some(value))
    }
}

fn text(v: Option<Value>) -> Option<String> {
    match v {
        Some(Value::Text(s)) => Some(s),
        _ => None,
    }
}

fn id(v: Option<Value>) -> Option<usize> {
    match v {
        Some(Value::Id(n)) => Some(n),
        _ => None,
    }
}

fn amount(v: Option<Value>) -> Option<Money> {
    match v {
        Some(Value::Amount(m)) => Some(m),
        _ => None,
    }
}

impl Command {
    /// Builds the request from answers given in prompt order. `Exit` has no
    /// request.
    pub fn build(self, answers: Vec<Option<Value>>) -> Result<Option<LedgerRequest>, LedgerError> {
        let mut a = answers.into_iter();
        let mut next = || a.next().flatten();

        let request = match self {
            Command::Exit => return Ok(None),
            Command::Balance => LedgerRequest::Balance,
            Command::Edit => LedgerRequest::Edit(EntryPatch {
                id: id(next()).ok_or_else(|| LedgerError::validation("id is required"))?,
                category: text(next()),
                date: text(next()),
                amount: amount(next()),
                description: text(next()),
            }),
            Command::Search => LedgerRequest::Search(SearchQuery {
                id: id(next()),
                category: text(next()),
                date: text(next()),
                amount: amount(next()),
            }),
            Command::Add => LedgerRequest::Add(NewEntry {
                category: text(next()),
                date: text(next()),
                amount: amount(next()),
                description: text(next()),
            }),
        };
        Ok(Some(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_answer_is_absent() {
        let p = prompt("amount", FieldKind::Amount, false);
        assert_eq!(p.parse("   ").unwrap(), None);
    }

    #[test]
    fn blank_required_answer_is_a_validation_error() {
        let p = prompt("category", FieldKind::Text, true);
        assert!(matches!(p.parse(""), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn unconvertible_answers_are_input_format_errors() {
        let amount = prompt("amount", FieldKind::Amount, false);
        assert_eq!(
            amount.parse("ten").unwrap_err(),
            LedgerError::InputFormat {
                field: "amount".into(),
                value: "ten".into()
            }
        );
        let id = prompt("id", FieldKind::Id, true);
        assert!(matches!(id.parse("-1"), Err(LedgerError::InputFormat { .. })));
    }

    #[test]
    fn answers_are_parsed_by_kind() {
        assert_eq!(
            prompt("id", FieldKind::Id, true).parse(" 3 ").unwrap(),
            Some(Value::Id(3))
        );
        assert_eq!(
            prompt("amount", FieldKind::Amount, true).parse("2.5").unwrap(),
            Some(Value::Amount(Money::from_i64(25_000)))
        );
    }

    #[test]
    fn edit_builds_patch_in_prompt_order() {
        let request = Command::Edit
            .build(vec![
                Some(Value::Id(0)),
                Some(Value::Text("Expense".into())),
                None,
                Some(Value::Amount(Money::units(50))),
                None,
            ])
            .unwrap();
        assert_eq!(
            request,
            Some(LedgerRequest::Edit(EntryPatch {
                id: 0,
                category: Some("Expense".into()),
                date: None,
                amount: Some(Money::units(50)),
                description: None,
            }))
        );
    }

    #[test]
    fn exit_builds_nothing() {
        assert_eq!(Command::Exit.build(vec![]).unwrap(), None);
    }

    #[test]
    fn every_option_prompt_count_matches_its_request() {
        let counts: Vec<(Command, usize)> =
            OPTIONS.iter().map(|o| (o.command, o.prompts.len())).collect();
        assert_eq!(
            counts,
            vec![
                (Command::Balance, 0),
                (Command::Edit, 5),
                (Command::Search, 4),
                (Command::Add, 4),
                (Command::Exit, 0),
            ]
        );
    }
}
