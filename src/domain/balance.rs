use crate::{
    common::{error::LedgerError, money::Money},
    domain::entry::Category,
};

/// Applies `category`'s balance-changing rule and returns the new balance.
/// Nothing is committed here; callers store the result on success.
pub fn apply(category: Category, balance: Money, amount: Money) -> Result<Money, LedgerError> {
    match category {
        Category::Income => increase(balance, amount),
        Category::Expense => decrease(balance, amount),
    }
}

pub fn increase(balance: Money, amount: Money) -> Result<Money, LedgerError> {
    balance.checked_add(amount).ok_or_else(too_large)
}

pub fn decrease(balance: Money, amount: Money) -> Result<Money, LedgerError> {
    let tentative = balance.checked_sub(amount).ok_or_else(too_large)?;
    check_non_negative(balance, tentative, amount)
}

/// Balance after replacing one entry's contribution with another's.
pub fn replace(
    balance: Money,
    old: (Category, Money),
    new: (Category, Money),
) -> Result<Money, LedgerError> {
    let old_signed = old.0.signed(old.1).ok_or_else(too_large)?;
    let new_signed = new.0.signed(new.1).ok_or_else(too_large)?;
    let tentative = balance
        .checked_sub(old_signed)
        .and_then(|b| b.checked_add(new_signed))
        .ok_or_else(too_large)?;
    if tentative.is_negative() {
        let required = old_signed.checked_sub(new_signed).ok_or_else(too_large)?;
        return Err(LedgerError::InsufficientFunds { balance, required });
    }
    Ok(tentative)
}

fn check_non_negative(
    balance: Money,
    tentative: Money,
    required: Money,
) -> Result<Money, LedgerError> {
    if tentative.is_negative() {
        return Err(LedgerError::InsufficientFunds { balance, required });
    }
    Ok(tentative)
}

fn too_large() -> LedgerError {
    LedgerError::validation("amount too large")
}
