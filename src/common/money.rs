use bigdecimal::{BigDecimal, ParseBigDecimalError};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;
const SCALE: i64 = 10_000;

#[derive(Debug, Clone, Copy, Default)]
/// A monetary value stored as an integer count of 1/10000 units.
///
/// Amounts and the running balance are both `Money`, so
/// `balance == sum(income) - sum(expense)` is an exact integer comparison.
/// Arithmetic is checked only; `None` means the result does not fit.
///
/// # Examples
/// ```
/// use wallet_ledger::common::money::Money;
///
/// let amount: Money = "12.5".parse().unwrap();
/// assert_eq!(amount.as_i64(), 125_000);
/// assert_eq!(amount.to_string(), "12.5000");
/// ```
pub struct Money(i64);

impl Money {
    pub fn from_i64(value: i64) -> Self {
        Money(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    /// Whole units, e.g. `Money::units(100)` is `100.0000`.
    pub fn units(value: i64) -> Self {
        Money(value * SCALE)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn checked_neg(self) -> Option<Money> {
        self.0.checked_neg().map(Money)
    }

    pub fn to_string_4dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.4}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_4dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
