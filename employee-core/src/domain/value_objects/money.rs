use crate::common::constants::DEFAULT_CURRENCY;
use crate::common::error::{EmployeeError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Non-negative monetary amount with a 3-letter currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Result<Self> {
        if amount < Decimal::ZERO {
            return Err(EmployeeError::domain(
                "Money.NegativeAmount",
                "Amount must not be negative",
            ));
        }

        let currency = match currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            code => code.to_uppercase(),
        };
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(EmployeeError::domain(
                "Money.InvalidCurrency",
                "Currency must be a 3-letter ISO code",
            ));
        }

        Ok(Self {
            amount: Self::round(amount),
            currency,
        })
    }

    /// Round to cents, half away from zero.
    pub fn round(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Amount in the default currency (BRL).
    pub fn brl(amount: Decimal) -> Result<Self> {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(overflow)?;
        Money::new(sum, &self.currency)
    }

    pub fn subtract(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let result = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(overflow)?;
        if result < Decimal::ZERO {
            return Err(EmployeeError::domain(
                "Money.NegativeAmount",
                "Subtraction result must not be negative",
            ));
        }
        Money::new(result, &self.currency)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency != other.currency {
            return Err(EmployeeError::domain(
                "Money.CurrencyMismatch",
                "Cannot combine amounts in different currencies",
            ));
        }
        Ok(())
    }
}

fn overflow() -> EmployeeError {
    EmployeeError::domain("Money.Overflow", "Amount is out of range")
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}
