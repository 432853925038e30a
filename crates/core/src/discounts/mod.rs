//! Discount arithmetic
//!
//! Amount helpers shared by coupon rules. All amounts are whole currency units.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors raised by discount arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Rate was negative.
    #[error("discount rate must not be negative")]
    NegativeRate,

    /// Calculation overflowed or could not be represented as a whole amount.
    #[error("discount calculation overflowed")]
    Overflow,
}

/// How a seasoning coupon reduces the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasoningAdjustment {
    /// Subtract a fixed amount.
    Flat(u64),

    /// Subtract this fraction of the running total.
    Fraction(Decimal),
}

impl SeasoningAdjustment {
    /// Interpret a stored coupon rate.
    ///
    /// Rates of one or more are flat amounts, rounded half away from zero.
    /// Anything below one is a fraction of the running total.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is negative or too large for an amount.
    pub fn from_rate(rate: Decimal) -> Result<Self, DiscountError> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(DiscountError::NegativeRate);
        }

        if rate >= Decimal::ONE {
            return rate
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
                .map(Self::Flat)
                .ok_or(DiscountError::Overflow);
        }

        Ok(Self::Fraction(rate))
    }

    /// Amount this adjustment takes off `running_total`, never more than the total itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the calculation overflows.
    pub fn amount_off(self, running_total: u64) -> Result<u64, DiscountError> {
        let amount = match self {
            Self::Flat(amount) => amount,
            Self::Fraction(rate) => fraction_of(rate, running_total)?,
        };

        Ok(amount.min(running_total))
    }
}

/// Calculate `amount × rate`, rounded half away from zero to whole units.
///
/// # Errors
///
/// Returns an error if the multiplication overflows or the result is negative.
pub fn fraction_of(rate: Decimal, amount: u64) -> Result<u64, DiscountError> {
    let amount = Decimal::from_u64(amount).ok_or(DiscountError::Overflow)?;

    rate.checked_mul(amount)
        .ok_or(DiscountError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::Overflow)
}
