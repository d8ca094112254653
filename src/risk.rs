//! Risk math: borrow ceilings and health factors.
//!
//! Everything here is a pure function of a position snapshot and one price
//! snapshot. The max borrow is enforced strictly at issuance; the health factor
//! compares risk-adjusted collateral value against outstanding debt, and a
//! position becomes liquidatable the instant it drops below 1.0 (strictly).

use crate::types::{Amount, AmountError, Price, Ratio};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskParams {
    /// Maximum fraction of collateral value that may be borrowed.
    pub ltv: Ratio,
    /// Ratio defining the health boundary. Kept at or above the LTV so a fresh
    /// max borrow starts with a health factor of at least 1.
    pub liquidation_threshold: Ratio,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            ltv: Ratio::new_unchecked(dec!(0.5)),
            liquidation_threshold: Ratio::new_unchecked(dec!(0.6)),
        }
    }
}

// 5.0: health factor. debt-free positions are infinitely healthy and can
// never be liquidated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HealthFactor {
    Finite(Decimal),
    Infinite,
}

impl HealthFactor {
    /// Strict inequality only: exactly 1.0 is not liquidatable.
    pub fn is_liquidatable(&self) -> bool {
        match self {
            HealthFactor::Finite(v) => *v < Decimal::ONE,
            HealthFactor::Infinite => false,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            HealthFactor::Finite(v) => Some(*v),
            HealthFactor::Infinite => None,
        }
    }
}

impl fmt::Display for HealthFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthFactor::Finite(v) => write!(f, "{}", v.round_dp(4)),
            HealthFactor::Infinite => write!(f, "inf"),
        }
    }
}

// 5.1: the borrow ceiling. collateral * price * ltv, truncated down to the
// debt unit. rounding up here would let a borrower clear the true ceiling.
pub fn max_borrow(collateral: Amount, price: Price, ltv: Ratio) -> Result<Amount, AmountError> {
    collateral.mul_price(price)?.mul_ratio(ltv)
}

// 5.2: (collateral * price * threshold) / debt
pub fn health_factor(
    collateral: Amount,
    debt: Amount,
    price: Price,
    liquidation_threshold: Ratio,
) -> Result<HealthFactor, AmountError> {
    if debt.is_zero() {
        return Ok(HealthFactor::Infinite);
    }

    let risk_adjusted = collateral.mul_price(price)?.mul_ratio(liquidation_threshold)?;
    let factor = risk_adjusted
        .value()
        .checked_div(debt.value())
        .ok_or(AmountError::Overflow)?;

    Ok(HealthFactor::Finite(factor))
}

pub fn is_liquidatable(
    collateral: Amount,
    debt: Amount,
    price: Price,
    liquidation_threshold: Ratio,
) -> Result<bool, AmountError> {
    Ok(health_factor(collateral, debt, price, liquidation_threshold)?.is_liquidatable())
}
