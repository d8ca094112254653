//! Liquidation sizing.
//!
//! An eligible position is cleared in full when the collateral covers the debt
//! plus the penalty. When it does not, the entire collateral is seized, the
//! debt is written down by the collateral's value, and the remainder stays
//! outstanding (partial liquidation). Seizure is always capped at the
//! account's collateral; liquidation can never drive a balance negative.

use crate::position::PositionSnapshot;
use crate::risk::{health_factor, HealthFactor, RiskParams};
use crate::types::{Amount, AmountError, Price, Ratio};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidationParams {
    /// Extra collateral seized on top of the debt-covering portion.
    pub penalty_rate: Ratio,
}

impl Default for LiquidationParams {
    fn default() -> Self {
        Self {
            penalty_rate: Ratio::new_unchecked(dec!(0.05)),
        }
    }
}

// 6.0: the verdict the processor acts on. seizable_collateral is in collateral
// tokens, cleared_debt in debt units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidationVerdict {
    pub eligible: bool,
    pub seizable_collateral: Amount,
    pub cleared_debt: Amount,
    pub health: HealthFactor,
}

impl LiquidationVerdict {
    fn not_eligible(health: HealthFactor) -> Self {
        Self {
            eligible: false,
            seizable_collateral: Amount::zero(),
            cleared_debt: Amount::zero(),
            health,
        }
    }

    /// True when the seizure clears only part of the debt.
    pub fn is_partial(&self, outstanding_debt: Amount) -> bool {
        self.eligible && self.cleared_debt < outstanding_debt
    }

    /// Value of the seized collateral in debt units. This is what moves into
    /// the protocol fee pool.
    pub fn fee_value(&self, price: Price) -> Result<Amount, AmountError> {
        self.seizable_collateral.mul_price(price)
    }
}

// 6.1: evaluate one position against one price snapshot.
pub fn evaluate(
    position: &PositionSnapshot,
    price: Price,
    risk: &RiskParams,
    params: &LiquidationParams,
) -> Result<LiquidationVerdict, AmountError> {
    let health = health_factor(
        position.collateral,
        position.debt,
        price,
        risk.liquidation_threshold,
    )?;

    if !health.is_liquidatable() {
        return Ok(LiquidationVerdict::not_eligible(health));
    }

    // collateral needed to cover the debt plus penalty, in collateral tokens
    let debt_in_collateral = position.debt.div_price(price)?;
    let penalty = debt_in_collateral.mul_ratio(params.penalty_rate)?;
    let required = debt_in_collateral.add(penalty)?;

    if required <= position.collateral {
        // full liquidation: whole debt cleared, unseized collateral stays put
        Ok(LiquidationVerdict {
            eligible: true,
            seizable_collateral: required,
            cleared_debt: position.debt,
            health,
        })
    } else {
        // partial: everything is seized, debt written down by its value
        let cleared = position.collateral.mul_price(price)?.min(position.debt);
        Ok(LiquidationVerdict {
            eligible: true,
            seizable_collateral: position.collateral,
            cleared_debt: cleared,
            health,
        })
    }
}
