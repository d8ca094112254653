// 3.5: staking yield. rewards accrue continuously against the staked balance
// and are materialized at discrete checkpoints: accrued = staked * rate * hours.
// calling accrual twice at the same timestamp is a no-op (elapsed = 0).

use crate::types::{Amount, AmountError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardParams {
    /// Fraction of the staked balance earned per hour.
    pub rate_per_hour: Decimal,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            rate_per_hour: dec!(0.0001),
        }
    }
}

// 3.6: the accrual formula. truncates, so dust stays with the protocol.
pub fn accrued_reward(
    staked: Amount,
    elapsed_hours: Decimal,
    params: &RewardParams,
) -> Result<Amount, AmountError> {
    if staked.is_zero() || elapsed_hours.is_zero() {
        return Ok(Amount::zero());
    }

    let earned = staked
        .value()
        .checked_mul(params.rate_per_hour)
        .and_then(|v| v.checked_mul(elapsed_hours))
        .ok_or(AmountError::Overflow)?;

    Amount::new(earned).ok_or(AmountError::Underflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accrual_scales_with_time() {
        let staked = Amount::new_unchecked(dec!(1000));
        let params = RewardParams::default();

        let one_hour = accrued_reward(staked, dec!(1), &params).unwrap();
        let ten_hours = accrued_reward(staked, dec!(10), &params).unwrap();

        assert_eq!(one_hour.value(), dec!(0.1));
        assert_eq!(ten_hours.value(), dec!(1));
    }

    #[test]
    fn zero_elapsed_accrues_nothing() {
        let staked = Amount::new_unchecked(dec!(1000));
        let params = RewardParams::default();

        let earned = accrued_reward(staked, Decimal::ZERO, &params).unwrap();
        assert!(earned.is_zero());
    }

    #[test]
    fn zero_stake_accrues_nothing() {
        let params = RewardParams::default();
        let earned = accrued_reward(Amount::zero(), dec!(100), &params).unwrap();
        assert!(earned.is_zero());
    }
}
