// 9.0 config.rs: all policy in one place. ratios, owner, starting price, pool
// seed. passed into the engine at construction; nothing reads free-floating
// constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::liquidation::LiquidationParams;
use crate::rewards::RewardParams;
use crate::risk::RiskParams;
use crate::types::{AccountId, Amount, Price, Ratio};

// The complete protocol configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    // The one account allowed to call treasury operations
    pub owner: AccountId,
    // Symbol of the staked/collateral token
    pub stake_symbol: String,
    // Symbol of the unit loans are denominated and disbursed in
    pub debt_symbol: String,
    pub risk: RiskParams,
    pub liquidation: LiquidationParams,
    pub rewards: RewardParams,
    // Fraction of every repayment routed to the protocol fee pool
    pub repay_fee_spread: Ratio,
    // Starting collateral/debt-unit exchange rate
    pub initial_price: Price,
    // Debt units seeded into the lending pool at startup
    pub initial_liquidity: Amount,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            owner: AccountId(1),
            stake_symbol: "STK".to_string(),
            debt_symbol: "dUSD".to_string(),
            risk: RiskParams::default(),
            liquidation: LiquidationParams::default(),
            rewards: RewardParams::default(),
            repay_fee_spread: Ratio::new_unchecked(dec!(0.01)),
            initial_price: Price::new_unchecked(Decimal::ONE),
            initial_liquidity: Amount::new_unchecked(dec!(1_000_000)),
        }
    }
}

impl ProtocolConfig {
    // Preset matching the reference dashboard deployment
    pub fn demo() -> Self {
        let mut config = Self::default();
        config.initial_price = Price::new_unchecked(dec!(2450));
        config.initial_liquidity = Amount::new_unchecked(dec!(1_250_000));
        config
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        // ltv of 0 makes borrowing impossible, 1 leaves no safety margin
        if self.risk.ltv.is_zero() || self.risk.ltv.value() >= Decimal::ONE {
            return Err(ConfigError::InvalidRisk {
                reason: "LTV must be between 0 and 1".to_string(),
            });
        }

        // below the LTV, a fresh max borrow would be born liquidatable
        if self.risk.liquidation_threshold < self.risk.ltv {
            return Err(ConfigError::InvalidRisk {
                reason: "Liquidation threshold must not be below LTV".to_string(),
            });
        }

        if self.liquidation.penalty_rate.value() >= Decimal::ONE {
            return Err(ConfigError::InvalidLiquidation {
                reason: "Penalty rate must be below 100%".to_string(),
            });
        }

        if self.rewards.rate_per_hour < Decimal::ZERO
            || self.rewards.rate_per_hour >= Decimal::ONE
        {
            return Err(ConfigError::InvalidRewards {
                reason: "Reward rate must be in [0, 1) per hour".to_string(),
            });
        }

        if self.repay_fee_spread.value() >= Decimal::ONE {
            return Err(ConfigError::InvalidFees {
                reason: "Repay fee spread must be below 100%".to_string(),
            });
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidRisk { reason: String },
    InvalidLiquidation { reason: String },
    InvalidRewards { reason: String },
    InvalidFees { reason: String },
}
