// 10.3: result types and errors for engine commands.

use crate::ledger::LedgerError;
use crate::risk::HealthFactor;
use crate::token::TokenError;
use crate::types::{AccountId, Amount, AmountError};

/// What a liquidation actually did to a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidationOutcome {
    pub account: AccountId,
    pub seized_collateral: Amount,
    pub cleared_debt: Amount,
    pub remaining_debt: Amount,
    pub remaining_collateral: Amount,
    /// Seizure value routed to the protocol fee pool, in debt units.
    pub fee_value: Amount,
    pub partial: bool,
    pub health: HealthFactor,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Arithmetic error: {0}")]
    Math(#[from] AmountError),

    #[error("{0} is not the protocol owner")]
    Unauthorized(AccountId),

    #[error("Invalid price: must be positive")]
    InvalidPrice,

    #[error("Insufficient fees: requested {requested}, available {available}")]
    InsufficientFees {
        requested: Amount,
        available: Amount,
    },

    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        requested: Amount,
        available: Amount,
    },

    #[error("Position for {account} is not liquidatable (health {health})")]
    NotLiquidatable {
        account: AccountId,
        health: HealthFactor,
    },
}
