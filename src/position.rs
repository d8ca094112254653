// 3.0: per-account position tracking. one Position per participant, created
// implicitly on first use, never deleted (it can return to all-zero).

use crate::types::{Amount, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Tokens staked for yield.
    pub staked: Amount,
    /// Tokens locked against borrowing.
    pub collateral: Amount,
    /// Outstanding borrowed amount, in debt units.
    pub debt: Amount,
    /// Yield earned since the last claim. Only grows between checkpoints.
    pub reward_accrued: Amount,
    /// Last accrual checkpoint.
    pub last_update: Timestamp,
    pub created_at: Timestamp,
}

impl Position {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            staked: Amount::zero(),
            collateral: Amount::zero(),
            debt: Amount::zero(),
            reward_accrued: Amount::zero(),
            last_update: timestamp,
            created_at: timestamp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staked.is_zero()
            && self.collateral.is_zero()
            && self.debt.is_zero()
            && self.reward_accrued.is_zero()
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            staked: self.staked,
            collateral: self.collateral,
            debt: self.debt,
            reward_accrued: self.reward_accrued,
            last_update: self.last_update,
        }
    }
}

/// Read-only copy handed back by every command and query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub staked: Amount,
    pub collateral: Amount,
    pub debt: Amount,
    pub reward_accrued: Amount,
    pub last_update: Timestamp,
}

impl PositionSnapshot {
    pub fn empty(timestamp: Timestamp) -> Self {
        Self {
            staked: Amount::zero(),
            collateral: Amount::zero(),
            debt: Amount::zero(),
            reward_accrued: Amount::zero(),
            last_update: timestamp,
        }
    }
}
