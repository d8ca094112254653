//! The position ledger.
//!
//! Owns every account's position and is the only writer to them. Mutators
//! validate fully before touching state, so a failed command leaves the ledger
//! exactly as it found it. Positions are created implicitly on first use and
//! never deleted.
//!
//! Serialization contract: all mutation flows through `&mut self`, a single
//! writer queue. Operations on one account are therefore totally ordered and
//! overlapping mutations cannot be expressed; a concurrent host fronts this
//! with its own queue.

use crate::position::{Position, PositionSnapshot};
use crate::rewards::{accrued_reward, RewardParams};
use crate::types::{AccountId, Amount, AmountError, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[error("Nothing staked for {0}")]
    NoStake(AccountId),

    #[error("Borrow of {requested} exceeds limit: {allowed} allowed")]
    ExceedsLimit { requested: Amount, allowed: Amount },

    #[error("Repay of {requested} exceeds outstanding debt {outstanding}")]
    ExceedsDebt {
        requested: Amount,
        outstanding: Amount,
    },

    #[error("Arithmetic error: {0}")]
    Math(#[from] AmountError),
}

// 4.0: account map. the whole protocol's per-user state lives here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionLedger {
    positions: HashMap<AccountId, Position>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }

    pub fn position(&self, account: AccountId) -> Option<&Position> {
        self.positions.get(&account)
    }

    /// Snapshot for queries. Unknown accounts read as all-zero.
    pub fn snapshot(&self, account: AccountId, now: Timestamp) -> PositionSnapshot {
        self.positions
            .get(&account)
            .map(Position::snapshot)
            .unwrap_or_else(|| PositionSnapshot::empty(now))
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Position)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn position_mut(&mut self, account: AccountId, now: Timestamp) -> &mut Position {
        self.positions
            .entry(account)
            .or_insert_with(|| Position::new(now))
    }

    // 4.1: stake mutation. token debit is coordinated by the caller.
    pub fn add_stake(
        &mut self,
        account: AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<PositionSnapshot, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let pos = self.position_mut(account, now);
        let new_staked = pos.staked.add(amount)?;
        pos.staked = new_staked;
        Ok(pos.snapshot())
    }

    // 4.2: full withdrawal: stake plus accrued rewards, both zeroed.
    // collateral and debt are untouched.
    pub fn take_stake_and_rewards(
        &mut self,
        account: AccountId,
    ) -> Result<(Amount, Amount), LedgerError> {
        let pos = self
            .positions
            .get_mut(&account)
            .filter(|p| !p.staked.is_zero())
            .ok_or(LedgerError::NoStake(account))?;

        let staked = pos.staked;
        let rewards = pos.reward_accrued;
        pos.staked = Amount::zero();
        pos.reward_accrued = Amount::zero();
        Ok((staked, rewards))
    }

    pub fn add_collateral(
        &mut self,
        account: AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<PositionSnapshot, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let pos = self.position_mut(account, now);
        let new_collateral = pos.collateral.add(amount)?;
        pos.collateral = new_collateral;
        Ok(pos.snapshot())
    }

    // 4.3: debt issuance against a ceiling the risk engine computed from one
    // price snapshot. the ceiling check is strict at the moment debt increases;
    // later price moves may violate it, which is what liquidation is for.
    pub fn add_debt(
        &mut self,
        account: AccountId,
        amount: Amount,
        allowed: Amount,
        now: Timestamp,
    ) -> Result<PositionSnapshot, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let pos = self.position_mut(account, now);
        let new_debt = pos.debt.add(amount)?;
        if new_debt > allowed {
            return Err(LedgerError::ExceedsLimit {
                requested: amount,
                allowed,
            });
        }

        pos.debt = new_debt;
        Ok(pos.snapshot())
    }

    pub fn reduce_debt(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<PositionSnapshot, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let outstanding = self
            .positions
            .get(&account)
            .map(|p| p.debt)
            .unwrap_or_else(Amount::zero);
        if amount > outstanding {
            return Err(LedgerError::ExceedsDebt {
                requested: amount,
                outstanding,
            });
        }

        // account exists: outstanding >= amount > 0
        let pos = self.positions.get_mut(&account).expect("position exists");
        pos.debt = pos.debt.sub(amount)?;
        Ok(pos.snapshot())
    }

    // 4.4: liquidation write: seize collateral, clear debt, one commit.
    pub fn apply_seizure(
        &mut self,
        account: AccountId,
        seized: Amount,
        cleared: Amount,
        now: Timestamp,
    ) -> Result<PositionSnapshot, LedgerError> {
        let pos = self.position_mut(account, now);
        let new_collateral = pos.collateral.sub(seized)?;
        let new_debt = pos.debt.sub(cleared)?;

        pos.collateral = new_collateral;
        pos.debt = new_debt;
        Ok(pos.snapshot())
    }

    // 4.5: reward checkpoint. deterministic in elapsed time; a second call at
    // the same timestamp sees zero elapsed and changes nothing.
    pub fn accrue(
        &mut self,
        account: AccountId,
        now: Timestamp,
        params: &RewardParams,
    ) -> Result<Amount, LedgerError> {
        let pos = self.position_mut(account, now);
        if now <= pos.last_update {
            return Ok(Amount::zero());
        }

        let elapsed = pos.last_update.elapsed_hours(&now);
        let delta = accrued_reward(pos.staked, elapsed, params)?;
        let new_reward = pos.reward_accrued.add(delta)?;

        pos.reward_accrued = new_reward;
        pos.last_update = now;
        Ok(delta)
    }
}
