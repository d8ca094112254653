//! Staking commands: stake, withdraw, reward accrual.
//!
//! Rewards are checkpointed before any change to the staked balance so a new
//! stake never earns for time it was not present.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, RewardsAccruedEvent, StakeWithdrawnEvent, StakedEvent};
use crate::ledger::LedgerError;
use crate::position::PositionSnapshot;
use crate::token::TokenError;
use crate::types::{AccountId, Amount};

impl Engine {
    /// Stake tokens for yield. The caller's token balance funds the stake;
    /// the debit lands in the protocol reserve.
    pub fn stake(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<PositionSnapshot, EngineError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }

        let balance = self.stake_token.balance_of(account);
        if amount > balance {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: balance,
            }
            .into());
        }

        let now = self.current_time;
        self.checkpoint_rewards(account)?;
        let snap = self.ledger.add_stake(account, amount, now)?;
        self.stake_token.debit_to_reserve(account, amount)?;

        self.emit_event(EventPayload::Staked(StakedEvent {
            account,
            amount,
            new_staked: snap.staked,
        }));

        Ok(snap)
    }

    /// Withdraw the full stake plus accrued rewards, zeroing both.
    /// Collateral and debt are untouched.
    pub fn withdraw_stake(&mut self, account: AccountId) -> Result<PositionSnapshot, EngineError> {
        let has_stake = self
            .ledger
            .position(account)
            .map(|p| !p.staked.is_zero())
            .unwrap_or(false);
        if !has_stake {
            return Err(LedgerError::NoStake(account).into());
        }

        self.checkpoint_rewards(account)?;
        let (staked, rewards) = self.ledger.take_stake_and_rewards(account)?;

        self.stake_token.credit_from_reserve(account, staked)?;
        if !rewards.is_zero() {
            // yield is emission: the staking contract materializes new tokens
            self.stake_token.mint(account, rewards)?;
        }

        self.emit_event(EventPayload::StakeWithdrawn(StakeWithdrawnEvent {
            account,
            staked,
            rewards,
        }));

        Ok(self.ledger.snapshot(account, self.current_time))
    }

    /// Explicit accrual checkpoint at the current time. Idempotent: a second
    /// call at the same timestamp changes nothing.
    pub fn accrue_rewards(&mut self, account: AccountId) -> Result<PositionSnapshot, EngineError> {
        self.checkpoint_rewards(account)?;
        Ok(self.ledger.snapshot(account, self.current_time))
    }

    /// Periodic accrual pass over every known account. Returns how many
    /// accounts earned a non-zero amount.
    pub fn sweep_rewards(&mut self) -> Result<usize, EngineError> {
        let accounts: Vec<AccountId> = self.ledger.accounts().map(|(id, _)| *id).collect();

        let mut earned = 0;
        for account in accounts {
            if !self.checkpoint_rewards(account)?.is_zero() {
                earned += 1;
            }
        }
        Ok(earned)
    }

    pub(super) fn checkpoint_rewards(&mut self, account: AccountId) -> Result<Amount, EngineError> {
        let now = self.current_time;
        let delta = self.ledger.accrue(account, now, &self.policy.rewards)?;

        if !delta.is_zero() {
            let new_total = self.ledger.snapshot(account, now).reward_accrued;
            self.emit_event(EventPayload::RewardsAccrued(RewardsAccruedEvent {
                account,
                amount: delta,
                new_total,
            }));
        }

        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProtocolConfig;
    use crate::types::Timestamp;
    use rust_decimal_macros::dec;

    fn amt(v: rust_decimal::Decimal) -> Amount {
        Amount::new(v).unwrap()
    }

    fn funded_engine(account: AccountId, tokens: rust_decimal::Decimal) -> Engine {
        let config = ProtocolConfig::default();
        let owner = config.owner;
        let mut engine = Engine::new(config);
        engine.mint(owner, account, amt(tokens)).unwrap();
        engine
    }

    #[test]
    fn stake_moves_tokens_into_reserve() {
        let user = AccountId(7);
        let mut engine = funded_engine(user, dec!(200));

        let snap = engine.stake(user, amt(dec!(50))).unwrap();

        assert_eq!(snap.staked.value(), dec!(50));
        assert_eq!(engine.stake_token().balance_of(user).value(), dec!(150));
        assert_eq!(engine.stake_token().reserve().value(), dec!(50));
    }

    #[test]
    fn stake_beyond_balance_rejected() {
        let user = AccountId(7);
        let mut engine = funded_engine(user, dec!(10));

        let result = engine.stake(user, amt(dec!(11)));
        assert!(matches!(result, Err(EngineError::Token(_))));
        assert!(engine.stake_token().reserve().is_zero());
    }

    #[test]
    fn zero_stake_rejected() {
        let user = AccountId(7);
        let mut engine = funded_engine(user, dec!(10));

        let result = engine.stake(user, Amount::zero());
        assert_eq!(result, Err(EngineError::Ledger(LedgerError::InvalidAmount)));
    }

    #[test]
    fn withdraw_pays_stake_plus_rewards() {
        let user = AccountId(7);
        let mut engine = funded_engine(user, dec!(200));

        engine.stake(user, amt(dec!(100))).unwrap();
        engine.advance_time(10 * 3_600_000); // 10 hours

        let supply_before = engine.stake_token().total_supply();
        engine.withdraw_stake(user).unwrap();

        // 100 * 0.0001/h * 10h = 0.1 reward, minted on top of the stake
        assert_eq!(engine.stake_token().balance_of(user).value(), dec!(200.1));
        assert_eq!(
            engine.stake_token().total_supply().value(),
            supply_before.value() + dec!(0.1)
        );
        assert!(engine.position(user).staked.is_zero());
        assert!(engine.position(user).reward_accrued.is_zero());
    }

    #[test]
    fn withdraw_without_stake_fails() {
        let user = AccountId(7);
        let mut engine = funded_engine(user, dec!(10));

        let result = engine.withdraw_stake(user);
        assert_eq!(
            result,
            Err(EngineError::Ledger(LedgerError::NoStake(user)))
        );
    }

    #[test]
    fn accrue_twice_at_same_time_is_noop() {
        let user = AccountId(7);
        let mut engine = funded_engine(user, dec!(200));
        engine.stake(user, amt(dec!(100))).unwrap();

        engine.advance_time(3_600_000);
        let first = engine.accrue_rewards(user).unwrap();
        let second = engine.accrue_rewards(user).unwrap();

        assert_eq!(first.reward_accrued, second.reward_accrued);
        assert_eq!(first.reward_accrued.value(), dec!(0.01));
    }

    #[test]
    fn sweep_covers_all_stakers() {
        let config = ProtocolConfig::default();
        let owner = config.owner;
        let mut engine = Engine::new(config);

        for id in [2u64, 3, 4] {
            let user = AccountId(id);
            engine.mint(owner, user, amt(dec!(100))).unwrap();
            engine.stake(user, amt(dec!(100))).unwrap();
        }

        engine.advance_time(3_600_000);
        let earned = engine.sweep_rewards().unwrap();
        assert_eq!(earned, 3);

        engine.set_time(Timestamp::from_millis(3_600_000));
        let earned_again = engine.sweep_rewards().unwrap();
        assert_eq!(earned_again, 0);
    }
}
