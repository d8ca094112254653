//! Collateral and loan commands.
//!
//! Borrowing consults the risk engine against one price snapshot before any
//! debt is committed; the ceiling check is strict at issuance. Repayments
//! route a configurable spread into the protocol fee pool.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{BorrowRejectedEvent, BorrowedEvent, CollateralDepositedEvent, EventPayload, RepaidEvent};
use crate::ledger::LedgerError;
use crate::position::PositionSnapshot;
use crate::risk;
use crate::token::TokenError;
use crate::types::{AccountId, Amount};

impl Engine {
    /// Lock tokens as collateral for borrowing.
    pub fn deposit_collateral(
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
        let snap = self.ledger.add_collateral(account, amount, now)?;
        self.stake_token.debit_to_reserve(account, amount)?;

        self.emit_event(EventPayload::CollateralDeposited(CollateralDepositedEvent {
            account,
            amount,
            new_collateral: snap.collateral,
        }));

        Ok(snap)
    }

    /// Borrow debt units against collateral, up to collateral * price * LTV.
    pub fn borrow(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<PositionSnapshot, EngineError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }

        // one snapshot for the whole decision
        let now = self.current_time;
        let price = self.oracle.snapshot(now).price;

        let collateral = self.ledger.snapshot(account, now).collateral;
        let allowed = risk::max_borrow(collateral, price, self.policy.risk.ltv)?;

        let available = self.lendable_liquidity();
        if amount > available {
            return Err(EngineError::InsufficientLiquidity {
                requested: amount,
                available,
            });
        }

        let snap = match self.ledger.add_debt(account, amount, allowed, now) {
            Ok(snap) => snap,
            Err(LedgerError::ExceedsLimit { requested, allowed }) => {
                self.emit_event(EventPayload::BorrowRejected(BorrowRejectedEvent {
                    account,
                    requested,
                    allowed,
                }));
                return Err(LedgerError::ExceedsLimit { requested, allowed }.into());
            }
            Err(err) => return Err(err.into()),
        };

        self.debt_token.credit_from_reserve(account, amount)?;
        self.state.record_borrow(amount)?;

        self.emit_event(EventPayload::Borrowed(BorrowedEvent {
            account,
            amount,
            new_debt: snap.debt,
            price,
        }));

        Ok(snap)
    }

    /// Repay outstanding debt. A spread of the repayment accrues to the
    /// protocol fee pool; the rest returns to lendable liquidity.
    pub fn repay(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<PositionSnapshot, EngineError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }

        let balance = self.debt_token.balance_of(account);
        if amount > balance {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: balance,
            }
            .into());
        }

        let snap = self.ledger.reduce_debt(account, amount)?;
        self.debt_token.debit_to_reserve(account, amount)?;

        let fee = amount.mul_ratio(self.policy.repay_fee_spread)?;
        self.state.record_repayment(amount)?;
        if !fee.is_zero() {
            self.state.add_fees(fee)?;
        }

        self.emit_event(EventPayload::Repaid(RepaidEvent {
            account,
            amount,
            fee,
            remaining_debt: snap.debt,
        }));

        Ok(snap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProtocolConfig;
    use crate::types::Ratio;
    use rust_decimal_macros::dec;

    fn amt(v: rust_decimal::Decimal) -> Amount {
        Amount::new(v).unwrap()
    }

    // price 1, ltv 0.5, threshold 0.5: the worked-example policy
    fn example_engine(user: AccountId, tokens: rust_decimal::Decimal) -> Engine {
        let mut config = ProtocolConfig::default();
        config.risk.ltv = Ratio::new(dec!(0.5)).unwrap();
        config.risk.liquidation_threshold = Ratio::new(dec!(0.5)).unwrap();
        let owner = config.owner;

        let mut engine = Engine::new(config);
        engine.mint(owner, user, amt(tokens)).unwrap();
        engine
    }

    #[test]
    fn deposit_locks_tokens() {
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));

        let snap = engine.deposit_collateral(user, amt(dec!(40))).unwrap();

        assert_eq!(snap.collateral.value(), dec!(40));
        assert_eq!(engine.stake_token().balance_of(user).value(), dec!(60));
        assert_eq!(engine.stake_token().reserve().value(), dec!(40));
    }

    #[test]
    fn borrow_ceiling_example() {
        // collateral 40, price 1, ltv 0.5 -> ceiling 20
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));
        engine.deposit_collateral(user, amt(dec!(40))).unwrap();

        let rejected = engine.borrow(user, amt(dec!(21)));
        assert!(matches!(
            rejected,
            Err(EngineError::Ledger(LedgerError::ExceedsLimit { .. }))
        ));
        assert!(engine.position(user).debt.is_zero());

        let snap = engine.borrow(user, amt(dec!(20))).unwrap();
        assert_eq!(snap.debt.value(), dec!(20));
        assert_eq!(engine.debt_token().balance_of(user).value(), dec!(20));
    }

    #[test]
    fn borrow_to_ceiling_in_steps() {
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));
        engine.deposit_collateral(user, amt(dec!(40))).unwrap();

        engine.borrow(user, amt(dec!(12))).unwrap();
        engine.borrow(user, amt(dec!(8))).unwrap();

        // ceiling is reached; one more unit fails
        let result = engine.borrow(user, amt(dec!(1)));
        assert!(matches!(
            result,
            Err(EngineError::Ledger(LedgerError::ExceedsLimit { .. }))
        ));
    }

    #[test]
    fn borrow_tracks_protocol_totals() {
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));
        engine.deposit_collateral(user, amt(dec!(40))).unwrap();

        let liquidity_before = engine.lendable_liquidity();
        engine.borrow(user, amt(dec!(20))).unwrap();

        let stats = engine.protocol_stats();
        assert_eq!(stats.total_borrows.value(), dec!(20));
        assert_eq!(
            stats.total_liquidity.value(),
            liquidity_before.value() - dec!(20)
        );
    }

    #[test]
    fn borrow_rejection_is_audited() {
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));
        engine.deposit_collateral(user, amt(dec!(40))).unwrap();

        let _ = engine.borrow(user, amt(dec!(21)));

        let rejected = engine
            .events()
            .iter()
            .any(|e| matches!(e.payload, EventPayload::BorrowRejected(_)));
        assert!(rejected);
    }

    #[test]
    fn repay_routes_spread_to_fees() {
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));
        engine.deposit_collateral(user, amt(dec!(40))).unwrap();
        engine.borrow(user, amt(dec!(20))).unwrap();

        let snap = engine.repay(user, amt(dec!(10))).unwrap();

        assert_eq!(snap.debt.value(), dec!(10));
        // 1% of the repayment
        assert_eq!(engine.protocol_stats().protocol_fees.value(), dec!(0.1));
        assert_eq!(engine.protocol_stats().total_borrows.value(), dec!(10));
    }

    #[test]
    fn repay_beyond_debt_rejected() {
        let user = AccountId(7);
        let helper = AccountId(8);
        let mut engine = example_engine(user, dec!(100));
        let owner = engine.policy().owner;
        engine.mint(owner, helper, amt(dec!(100))).unwrap();

        engine.deposit_collateral(user, amt(dec!(40))).unwrap();
        engine.borrow(user, amt(dec!(10))).unwrap();

        // spare debt tokens from a second borrower so the balance check passes
        engine.deposit_collateral(helper, amt(dec!(40))).unwrap();
        engine.borrow(helper, amt(dec!(10))).unwrap();
        engine
            .debt_token_mut()
            .transfer(helper, user, amt(dec!(10)))
            .unwrap();

        let result = engine.repay(user, amt(dec!(15)));
        assert!(matches!(
            result,
            Err(EngineError::Ledger(LedgerError::ExceedsDebt { .. }))
        ));
        assert_eq!(engine.position(user).debt.value(), dec!(10));
    }

    #[test]
    fn repaying_everything_leaves_collateral_untouched() {
        let user = AccountId(7);
        let mut engine = example_engine(user, dec!(100));
        engine.deposit_collateral(user, amt(dec!(40))).unwrap();
        engine.borrow(user, amt(dec!(20))).unwrap();

        let snap = engine.repay(user, amt(dec!(20))).unwrap();

        assert!(snap.debt.is_zero());
        assert_eq!(snap.collateral.value(), dec!(40));
    }

    #[test]
    fn borrow_exhausting_pool_fails() {
        let user = AccountId(7);
        let mut config = ProtocolConfig::default();
        config.risk.ltv = Ratio::new(dec!(0.5)).unwrap();
        config.risk.liquidation_threshold = Ratio::new(dec!(0.5)).unwrap();
        config.initial_liquidity = amt(dec!(15));
        let owner = config.owner;

        let mut engine = Engine::new(config);
        engine.mint(owner, user, amt(dec!(100))).unwrap();
        engine.deposit_collateral(user, amt(dec!(100))).unwrap();

        // ceiling is 50 but the pool only holds 15
        let result = engine.borrow(user, amt(dec!(20)));
        assert!(matches!(
            result,
            Err(EngineError::InsufficientLiquidity { .. })
        ));
    }
}
