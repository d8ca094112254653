//! Liquidation detection and execution.

use super::core::Engine;
use super::results::{EngineError, LiquidationOutcome};
use crate::events::{EventPayload, LiquidatedEvent};
use crate::liquidation;
use crate::types::{AccountId, Price};

impl Engine {
    /// Liquidate one position. Fails with `NotLiquidatable` when its health
    /// factor is at or above 1.
    pub fn liquidate(&mut self, account: AccountId) -> Result<LiquidationOutcome, EngineError> {
        let price = self.oracle.snapshot(self.current_time).price;
        self.execute_liquidation(account, price)
    }

    /// Evaluate every position against a single price snapshot and liquidate
    /// the eligible ones. The watch-list pass a keeper would run periodically.
    pub fn scan_liquidations(&mut self) -> Result<Vec<LiquidationOutcome>, EngineError> {
        let price = self.oracle.snapshot(self.current_time).price;

        let mut eligible: Vec<AccountId> = Vec::new();
        for (account, position) in self.ledger.accounts() {
            let verdict = liquidation::evaluate(
                &position.snapshot(),
                price,
                &self.policy.risk,
                &self.policy.liquidation,
            )?;
            if verdict.eligible {
                eligible.push(*account);
            }
        }

        let mut results = Vec::new();
        for account in eligible {
            results.push(self.execute_liquidation(account, price)?);
        }

        Ok(results)
    }

    fn execute_liquidation(
        &mut self,
        account: AccountId,
        price: Price,
    ) -> Result<LiquidationOutcome, EngineError> {
        let before = self.ledger.snapshot(account, self.current_time);
        let verdict = liquidation::evaluate(
            &before,
            price,
            &self.policy.risk,
            &self.policy.liquidation,
        )?;

        if !verdict.eligible {
            return Err(EngineError::NotLiquidatable {
                account,
                health: verdict.health,
            });
        }

        let fee_value = verdict.fee_value(price)?;
        let after = self.ledger.apply_seizure(
            account,
            verdict.seizable_collateral,
            verdict.cleared_debt,
            self.current_time,
        )?;

        // the seized tokens are already in the reserve; only the claims move
        self.state.record_repayment(verdict.cleared_debt)?;
        self.state.add_fees(fee_value)?;

        let partial = verdict.is_partial(before.debt);

        self.emit_event(EventPayload::Liquidated(LiquidatedEvent {
            account,
            seized_collateral: verdict.seizable_collateral,
            cleared_debt: verdict.cleared_debt,
            remaining_debt: after.debt,
            price,
            health: verdict.health,
            partial,
        }));

        Ok(LiquidationOutcome {
            account,
            seized_collateral: verdict.seizable_collateral,
            cleared_debt: verdict.cleared_debt,
            remaining_debt: after.debt,
            remaining_collateral: after.collateral,
            fee_value,
            partial,
            health: verdict.health,
        })
    }
}
