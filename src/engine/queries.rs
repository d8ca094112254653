//! Read-only queries consumed by the presentation layer.

use super::core::Engine;
use super::results::EngineError;
use crate::position::PositionSnapshot;
use crate::protocol::ProtocolStats;
use crate::risk::{self, HealthFactor};
use crate::types::{AccountId, Amount};

impl Engine {
    /// Current position for an account. Unknown accounts read as all-zero.
    pub fn position(&self, account: AccountId) -> PositionSnapshot {
        self.ledger.snapshot(account, self.current_time)
    }

    /// Health factor at the current price. Infinite when the account has no
    /// debt.
    pub fn health_factor(&self, account: AccountId) -> Result<HealthFactor, EngineError> {
        let snapshot = self.oracle.snapshot(self.current_time);
        let position = self.ledger.snapshot(account, self.current_time);

        Ok(risk::health_factor(
            position.collateral,
            position.debt,
            snapshot.price,
            self.policy.risk.liquidation_threshold,
        )?)
    }

    /// Total borrow ceiling for an account at the current price.
    pub fn max_borrow(&self, account: AccountId) -> Result<Amount, EngineError> {
        let snapshot = self.oracle.snapshot(self.current_time);
        let position = self.ledger.snapshot(account, self.current_time);

        Ok(risk::max_borrow(
            position.collateral,
            snapshot.price,
            self.policy.risk.ltv,
        )?)
    }

    /// The dashboard's protocol stat cards.
    pub fn protocol_stats(&self) -> ProtocolStats {
        ProtocolStats {
            total_liquidity: self.lendable_liquidity(),
            total_borrows: self.state.total_borrows(),
            price: self.oracle.current(),
            protocol_fees: self.state.protocol_fees(),
        }
    }
}
