// 8.0: process-wide aggregates. the fee pool and total borrows are maintained
// incrementally by the engine's commands; lendable liquidity is derived as the
// debt reserve minus the fee pool, so the owner's fees are never lent out.

use crate::types::{Amount, AmountError, Price};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolState {
    total_borrows: Amount,
    protocol_fees: Amount,
}

impl ProtocolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_borrows(&self) -> Amount {
        self.total_borrows
    }

    pub fn protocol_fees(&self) -> Amount {
        self.protocol_fees
    }

    pub fn record_borrow(&mut self, amount: Amount) -> Result<(), AmountError> {
        self.total_borrows = self.total_borrows.add(amount)?;
        Ok(())
    }

    pub fn record_repayment(&mut self, amount: Amount) -> Result<(), AmountError> {
        self.total_borrows = self.total_borrows.sub(amount)?;
        Ok(())
    }

    pub fn add_fees(&mut self, amount: Amount) -> Result<(), AmountError> {
        self.protocol_fees = self.protocol_fees.add(amount)?;
        Ok(())
    }

    /// Fee withdrawal. The caller checks the pool first; underflow here means
    /// a bookkeeping bug, not user error.
    pub fn take_fees(&mut self, amount: Amount) -> Result<(), AmountError> {
        self.protocol_fees = self.protocol_fees.sub(amount)?;
        Ok(())
    }
}

/// The dashboard's four stat cards, as one query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolStats {
    pub total_liquidity: Amount,
    pub total_borrows: Amount,
    pub price: Price,
    pub protocol_fees: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amt(v: i64) -> Amount {
        Amount::new(rust_decimal::Decimal::from(v)).unwrap()
    }

    #[test]
    fn borrow_counter_tracks_issue_and_repay() {
        let mut state = ProtocolState::new();

        state.record_borrow(amt(100)).unwrap();
        state.record_borrow(amt(50)).unwrap();
        assert_eq!(state.total_borrows().value(), dec!(150));

        state.record_repayment(amt(120)).unwrap();
        assert_eq!(state.total_borrows().value(), dec!(30));
    }

    #[test]
    fn fee_pool_only_shrinks_on_take() {
        let mut state = ProtocolState::new();

        state.add_fees(amt(10)).unwrap();
        state.add_fees(amt(5)).unwrap();
        assert_eq!(state.protocol_fees().value(), dec!(15));

        state.take_fees(amt(15)).unwrap();
        assert!(state.protocol_fees().is_zero());

        assert!(state.take_fees(amt(1)).is_err());
    }
}
