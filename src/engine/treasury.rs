//! Owner-gated treasury commands: mint, price updates, fee withdrawal.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, FeesWithdrawnEvent, PriceUpdatedEvent, TokensMintedEvent};
use crate::ledger::LedgerError;
use crate::types::{AccountId, Amount, Price};
use rust_decimal::Decimal;

impl Engine {
    /// Bootstrap/test issuance on the external stake token. Ledger state is
    /// untouched.
    pub fn mint(
        &mut self,
        caller: AccountId,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount, EngineError> {
        self.require_owner(caller)?;
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }

        let new_balance = self.stake_token.mint(account, amount)?;

        self.emit_event(EventPayload::TokensMinted(TokensMintedEvent {
            account,
            amount,
            new_balance,
        }));

        Ok(new_balance)
    }

    /// Replace the cached exchange rate. Decisions in flight keep the snapshot
    /// they took; everything after this sees only the new rate.
    pub fn set_price(&mut self, caller: AccountId, new_price: Decimal) -> Result<Price, EngineError> {
        self.require_owner(caller)?;
        let price = Price::new(new_price).ok_or(EngineError::InvalidPrice)?;

        let old_price = self.oracle.update(price, self.current_time);

        self.emit_event(EventPayload::PriceUpdated(PriceUpdatedEvent {
            old_price,
            new_price: price,
        }));

        Ok(price)
    }

    /// Withdraw accumulated fees to the owner. Returns the remaining pool.
    pub fn withdraw_fees(
        &mut self,
        caller: AccountId,
        amount: Amount,
    ) -> Result<Amount, EngineError> {
        self.require_owner(caller)?;
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }

        let available = self.state.protocol_fees();
        if amount > available {
            return Err(EngineError::InsufficientFees {
                requested: amount,
                available,
            });
        }

        // token transfer first: if the reserve cannot cover the claim,
        // nothing changes
        self.debt_token.credit_from_reserve(caller, amount)?;
        self.state.take_fees(amount)?;

        let remaining = self.state.protocol_fees();
        self.emit_event(EventPayload::FeesWithdrawn(FeesWithdrawnEvent {
            to: caller,
            amount,
            remaining,
        }));

        Ok(remaining)
    }

    fn require_owner(&self, caller: AccountId) -> Result<(), EngineError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(EngineError::Unauthorized(caller))
        }
    }
}
