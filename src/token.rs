// 7.0 token.rs: MOCKED. the external token contract, reduced to balance moves.
// one book per token: per-account balances, the protocol's own reserve, and an
// explicit total supply so conservation is checkable. debit/credit against the
// reserve conserve supply; mint is the only way supply grows.

use crate::types::{AccountId, Amount, AmountError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Amount,
        available: Amount,
    },

    #[error("Arithmetic error: {0}")]
    Math(#[from] AmountError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBook {
    symbol: String,
    balances: HashMap<AccountId, Amount>,
    reserve: Amount,
    total_supply: Amount,
}

impl TokenBook {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            balances: HashMap::new(),
            reserve: Amount::zero(),
            total_supply: Amount::zero(),
        }
    }

    /// Seed the protocol reserve directly (pool bootstrap).
    pub fn with_reserve(symbol: &str, amount: Amount) -> Self {
        Self {
            symbol: symbol.to_string(),
            balances: HashMap::new(),
            reserve: amount,
            total_supply: amount,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances
            .get(&account)
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    pub fn reserve(&self) -> Amount {
        self.reserve
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    // 7.1: issuance. supply grows; nothing else does this.
    pub fn mint(&mut self, account: AccountId, amount: Amount) -> Result<Amount, TokenError> {
        let new_balance = self.balance_of(account).add(amount)?;
        let new_supply = self.total_supply.add(amount)?;

        self.balances.insert(account, new_balance);
        self.total_supply = new_supply;
        Ok(new_balance)
    }

    // 7.2: account -> reserve. fails without touching state when short.
    pub fn debit_to_reserve(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let balance = self.balance_of(account);
        let new_balance = balance
            .sub(amount)
            .map_err(|_| TokenError::InsufficientBalance {
                requested: amount,
                available: balance,
            })?;
        let new_reserve = self.reserve.add(amount)?;

        self.balances.insert(account, new_balance);
        self.reserve = new_reserve;
        Ok(())
    }

    // 7.3: plain account-to-account transfer, like the token contract's.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(from);
        let new_from = from_balance
            .sub(amount)
            .map_err(|_| TokenError::InsufficientBalance {
                requested: amount,
                available: from_balance,
            })?;
        let new_to = self.balance_of(to).add(amount)?;

        self.balances.insert(from, new_from);
        self.balances.insert(to, new_to);
        Ok(())
    }

    // 7.4: reserve -> account.
    pub fn credit_from_reserve(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let new_reserve = self
            .reserve
            .sub(amount)
            .map_err(|_| TokenError::InsufficientBalance {
                requested: amount,
                available: self.reserve,
            })?;
        let new_balance = self.balance_of(account).add(amount)?;

        self.reserve = new_reserve;
        self.balances.insert(account, new_balance);
        Ok(())
    }
}
