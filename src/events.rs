// 11.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external systems. the EventPayload enum lists
// all event types.

use crate::risk::HealthFactor;
use crate::types::{AccountId, Amount, Price, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Staking events
    Staked(StakedEvent),
    StakeWithdrawn(StakeWithdrawnEvent),
    RewardsAccrued(RewardsAccruedEvent),

    // Borrowing events
    CollateralDeposited(CollateralDepositedEvent),
    Borrowed(BorrowedEvent),
    BorrowRejected(BorrowRejectedEvent),
    Repaid(RepaidEvent),

    // Risk events
    Liquidated(LiquidatedEvent),

    // Treasury events
    PriceUpdated(PriceUpdatedEvent),
    TokensMinted(TokensMintedEvent),
    FeesWithdrawn(FeesWithdrawnEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakedEvent {
    pub account: AccountId,
    pub amount: Amount,
    pub new_staked: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeWithdrawnEvent {
    pub account: AccountId,
    pub staked: Amount,
    pub rewards: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsAccruedEvent {
    pub account: AccountId,
    pub amount: Amount,
    pub new_total: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralDepositedEvent {
    pub account: AccountId,
    pub amount: Amount,
    pub new_collateral: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowedEvent {
    pub account: AccountId,
    pub amount: Amount,
    pub new_debt: Amount,
    pub price: Price,
}

/// Emitted for audit before the command returns its error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRejectedEvent {
    pub account: AccountId,
    pub requested: Amount,
    pub allowed: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaidEvent {
    pub account: AccountId,
    pub amount: Amount,
    pub fee: Amount,
    pub remaining_debt: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidatedEvent {
    pub account: AccountId,
    pub seized_collateral: Amount,
    pub cleared_debt: Amount,
    pub remaining_debt: Amount,
    pub price: Price,
    pub health: HealthFactor,
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdatedEvent {
    pub old_price: Price,
    pub new_price: Price,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensMintedEvent {
    pub account: AccountId,
    pub amount: Amount,
    pub new_balance: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeesWithdrawnEvent {
    pub to: AccountId,
    pub amount: Amount,
    pub remaining: Amount,
}
