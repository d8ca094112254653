//! Price oracle view.
//!
//! The engine is agnostic to where the collateral/debt-unit exchange rate comes
//! from (a feed, an owner action, a test harness). This module only caches the
//! most recent rate and hands out immutable snapshots. Every borrow, health, or
//! liquidation decision takes exactly one snapshot at entry; reading the price
//! twice within one decision is a correctness bug.

use crate::types::{Price, Timestamp};
use serde::{Deserialize, Serialize};

/// An immutable view of the price at a point in time. Thread this through a
/// whole decision instead of re-reading the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub price: Price,
    pub taken_at: Timestamp,
}

// 2.0: cached current price plus its update time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleView {
    current: Price,
    updated_at: Timestamp,
}

impl OracleView {
    pub fn new(initial: Price, timestamp: Timestamp) -> Self {
        Self {
            current: initial,
            updated_at: timestamp,
        }
    }

    /// Replace the cached rate. The swap is atomic from the perspective of
    /// snapshot holders: snapshots taken before the update keep the old rate.
    pub fn update(&mut self, price: Price, timestamp: Timestamp) -> Price {
        let previous = self.current;
        self.current = price;
        self.updated_at = timestamp;
        previous
    }

    pub fn snapshot(&self, now: Timestamp) -> PriceSnapshot {
        PriceSnapshot {
            price: self.current,
            taken_at: now,
        }
    }

    pub fn current(&self) -> Price {
        self.current
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// For periodic scanners that want to skip work on a dead feed.
    pub fn is_stale(&self, now: Timestamp, max_age_ms: i64) -> bool {
        now.as_millis().saturating_sub(self.updated_at.as_millis()) > max_age_ms
    }
}
