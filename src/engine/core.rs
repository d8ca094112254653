// 10.1 engine/core.rs: main engine. holds the ledger, oracle, token books and
// protocol aggregates.

use super::config::EngineConfig;
use crate::config::ProtocolConfig;
use crate::events::{Event, EventId, EventPayload};
use crate::ledger::PositionLedger;
use crate::oracle::OracleView;
use crate::protocol::ProtocolState;
use crate::token::TokenBook;
use crate::types::{AccountId, Amount, Timestamp};

/** 10.2: main engine struct. all state lives here */
#[derive(Debug)]
pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) policy: ProtocolConfig,
    pub(super) ledger: PositionLedger,
    pub(super) state: ProtocolState,
    pub(super) oracle: OracleView,
    pub(super) stake_token: TokenBook,
    pub(super) debt_token: TokenBook,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Engine {
    pub fn new(policy: ProtocolConfig) -> Self {
        Self::with_config(policy, EngineConfig::default())
    }

    pub fn with_config(policy: ProtocolConfig, config: EngineConfig) -> Self {
        let start = Timestamp::from_millis(0);
        let oracle = OracleView::new(policy.initial_price, start);
        let stake_token = TokenBook::new(&policy.stake_symbol);
        let debt_token = TokenBook::with_reserve(&policy.debt_symbol, policy.initial_liquidity);

        Self {
            config,
            policy,
            ledger: PositionLedger::new(),
            state: ProtocolState::new(),
            oracle,
            stake_token,
            debt_token,
            events: Vec::new(),
            next_event_id: 1,
            current_time: start,
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn policy(&self) -> &ProtocolConfig {
        &self.policy
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    pub fn oracle(&self) -> &OracleView {
        &self.oracle
    }

    pub fn stake_token(&self) -> &TokenBook {
        &self.stake_token
    }

    pub fn debt_token(&self) -> &TokenBook {
        &self.debt_token
    }

    // the token books model an external service; hosts and tests may drive
    // them directly
    pub fn stake_token_mut(&mut self) -> &mut TokenBook {
        &mut self.stake_token
    }

    pub fn debt_token_mut(&mut self) -> &mut TokenBook {
        &mut self.debt_token
    }

    /// Debt units actually available for lending. The fee pool is a senior
    /// claim on the reserve, so it is never lent out.
    pub fn lendable_liquidity(&self) -> Amount {
        self.debt_token
            .reserve()
            .saturating_sub(self.state.protocol_fees())
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(super) fn is_owner(&self, caller: AccountId) -> bool {
        caller == self.policy.owner
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
