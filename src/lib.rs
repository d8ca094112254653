// lendfi-core: collateralized lending engine.
// accounting-first architecture: balances, borrow ceilings and liquidation take priority.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AccountId, Amount, Ratio, Price, Timestamp
//   2.x  oracle.rs: cached collateral/debt-unit exchange rate, atomic snapshots
//   3.x  position.rs: per-account position: stake, collateral, debt, rewards
//   3.5  rewards.rs: time-based reward accrual between checkpoints
//   4.x  ledger.rs: position ledger: account map, atomic mutators
//   5.x  risk.rs: max borrow, health factor, liquidation trigger
//   6.x  liquidation.rs: seizure sizing, full vs partial liquidation
//   7.x  token.rs: external token books (mocked): balances, reserve, supply
//   8.x  protocol.rs: singleton aggregates: fee pool, total borrows
//   9.x  config.rs: policy ratios, owner, presets, validation
//   10.x engine/: command/query engine: staking, borrowing, liquidations, treasury
//   11.x events.rs: state transition events for audit

// core accounting modules
pub mod engine;
pub mod events;
pub mod ledger;
pub mod position;
pub mod rewards;
pub mod types;

// risk and liquidation modules
pub mod liquidation;
pub mod risk;

// integration modules
pub mod config;
pub mod oracle;
pub mod protocol;
pub mod token;

// re exports for convenience
pub use config::*;
pub use engine::*;
pub use events::*;
pub use ledger::*;
pub use liquidation::*;
pub use oracle::*;
pub use position::*;
pub use protocol::*;
pub use rewards::*;
pub use risk::*;
pub use token::*;
pub use types::*;
