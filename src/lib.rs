//! presupuesto - personal income, expense and debt ledger
//!
//! The core of the crate is the transaction ledger and the derived
//! aggregation views that feed charts and summary tables. Presentation is
//! deliberately thin (a small CLI); anything that renders is a consumer of
//! the core's outputs.
//!
//! # Architecture
//!
//! - `config`: path resolution (env override, XDG/APPDATA default)
//! - `error`: custom error types
//! - `models`: transaction entity and mutation rules, money formatting and
//!   debt arithmetic, fixed category registries
//! - `ledger`: the ordered transaction collection and its operations
//! - `services`: aggregation engine (grand totals, per-category breakdowns)
//! - `storage`: key-value gateway, file backend, wire codec, debounced
//!   autosaver
//! - `session`: load-gated coordinator wiring the ledger to persistence
//! - `cli`: command handlers

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
pub use ledger::Ledger;
pub use session::Session;
