//! A four-function calculator engine with a bounded, newest-first history.
//!
//! [`Calculator`] consumes keypad [`Action`]s and publishes a display string,
//! a pending-operation label and the history log.

pub mod calculator;
pub mod config;
pub mod keys;

pub use calculator::{Action, CalcError, Calculator, HistoryEntry, Operator, Snapshot};
pub use config::Config;
