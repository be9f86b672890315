//! Calculator engine.
//!
//! This module provides:
//! - The keypad state machine (digits, operators, percent, equals)
//! - Number formatting for results
//! - A bounded, newest-first history of completed calculations

mod action;
mod engine;
mod error;
mod format;
mod history;
mod operator;

pub use action::Action;
pub use engine::{Calculator, CalculatorState, DEFAULT_ERROR_TOKEN, Snapshot};
pub use error::CalcError;
pub use format::{MAX_FRACTION_DIGITS, format_number};
pub use history::{DEFAULT_HISTORY_CAPACITY, History, HistoryEntry};
pub use operator::Operator;
