use thiserror::Error;

/// Errors surfaced by the calculator engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// Divide was resolved with a zero second operand.
    #[error("division by zero")]
    DivisionByZero,

    /// The operand text could not be read as a number.
    #[error("invalid operand: {0:?}")]
    InvalidOperand(String),

    /// A history index past the end of the log was selected.
    #[error("history entry {index} does not exist ({len} entries)")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    /// A key or token that does not map to any calculator action.
    #[error("unknown key: {0:?}")]
    InvalidAction(String),
}
