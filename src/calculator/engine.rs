//! The calculator state machine.
//!
//! Every operation is an immediate transition over [`CalculatorState`]. The
//! engine publishes three fields for a presentation layer: the display text,
//! the pending-operation label and the history log.

use serde::Serialize;
use tracing::{debug, warn};

use super::format::format_number;
use super::history::{History, HistoryEntry};
use super::{Action, CalcError, Operator};

/// Text shown on the display when division by zero resets the engine.
pub const DEFAULT_ERROR_TOKEN: &str = "Error";

/// Operand and operator bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    /// The operand being typed, kept as text to preserve what the user entered.
    pub current_input: String,
    /// Operator committed and awaiting its second operand.
    pub operator: Option<Operator>,
    /// Set while an operation is pending or a result is held for chaining.
    pub first_value: Option<f64>,
    /// The next digit replaces `current_input` instead of extending it.
    pub is_new_entry: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_input: String::new(),
            operator: None,
            first_value: None,
            is_new_entry: true,
        }
    }
}

/// Everything a presentation layer renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub display: String,
    pub pending: String,
    pub history: Vec<HistoryEntry>,
}

/// Four-function calculator with a bounded history.
#[derive(Clone, Debug)]
pub struct Calculator {
    state: CalculatorState,
    history: History,
    display: String,
    pending: String,
    error_token: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(History::default(), DEFAULT_ERROR_TOKEN)
    }
}

impl Calculator {
    pub fn new(history: History, error_token: impl Into<String>) -> Self {
        Self {
            state: CalculatorState::default(),
            history,
            display: "0".to_string(),
            pending: String::new(),
            error_token: error_token.into(),
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Text for the main display.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Label describing the pending operation or the last completed one.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            pending: self.pending.clone(),
            history: self.history.iter().cloned().collect(),
        }
    }

    /// Dispatch a single action.
    pub fn apply(&mut self, action: Action) -> Result<(), CalcError> {
        debug!(?action, "apply");
        match action {
            Action::Digit(d) => self.press_digit(d),
            Action::Decimal => self.press_decimal(),
            Action::Operator(op) => return self.press_operator(op),
            Action::Percent => return self.percent(),
            Action::Equals => return self.equals(),
            Action::Clear => self.clear(),
            Action::Backspace => self.backspace(),
            Action::ClearHistory => self.clear_history(),
            Action::SelectHistory(index) => return self.select_history(index),
        }
        Ok(())
    }

    /// Enter a digit. Values above 9 are ignored.
    pub fn press_digit(&mut self, digit: u8) {
        if digit > 9 {
            warn!(digit, "ignoring out-of-range digit");
            return;
        }
        let c = char::from(b'0' + digit);
        if self.state.is_new_entry {
            self.state.current_input = c.to_string();
            self.state.is_new_entry = false;
        } else {
            self.state.current_input.push(c);
        }
        self.refresh_display();
    }

    /// Start or extend a fractional part. A second point in the same operand
    /// is ignored.
    pub fn press_decimal(&mut self) {
        if self.state.is_new_entry {
            self.state.current_input = "0.".to_string();
            self.state.is_new_entry = false;
        } else if !self.state.current_input.contains('.') {
            self.state.current_input.push('.');
        }
        self.refresh_display();
    }

    /// Commit an operator. Operators chain left to right with no precedence:
    /// a held first value is resolved before the new operator takes effect.
    pub fn press_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        if self.state.current_input.is_empty() {
            return Ok(());
        }

        if self.state.first_value.is_some() {
            self.equals()?;
        } else {
            self.state.first_value = Some(parse_operand(&self.state.current_input)?);
        }
        let Some(first) = self.state.first_value else {
            return Ok(());
        };

        self.state.operator = Some(op);
        self.pending = format!("{} {}", format_number(first), op);
        self.state.current_input.clear();
        self.state.is_new_entry = true;
        debug!(pending = %self.pending, "operator committed");
        Ok(())
    }

    /// Resolve the pending operation.
    ///
    /// On division by zero the display shows the error token and the state
    /// is reset before the error is returned.
    pub fn equals(&mut self) -> Result<(), CalcError> {
        let (Some(first), Some(op)) = (self.state.first_value, self.state.operator) else {
            return Ok(());
        };
        if self.state.current_input.is_empty() {
            return Ok(());
        }

        let second = parse_operand(&self.state.current_input)?;
        let value = match op.apply(first, second) {
            Ok(value) => value,
            Err(err) => {
                warn!(%first, %op, %second, "{err}; resetting");
                self.clear();
                self.display = self.error_token.clone();
                return Err(err);
            }
        };

        let result = format_number(value);
        let entry = HistoryEntry::new(
            format!("{} {} {}", format_number(first), op, format_number(second)),
            result.clone(),
        );
        self.pending = entry.to_string();
        debug!(entry = %self.pending, "calculated");
        self.history.push(entry);

        self.state.current_input = result;
        self.state.first_value = Some(value);
        self.state.operator = None;
        self.state.is_new_entry = true;
        self.refresh_display();
        Ok(())
    }

    /// Turn the current operand into a percentage.
    ///
    /// With a pending operation the result is that percentage of the first
    /// value; otherwise the operand is divided by 100. The pending operation
    /// is left in place.
    pub fn percent(&mut self) -> Result<(), CalcError> {
        if self.state.current_input.is_empty() {
            return Ok(());
        }

        let value = parse_operand(&self.state.current_input)?;
        let (percentage, expression) = match (self.state.first_value, self.state.operator) {
            (Some(first), Some(op)) => (
                first * value / 100.0,
                format!("{} {} {}%", format_number(first), op, format_number(value)),
            ),
            _ => (value / 100.0, format!("{}%", format_number(value))),
        };

        let result = format_number(percentage);
        self.state.current_input = result.clone();
        self.refresh_display();
        self.history.push(HistoryEntry::new(expression, result));
        self.state.is_new_entry = true;
        Ok(())
    }

    /// Remove the last character of the operand. Removing the last digit
    /// leaves `0` and starts a new entry, as does leaving a fragment that is
    /// no longer a number (a lone `-`, or part of `Infinity` or `NaN`).
    pub fn backspace(&mut self) {
        if self.state.current_input.is_empty() {
            return;
        }
        self.state.current_input.pop();
        if parse_operand(&self.state.current_input).is_err() {
            self.state.current_input = "0".to_string();
            self.state.is_new_entry = true;
        }
        self.refresh_display();
    }

    /// Reset operand and operator state. History is kept.
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
        self.display = "0".to_string();
        self.pending.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.pending.clear();
    }

    /// Load a history entry's result as the current operand.
    pub fn select_history(&mut self, index: usize) -> Result<(), CalcError> {
        let entry = self
            .history
            .get(index)
            .ok_or(CalcError::HistoryIndexOutOfRange {
                index,
                len: self.history.len(),
            })?;
        self.state.current_input = entry.result.clone();
        self.pending = entry.to_string();
        self.refresh_display();
        Ok(())
    }

    fn refresh_display(&mut self) {
        self.display = if self.state.current_input.is_empty() {
            "0".to_string()
        } else {
            self.state.current_input.clone()
        };
    }
}

fn parse_operand(text: &str) -> Result<f64, CalcError> {
    text.parse()
        .map_err(|_| CalcError::InvalidOperand(text.to_string()))
}
