//! Discrete user actions accepted by the engine.

use std::str::FromStr;

use super::{CalcError, Operator};

/// A single keypad or history action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// A digit key, 0 through 9.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Percent,
    Equals,
    Clear,
    Backspace,
    ClearHistory,
    /// Recall the result of the history entry at this index (0 is newest).
    SelectHistory(usize),
}

impl FromStr for Action {
    type Err = CalcError;

    /// Parse one key token. Word keys are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let action = match lower.as_str() {
            "." => Self::Decimal,
            "%" => Self::Percent,
            "=" => Self::Equals,
            "c" | "clear" => Self::Clear,
            "back" | "bs" => Self::Backspace,
            "ch" | "clear-history" => Self::ClearHistory,
            token if token.len() == 1 && token.as_bytes()[0].is_ascii_digit() => {
                Self::Digit(token.as_bytes()[0] - b'0')
            }
            token => {
                if let Some(index) = token.strip_prefix('h')
                    && !index.is_empty()
                {
                    let index = index
                        .parse()
                        .map_err(|_| CalcError::InvalidAction(s.to_string()))?;
                    Self::SelectHistory(index)
                } else {
                    Self::Operator(
                        s.parse()
                            .map_err(|_| CalcError::InvalidAction(s.to_string()))?,
                    )
                }
            }
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("7".parse::<Action>().unwrap(), Action::Digit(7));
        assert_eq!(".".parse::<Action>().unwrap(), Action::Decimal);
        assert_eq!("%".parse::<Action>().unwrap(), Action::Percent);
        assert_eq!("=".parse::<Action>().unwrap(), Action::Equals);
        assert_eq!(
            "÷".parse::<Action>().unwrap(),
            Action::Operator(Operator::Divide)
        );
        assert_eq!(
            "X".parse::<Action>().unwrap(),
            Action::Operator(Operator::Multiply)
        );
    }

    #[test]
    fn test_parse_words() {
        assert_eq!("C".parse::<Action>().unwrap(), Action::Clear);
        assert_eq!("clear".parse::<Action>().unwrap(), Action::Clear);
        assert_eq!("bs".parse::<Action>().unwrap(), Action::Backspace);
        assert_eq!(
            "clear-history".parse::<Action>().unwrap(),
            Action::ClearHistory
        );
        assert_eq!("h12".parse::<Action>().unwrap(), Action::SelectHistory(12));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("12".parse::<Action>().is_err());
        assert!("h".parse::<Action>().is_err());
        assert!("hx".parse::<Action>().is_err());
        assert!("sqrt".parse::<Action>().is_err());
    }
}
