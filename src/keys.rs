//! Key sequence parsing for the command-line front end.
//!
//! Splits free-form input such as `12.5 x 4 =` or `7+3= h0 back` into
//! calculator actions and front-end commands.

use lazy_static::lazy_static;
use regex::Regex;

use crate::calculator::{Action, CalcError};

lazy_static! {
    /// One key per match. Longer words come first so `clear` is not read as
    /// `c` followed by garbage; the trailing `\S` catches unknown characters.
    static ref KEY: Regex = Regex::new(
        r"(?i)clear-history|clear|copy|back|bs|ch|h\d+|c|[0-9]|[.+\-*/x×÷%=]|\S"
    ).unwrap();
}

/// A parsed key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Forwarded to the calculator.
    Action(Action),
    /// Copy the current display to the clipboard.
    Copy,
}

/// Parse a line of keys. Fails on the first unknown key without applying
/// anything.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, CalcError> {
    KEY.find_iter(input)
        .map(|m| {
            let token = m.as_str();
            if token.eq_ignore_ascii_case("copy") {
                Ok(Key::Copy)
            } else {
                token.parse().map(Key::Action)
            }
        })
        .collect()
}
