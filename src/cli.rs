//! Command-line front end.
//!
//! Keys come from the positional arguments, or line by line from stdin when
//! none are given. After each line the pending label and display are printed.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{Action, CalcError, Calculator};
use zcalc::config::Config;
use zcalc::keys::{Key, parse_keys};

use crate::clipboard::copy_to_clipboard;

#[derive(Debug, Parser)]
#[command(name = "zcalc", version, about = "Four-function calculator with history")]
pub struct Cli {
    /// Path to a config file (defaults to $ZCALC_HOME/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of history entries to keep
    #[arg(long)]
    pub history_capacity: Option<usize>,

    /// Print the full engine state as JSON after each line
    #[arg(long)]
    pub json: bool,

    /// Copy every `=` result to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Key sequences, e.g. `7+3=` or `50 + 10 %`. Reads stdin when omitted.
    pub keys: Vec<String>,
}

type CopyHandler = Box<dyn Fn(&str) -> Result<()>>;

/// A calculator driven by lines of keys.
pub struct Session {
    calculator: Calculator,
    json: bool,
    copy_results: bool,
    on_copy: CopyHandler,
}

impl Session {
    pub fn new(calculator: Calculator, json: bool, copy_results: bool) -> Self {
        Self {
            calculator,
            json,
            copy_results,
            on_copy: Box::new(copy_to_clipboard),
        }
    }

    /// Replace the system clipboard as the target of copies.
    #[cfg(test)]
    fn with_copy_handler(mut self, handler: impl Fn(&str) -> Result<()> + 'static) -> Self {
        self.on_copy = Box::new(handler);
        self
    }

    /// Apply one line of keys and print the resulting state to `out`.
    ///
    /// Unknown keys reject the whole line. Calculator errors are reported on
    /// stderr and the session continues.
    pub fn run_line(&mut self, line: &str, out: &mut impl Write) -> Result<()> {
        let keys = match parse_keys(line) {
            Ok(keys) => keys,
            Err(err) => {
                report(&err);
                return Ok(());
            }
        };

        for key in keys {
            match key {
                Key::Action(action) => {
                    let resolves = action == Action::Equals && self.has_pending_operation();
                    if let Err(err) = self.calculator.apply(action) {
                        report(&err);
                        continue;
                    }
                    if resolves && self.copy_results {
                        self.copy_display();
                    }
                }
                Key::Copy => self.copy_display(),
            }
        }

        self.print(out)
    }

    /// Whether `=` would produce a result right now.
    fn has_pending_operation(&self) -> bool {
        let state = self.calculator.state();
        state.operator.is_some() && !state.current_input.is_empty()
    }

    fn copy_display(&self) {
        if let Err(err) = (self.on_copy)(self.calculator.display()) {
            tracing::warn!("{err:#}");
        }
    }

    fn print(&self, out: &mut impl Write) -> Result<()> {
        if self.json {
            let snapshot = serde_json::to_string(&self.calculator.snapshot())?;
            writeln!(out, "{snapshot}")?;
        } else {
            if !self.calculator.pending().is_empty() {
                writeln!(out, "  {}", self.calculator.pending())?;
            }
            writeln!(out, "{}", self.calculator.display())?;
        }
        Ok(())
    }
}

fn report(err: &CalcError) {
    match err {
        CalcError::DivisionByZero => eprintln!("error: {err}, calculator reset"),
        _ => eprintln!("error: {err}"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(capacity) = cli.history_capacity {
        if capacity == 0 {
            anyhow::bail!("--history-capacity must be at least 1");
        }
        config.history_capacity = capacity;
    }
    tracing::debug!(?config, "loaded config");

    let mut session = Session::new(
        config.calculator(),
        cli.json,
        cli.copy || config.copy_results,
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.keys.is_empty() {
        return session.run_line(&cli.keys.join(" "), &mut out);
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        session.run_line(&line, &mut out)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session.run_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let mut session = Session::new(Calculator::default(), false, false);
        // The display keeps the first operand until the second is typed.
        assert_eq!(run(&mut session, "7 +"), "  7 +\n7\n");
        assert_eq!(run(&mut session, "3 ="), "  7 + 3 = 10\n10\n");
    }

    #[test]
    fn test_json_output() {
        let mut session = Session::new(Calculator::default(), true, false);
        let out = run(&mut session, "25%");
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["display"], "0.25");
        assert_eq!(value["pending"], "");
        assert_eq!(value["history"][0]["expression"], "25%");
        assert_eq!(value["history"][0]["result"], "0.25");
    }

    #[test]
    fn test_division_by_zero_continues() {
        let mut session = Session::new(Calculator::default(), false, false);
        assert_eq!(run(&mut session, "8/0= 5"), "5\n");
        assert_eq!(session.calculator.state().first_value, None);
    }

    #[test]
    fn test_unknown_key_skips_line() {
        let mut session = Session::new(Calculator::default(), false, false);
        run(&mut session, "12");
        assert_eq!(run(&mut session, "3 ^ 2"), "");
        assert_eq!(session.calculator.display(), "12");
    }

    fn recording_session(copy_results: bool) -> (Session, Rc<RefCell<Vec<String>>>) {
        let copied = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&copied);
        let session = Session::new(Calculator::default(), false, copy_results)
            .with_copy_handler(move |text| {
                sink.borrow_mut().push(text.to_string());
                Ok(())
            });
        (session, copied)
    }

    #[test]
    fn test_copy_results_only_when_resolved() {
        let (mut session, copied) = recording_session(true);
        run(&mut session, "5 = c");
        run(&mut session, "7 + =");
        assert!(copied.borrow().is_empty());

        run(&mut session, "3 = =");
        assert_eq!(*copied.borrow(), ["10"]);
    }

    #[test]
    fn test_copy_results_skips_division_by_zero() {
        let (mut session, copied) = recording_session(true);
        run(&mut session, "8 / 0 =");
        assert!(copied.borrow().is_empty());
    }

    #[test]
    fn test_copy_key() {
        let (mut session, copied) = recording_session(false);
        run(&mut session, "6 x 7 = copy");
        assert_eq!(*copied.borrow(), ["42"]);
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::parse_from(["zcalc", "--json", "--history-capacity", "3", "7+3="]);
        assert!(cli.json);
        assert!(!cli.copy);
        assert_eq!(cli.history_capacity, Some(3));
        assert_eq!(cli.keys, ["7+3="]);
    }
}
