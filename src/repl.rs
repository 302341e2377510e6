use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::error::{Error, ErrorWithSpan, Result};
use crate::reader::{self, Command};
use crate::tail::{self, TailIterator};
use crate::value::{Number, Value};

const HISTORY_FILE: &str = ".ifless-history";

/// Executes a command against the core primitives.
pub fn eval(command: Command) -> Result<Value> {
    match command {
        Command::Sum { index, accumulator, limit } => {
            tail::run(index, accumulator, limit).map(Value::Number)
        }
        Command::Steps { index, limit } => {
            let steps = TailIterator::new(limit)?.remaining(index);
            let steps = i64::try_from(steps).map_err(|_| {
                Error::OverflowError(format!("{} steps do not fit in a 64-bit integer", steps))
            })?;
            Ok(Value::Number(Number::Int(steps)))
        }
        Command::Truthy(value) => Ok(Value::Bool(value.truth().is_true())),
        Command::Branch { condition, then, otherwise } => {
            Ok(condition.truth().branch(move || then, move || otherwise))
        }
    }
}

pub struct REPL {
    history: Option<String>,
}

impl REPL {
    pub fn new() -> Self {
        REPL { history: Some(HISTORY_FILE.to_string()) }
    }

    /// A REPL that neither loads nor saves history.
    pub fn without_history() -> Self {
        REPL { history: None }
    }

    /// Reads, evaluates and prints one line.
    pub fn rep(&self, input: &str) -> std::result::Result<String, ErrorWithSpan> {
        let command = reader::read(input)?;
        debug!(?command, "evaluating");

        // Evaluation errors have no finer location than the whole line
        eval(command)
            .map(|value| value.to_string())
            .map_err(|error| ErrorWithSpan::new(error, 0..input.trim_end().len(), input))
    }

    pub fn run(&self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        if let Some(path) = &self.history {
            if rl.load_history(path).is_err() {
                debug!(path, "no previous history");
            }
        }

        'repl_loop: loop {
            let readline = rl.readline("> ");
            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue 'repl_loop;
                    }

                    if let Err(err) = rl.add_history_entry(line.as_str()) {
                        eprintln!("Error adding to history: {:?}", err);
                    }

                    match self.rep(&line) {
                        Ok(out) => println!("{}", out),
                        Err(e) => println!("{}", e.format_error().red()),
                    }
                }
                Err(ReadlineError::Interrupted) => continue 'repl_loop,
                Err(ReadlineError::Eof) => break 'repl_loop,
                Err(err) => {
                    println!("Error: {:?}", err);
                    break 'repl_loop;
                }
            }
        }

        if let Some(path) = &self.history {
            if let Err(err) = rl.save_history(path) {
                eprintln!("Error saving history: {:?}", err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_sum() {
        let repl = REPL::without_history();
        assert_eq!(repl.rep("sum 5").unwrap(), "10");
        assert_eq!(repl.rep("sum 0 0 10000").unwrap(), "49995000");
        assert_eq!(repl.rep("sum 0 0.5 4").unwrap(), "6.5");
    }

    #[test]
    fn test_rep_steps() {
        let repl = REPL::without_history();
        assert_eq!(repl.rep("steps 3 10").unwrap(), "7");
        assert_eq!(repl.rep("steps 12 10").unwrap(), "0");
    }

    #[test]
    fn test_rep_truthy_and_branch() {
        let repl = REPL::without_history();
        assert_eq!(repl.rep("truthy nil").unwrap(), "false");
        assert_eq!(repl.rep("truthy 0").unwrap(), "true");
        assert_eq!(repl.rep(r#"branch false "T" "F""#).unwrap(), "F");
        assert_eq!(repl.rep(r#"branch "" "T" "F""#).unwrap(), "T");
    }

    #[test]
    fn test_rep_eval_error_spans_line() {
        let repl = REPL::without_history();
        let err = repl.rep("sum -1").unwrap_err();
        assert_eq!(err.span, 0..6);
        assert!(matches!(err.error, Error::ValueError(_)));
    }

    #[test]
    fn test_eval_steps_overflow() {
        let result = eval(Command::Steps { index: i64::MIN, limit: i64::MAX });
        assert!(matches!(result, Err(Error::OverflowError(_))));
    }
}
