//! Line-oriented prompt primitives.
//!
//! Every prompt goes through [`Prompter::ask`], which is the only place that
//! recognises the escape sentinel. Entering it at any prompt yields
//! [`ExplorerError::Cancelled`], which callers propagate with `?` up to the
//! binary.

use std::io::{BufRead, Write};

use bikeshare_core::error::{ExplorerError, Result};
use bikeshare_core::models::Selector;
use bikeshare_ui::messages::INVALID_INPUT;

/// Input that terminates the program from any prompt.
pub const ESCAPE_SENTINEL: &str = "end";

const YES_NO: [&str; 2] = ["y", "n"];

/// Parse one answer against `valid`.
///
/// The input is trimmed and lower-cased. A comma switches to multi-value
/// parsing: each comma-separated token is trimmed and lower-cased, and every
/// token must be valid. Returns `None` when any token is invalid.
pub fn parse_selection(input: &str, valid: &[&str]) -> Option<Selector<String>> {
    let normalised = input.trim().to_lowercase();
    if normalised.contains(',') {
        let tokens: Vec<String> = normalised
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .collect();
        if tokens.iter().all(|token| valid.contains(&token.as_str())) {
            return Some(Selector::many(tokens));
        }
        None
    } else if valid.contains(&normalised.as_str()) {
        Some(Selector::OneOf(normalised))
    } else {
        None
    }
}

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for everything that is not a question.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `question` and read one line.
    ///
    /// Fails with [`ExplorerError::Cancelled`] on the escape sentinel and with
    /// [`ExplorerError::InputClosed`] at end of input.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("input closed while waiting for an answer");
            return Err(ExplorerError::InputClosed);
        }
        if line.trim().eq_ignore_ascii_case(ESCAPE_SENTINEL) {
            tracing::debug!("escape sentinel entered");
            return Err(ExplorerError::Cancelled);
        }
        Ok(line)
    }

    /// Ask until the answer is one or more members of `valid`.
    pub fn select(&mut self, question: &str, valid: &[&str]) -> Result<Selector<String>> {
        loop {
            let answer = self.ask(question)?;
            if let Some(selection) = parse_selection(&answer, valid) {
                return Ok(selection);
            }
            self.say(INVALID_INPUT)?;
        }
    }

    /// Ask a single-choice question.
    ///
    /// Answers are validated like every other prompt, so `y,n` is accepted.
    /// A multi-value answer names no single choice and yields `None`.
    pub fn choose(&mut self, question: &str, valid: &[&str]) -> Result<Option<String>> {
        Ok(match self.select(question, valid)? {
            Selector::OneOf(choice) => Some(choice),
            Selector::ManyOf(_) => None,
        })
    }

    /// Ask a `[y] Yes [n] No` question; `None` for a multi-value answer.
    pub fn yes_no(&mut self, question: &str) -> Result<Option<bool>> {
        Ok(self.choose(question, &YES_NO)?.map(|answer| answer == "y"))
    }

    /// `true` only for a plain `y`.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.yes_no(question)? == Some(true))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
