//! The expression-entry state machine.
//!
//! [`Calculator`] owns the expression under construction, the value on
//! display and the history ledger. Every mutation goes through one of its
//! operations; callers observe the result through [`Calculator::state`].

use serde::Serialize;

use super::history::{HistoryEntry, HistoryLedger};
use super::key::{Key, Operator, UnaryFunction};
use crate::calculator::{evaluate, format_result, trailing_number};

/// Shown when an evaluation fails.
pub const ERROR_DISPLAY: &str = "Error";

/// Snapshot of what the user sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalculatorState {
    /// Expression being built, in display glyphs.
    pub expression: String,
    /// Preview of the number being typed, or the last result. Never empty.
    pub display: String,
    /// Set right after an evaluation or function press until the next edit.
    pub just_computed: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            expression: String::new(),
            display: "0".to_string(),
            just_computed: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Empty,
    Editing,
    JustComputed,
}

impl CalculatorState {
    pub fn mode(&self) -> Mode {
        if self.just_computed {
            Mode::JustComputed
        } else if self.expression.is_empty() {
            Mode::Empty
        } else {
            Mode::Editing
        }
    }

    /// Show the numeric run at the end of the expression, or `0`.
    fn refresh_preview(&mut self) {
        self.display = preview_of(&self.expression).to_string();
    }
}

fn preview_of(expression: &str) -> &str {
    match trailing_number(expression) {
        "" => "0",
        run => run,
    }
}

/// Interactive calculator session.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
    history: HistoryLedger,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Dispatch one key event.
    pub fn on_key(&mut self, key: Key) -> &CalculatorState {
        tracing::trace!(%key, "key");
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Operator(op) => self.input_operator(op),
            Key::Paren => self.input_paren(),
            Key::Decimal => self.input_decimal(),
            Key::Backspace => self.backspace(),
            Key::Clear => self.clear(),
            Key::Equals => self.compute(),
            Key::Function(func) => self.apply_unary_function(func),
        }
    }

    /// Enter a digit. After a computation the digit starts a new expression.
    pub fn input_digit(&mut self, digit: u8) -> &CalculatorState {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            tracing::debug!(digit, "ignoring out-of-range digit");
            return &self.state;
        };

        if self.state.just_computed {
            self.state.expression = c.to_string();
            self.state.display = c.to_string();
            self.state.just_computed = false;
        } else {
            self.state.expression.push(c);
            self.state.refresh_preview();
        }
        &self.state
    }

    /// Enter a decimal point. After a computation it starts a fresh `0.`.
    pub fn input_decimal(&mut self) -> &CalculatorState {
        if self.state.just_computed {
            self.state.expression = "0.".to_string();
            self.state.just_computed = false;
        } else {
            self.state.expression.push('.');
        }
        self.state.refresh_preview();
        &self.state
    }

    /// Enter a binary operator.
    ///
    /// After a computation the displayed result becomes the left operand.
    /// An operator on an empty expression is ignored, and one typed right
    /// after another operator replaces it.
    pub fn input_operator(&mut self, op: Operator) -> &CalculatorState {
        let state = &mut self.state;

        if state.just_computed {
            state.expression = format!("{}{}", state.display, op.glyph());
            state.just_computed = false;
            return &self.state;
        }

        if state.expression.is_empty() {
            return &self.state;
        }

        if state.expression.ends_with(Operator::is_glyph) {
            state.expression.pop();
        }
        state.expression.push(op.glyph());
        &self.state
    }

    /// Insert `(` while the expression is balanced, `)` otherwise.
    pub fn input_paren(&mut self) -> &CalculatorState {
        let state = &mut self.state;
        if state.just_computed {
            state.expression.clear();
            state.just_computed = false;
        }

        let open = state.expression.matches('(').count();
        let close = state.expression.matches(')').count();
        state.expression.push(if open > close { ')' } else { '(' });
        state.refresh_preview();
        &self.state
    }

    /// Delete the last character of the expression.
    ///
    /// When that leaves the expression ending in an operator, the display
    /// falls back to the number in front of it.
    pub fn backspace(&mut self) -> &CalculatorState {
        let state = &mut self.state;
        state.expression.pop();

        let run = trailing_number(&state.expression);
        state.display = if !run.is_empty() {
            run.to_string()
        } else {
            let mut chars = state.expression.chars();
            chars.next_back();
            preview_of(chars.as_str()).to_string()
        };
        state.just_computed = false;
        &self.state
    }

    /// Reset expression and display.
    pub fn clear(&mut self) -> &CalculatorState {
        self.state = CalculatorState::default();
        &self.state
    }

    /// Evaluate the expression.
    ///
    /// Success records a history entry and shows the formatted result.
    /// Failure shows `Error` and records nothing. Either way the expression
    /// is cleared.
    pub fn compute(&mut self) -> &CalculatorState {
        if self.state.expression.is_empty() {
            return &self.state;
        }

        let expression = std::mem::take(&mut self.state.expression);
        match evaluate(&expression) {
            Ok(value) => {
                let result = format_result(value);
                tracing::debug!(expression = %expression, result = %result, "computed");
                self.history.push(HistoryEntry::new(expression, result.clone()));
                self.state.display = result;
            }
            Err(err) => {
                tracing::warn!(
                    expression = %expression,
                    kind = err.kind(),
                    error = %err,
                    "evaluation failed"
                );
                self.state.display = ERROR_DISPLAY.to_string();
            }
        }
        self.state.just_computed = true;
        &self.state
    }

    /// Apply `func` to the displayed value.
    ///
    /// The result replaces both display and expression, so further operators
    /// chain from it. An unparseable display counts as `0`.
    pub fn apply_unary_function(&mut self, func: UnaryFunction) -> &CalculatorState {
        let operand = self.state.display.parse::<f64>().unwrap_or(0.0);
        let result = format_result(func.apply(operand));
        tracing::debug!(function = func.name(), operand, result = %result, "applied function");

        self.state.expression = result.clone();
        self.state.display = result;
        self.state.just_computed = true;
        &self.state
    }

    /// Empty the history ledger.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Restore the history entry at chronological `index` as if it had just
    /// been computed. Returns `None` when there is no such entry.
    pub fn select_history(&mut self, index: usize) -> Option<&CalculatorState> {
        let entry = self.history.get(index)?;
        self.state = CalculatorState {
            expression: entry.expression.clone(),
            display: entry.result.clone(),
            just_computed: true,
        };
        Some(&self.state)
    }
}
