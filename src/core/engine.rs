//! The transition function.
//!
//! `EngineState::apply` is total and deterministic: every token yields a
//! valid state, rejected input yields an unchanged one.

use super::format::{format_number, parse_number};
use super::guard::{self, Guard};
use super::history::HistoryRecord;
use super::state::EngineState;
use super::token::{Operator, Token};
use tracing::{debug, trace};

impl EngineState {
    /// Apply one token, returning the next state.
    pub fn apply(&self, token: Token) -> EngineState {
        let mut next = self.clone();
        match token {
            Token::Digit(d) => next.push_digit(d),
            Token::Decimal => next.push_decimal(),
            Token::Operator(op) => next.press_operator(op),
            Token::Equals => next.press_equals(),
            Token::Clear => next = EngineState::with_limits(self.limits),
            Token::ToggleSign => next.toggle_sign(),
            Token::Backspace => next.backspace(),
        }
        next
    }

    /// Apply tokens left to right.
    pub fn apply_all<I>(&self, tokens: I) -> EngineState
    where
        I: IntoIterator<Item = Token>,
    {
        tokens
            .into_iter()
            .fold(self.clone(), |state, token| state.apply(token))
    }

    fn allowed(&self, guard: Guard, token: &str) -> bool {
        let allowed = guard.check(self);
        if !allowed {
            trace!(guard = guard.name(), token, display = %self.display, "token rejected");
        }
        allowed
    }

    fn push_digit(&mut self, digit: u8) {
        let Some(digit) = char::from_digit(u32::from(digit), 10) else {
            trace!(digit, display = %self.display, "token rejected: not a decimal digit");
            return;
        };
        if self.overwrite {
            self.display = digit.to_string();
            self.overwrite = false;
            return;
        }
        if !self.allowed(guard::DIGIT_CAPACITY, "digit") {
            return;
        }
        match self.display.as_str() {
            "0" => self.display = digit.to_string(),
            "-0" => self.display = format!("-{digit}"),
            _ => self.display.push(digit),
        }
    }

    fn push_decimal(&mut self) {
        if self.overwrite {
            self.display = "0.".to_string();
            self.overwrite = false;
            return;
        }
        if self.allowed(guard::DECIMAL_ABSENT, ".") && self.allowed(guard::DIGIT_CAPACITY, ".") {
            self.display.push('.');
        }
    }

    fn toggle_sign(&mut self) {
        if !self.allowed(guard::SIGNED_VALUE, "+/-") {
            return;
        }
        self.display = match self.display.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.display),
        };
    }

    fn backspace(&mut self) {
        if !self.allowed(guard::OPERAND_ENTERED, "⌫") {
            return;
        }
        if self.entry_len() <= 1 {
            self.display = "0".to_string();
        } else {
            self.display.pop();
        }
    }

    fn press_operator(&mut self, op: Operator) {
        let current = parse_number(&self.display);
        let chained = guard::PENDING_OPERATION.check(self) && guard::OPERAND_ENTERED.check(self);
        match (chained, self.operator, self.accumulator) {
            (true, Some(pending), Some(acc)) => {
                let result = pending.combine(acc, current);
                self.display = self.format(result);
                self.accumulator = Some(result);
                debug!(lhs = acc, op = %pending, rhs = current, result, "chained operation");
            }
            _ => self.accumulator = Some(current),
        }
        self.operator = Some(op);
        self.overwrite = true;
    }

    fn press_equals(&mut self) {
        let (Some(op), Some(acc)) = (self.operator, self.accumulator) else {
            trace!(guard = guard::PENDING_OPERATION.name(), token = "=", "token rejected");
            return;
        };
        let current = parse_number(&self.display);
        let result = op.combine(acc, current);
        self.display = self.format(result);

        let record = HistoryRecord::new(
            acc,
            op,
            current,
            self.display.clone(),
            self.limits.significant_digits,
        );
        debug!(record = %record, "calculation complete");
        self.history = self.history.record(record);

        self.accumulator = None;
        self.operator = None;
        self.overwrite = true;
    }

    fn format(&self, value: f64) -> String {
        format_number(value, self.limits.significant_digits)
    }
}
