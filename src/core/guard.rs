//! Guard predicates controlling which tokens take effect.
//!
//! Guards are pure boolean functions over [`EngineState`]. A token whose
//! guard fails is a silent no-op; the guard's name is traced so rejected
//! input can still be diagnosed.

use super::format::ERROR_DISPLAY;
use super::state::EngineState;
use std::fmt;

/// Named pure predicate that decides whether an edit may proceed.
///
/// # Example
///
/// ```rust
/// use synthcalc::core::{guard, EngineState, Token};
///
/// let state = EngineState::new().apply(Token::Digit(1)).apply(Token::Decimal);
///
/// assert!(!guard::DECIMAL_ABSENT.check(&state));
/// assert!(guard::DIGIT_CAPACITY.check(&state));
/// ```
#[derive(Clone, Copy)]
pub struct Guard {
    name: &'static str,
    predicate: fn(&EngineState) -> bool,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    pub const fn new(name: &'static str, predicate: fn(&EngineState) -> bool) -> Self {
        Self { name, predicate }
    }

    /// Check if the guard allows the edit on this state.
    pub fn check(&self, state: &EngineState) -> bool {
        (self.predicate)(state)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}

/// Room for one more character of entry.
pub const DIGIT_CAPACITY: Guard = Guard::new("digit_capacity", has_capacity);

/// No decimal point entered yet.
pub const DECIMAL_ABSENT: Guard = Guard::new("decimal_absent", decimal_absent);

/// A sign can be toggled (not zero, not an error).
pub const SIGNED_VALUE: Guard = Guard::new("signed_value", can_toggle_sign);

/// Something has been typed since the last operator, equals or clear.
pub const OPERAND_ENTERED: Guard = Guard::new("operand_entered", operand_entered);

/// Both an operator and a left-hand operand are pending.
pub const PENDING_OPERATION: Guard = Guard::new("pending_operation", pending_operation);

fn has_capacity(state: &EngineState) -> bool {
    state.entry_len() < state.limits.max_digits
}

fn decimal_absent(state: &EngineState) -> bool {
    !state.display.contains('.')
}

fn can_toggle_sign(state: &EngineState) -> bool {
    state.display != "0" && state.display != ERROR_DISPLAY
}

fn operand_entered(state: &EngineState) -> bool {
    !state.overwrite
}

fn pending_operation(state: &EngineState) -> bool {
    state.operator.is_some() && state.accumulator.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::Operator;

    fn with_display(display: &str) -> EngineState {
        let mut state = EngineState::new();
        state.display = display.to_string();
        state.overwrite = false;
        state
    }

    #[test]
    fn capacity_counts_entry_without_sign() {
        assert!(DIGIT_CAPACITY.check(&with_display("12345678901")));
        assert!(!DIGIT_CAPACITY.check(&with_display("123456789012")));
        assert!(!DIGIT_CAPACITY.check(&with_display("-123456789012")));
        assert!(DIGIT_CAPACITY.check(&with_display("-12345678901")));
    }

    #[test]
    fn decimal_guard_rejects_second_point() {
        assert!(DECIMAL_ABSENT.check(&with_display("12")));
        assert!(!DECIMAL_ABSENT.check(&with_display("1.2")));
    }

    #[test]
    fn sign_guard_rejects_zero_and_error() {
        assert!(!SIGNED_VALUE.check(&with_display("0")));
        assert!(!SIGNED_VALUE.check(&with_display(ERROR_DISPLAY)));
        assert!(SIGNED_VALUE.check(&with_display("0.")));
        assert!(SIGNED_VALUE.check(&with_display("-7")));
    }

    #[test]
    fn operand_guard_tracks_overwrite() {
        let state = EngineState::new();
        assert!(!OPERAND_ENTERED.check(&state));
        assert!(OPERAND_ENTERED.check(&with_display("3")));
    }

    #[test]
    fn pending_guard_needs_operator_and_accumulator() {
        let mut state = EngineState::new();
        assert!(!PENDING_OPERATION.check(&state));

        state.operator = Some(Operator::Add);
        assert!(!PENDING_OPERATION.check(&state));

        state.accumulator = Some(2.0);
        assert!(PENDING_OPERATION.check(&state));
    }

    #[test]
    fn guard_is_deterministic() {
        let state = with_display("4.5");
        assert_eq!(DECIMAL_ABSENT.check(&state), DECIMAL_ABSENT.check(&state));
    }

    #[test]
    fn custom_guard_reports_name() {
        let guard = Guard::new("negative", |s| s.display.starts_with('-'));
        assert_eq!(guard.name(), "negative");
        assert!(guard.check(&with_display("-1")));
        assert!(!guard.check(&with_display("1")));
    }
}
