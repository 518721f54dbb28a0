//! Render model handed to the presentation layer.

use crate::core::{format_number, EngineState, Token, ERROR_DISPLAY};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw the calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Main display line; `"Error"` for non-finite values.
    pub display: String,
    /// Pending operation, e.g. `"12 +"`, or empty.
    pub annotation: String,
    /// Completed calculations, newest first.
    pub history: Vec<String>,
}

impl View {
    pub fn of(state: &EngineState) -> Self {
        Self {
            display: render_display(state),
            annotation: annotation(state),
            history: state.history().lines(),
        }
    }
}

fn render_display(state: &EngineState) -> String {
    if state.is_error() {
        ERROR_DISPLAY.to_string()
    } else {
        state.display().to_string()
    }
}

fn annotation(state: &EngineState) -> String {
    match (state.accumulator(), state.operator()) {
        (Some(acc), Some(op)) => format!(
            "{} {}",
            format_number(acc, state.limits().significant_digits),
            op.symbol()
        ),
        _ => String::new(),
    }
}

/// Button rows as laid out on the keypad, top to bottom.
pub fn keypad() -> Vec<Vec<Token>> {
    use crate::core::Operator::{Add, Div, Mul, Sub};
    use Token::{Decimal, Digit, Equals, Operator};
    vec![
        vec![Token::Clear, Token::ToggleSign, Token::Backspace],
        vec![Digit(7), Digit(8), Digit(9), Operator(Div)],
        vec![Digit(4), Digit(5), Digit(6), Operator(Mul)],
        vec![Digit(1), Digit(2), Digit(3), Operator(Sub)],
        vec![Digit(0), Decimal, Equals, Operator(Add)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_after(labels: &str) -> EngineState {
        EngineState::new()
            .apply_all(labels.split_whitespace().map(|l| l.parse::<Token>().unwrap()))
    }

    #[test]
    fn initial_view() {
        let view = View::of(&EngineState::new());
        assert_eq!(view.display, "0");
        assert_eq!(view.annotation, "");
        assert!(view.history.is_empty());
    }

    #[test]
    fn annotation_shows_pending_operation() {
        let view = View::of(&state_after("1 2 +"));
        assert_eq!(view.annotation, "12 +");

        let view = View::of(&state_after("1 2 + 3 *"));
        assert_eq!(view.annotation, "15 *");
        assert_eq!(view.display, "15");
    }

    #[test]
    fn annotation_clears_after_equals() {
        let view = View::of(&state_after("1 + 2 ="));
        assert_eq!(view.annotation, "");
        assert_eq!(view.history, vec!["1 + 2 = 3"]);
    }

    #[test]
    fn error_renders_in_display_and_annotation() {
        let view = View::of(&state_after("5 / 0 +"));
        assert_eq!(view.display, "Error");
        assert_eq!(view.annotation, "Error +");
    }

    #[test]
    fn keypad_covers_every_token_kind() {
        let keys: Vec<Token> = keypad().into_iter().flatten().collect();
        assert_eq!(keys.len(), 19);
        for d in 0..=9 {
            assert!(keys.contains(&Token::Digit(d)));
        }
        assert!(keys.contains(&Token::Equals));
        assert!(keys.contains(&Token::Backspace));
    }

    #[test]
    fn view_serializes_for_renderer() {
        let json = serde_json::to_value(View::of(&state_after("4 *"))).unwrap();
        assert_eq!(json["display"], "4");
        assert_eq!(json["annotation"], "4 *");
    }
}
