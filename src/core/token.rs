//! Button tokens accepted by the calculator engine.
//!
//! Tokens are the only input the engine understands. The presentation layer
//! forwards raw key labels (`"7"`, `"+"`, `"AC"`, ...) which are parsed here
//! into strongly typed values before they reach the pure core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pending binary operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Every operator, in keypad order.
    pub const ALL: [Operator; 4] = [Self::Div, Self::Mul, Self::Sub, Self::Add];

    /// Symbol used on the keypad, in annotations and in history records.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Combine two operands.
    ///
    /// Division by zero yields `+∞` instead of failing; any non-finite
    /// result is rendered as an error at display time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use synthcalc::core::Operator;
    ///
    /// assert_eq!(Operator::Sub.combine(4.0, 6.0), -2.0);
    /// assert!(Operator::Div.combine(5.0, 0.0).is_infinite());
    /// ```
    pub fn combine(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    f64::INFINITY
                } else {
                    lhs / rhs
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single discrete button press.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Token {
    /// A decimal digit, always in `0..=9`.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Backspace,
}

/// Errors raised while turning a key label into a [`Token`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unrecognized key label '{0}'")]
    Unrecognized(String),

    #[error("Digit {0} is out of range 0-9")]
    DigitOutOfRange(u8),
}

impl Token {
    /// Key label for the clear button.
    pub const CLEAR_LABEL: &'static str = "AC";
    /// Key label for the sign toggle button.
    pub const TOGGLE_SIGN_LABEL: &'static str = "+/-";
    /// Key label for the backspace button.
    pub const BACKSPACE_LABEL: &'static str = "⌫";

    /// Build a digit token, rejecting values above 9.
    pub fn digit(value: u8) -> Result<Self, TokenError> {
        if value <= 9 {
            Ok(Self::Digit(value))
        } else {
            Err(TokenError::DigitOutOfRange(value))
        }
    }

    /// The label printed on the corresponding button.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => Self::CLEAR_LABEL.to_string(),
            Self::ToggleSign => Self::TOGGLE_SIGN_LABEL.to_string(),
            Self::Backspace => Self::BACKSPACE_LABEL.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let token = match label {
            "." => Self::Decimal,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Sub),
            "*" => Self::Operator(Operator::Mul),
            "/" => Self::Operator(Operator::Div),
            "=" => Self::Equals,
            Self::CLEAR_LABEL => Self::Clear,
            Self::TOGGLE_SIGN_LABEL => Self::ToggleSign,
            Self::BACKSPACE_LABEL => Self::Backspace,
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c as u8 - b'0'),
                    _ => return Err(TokenError::Unrecognized(label.to_string())),
                }
            }
        };
        Ok(token)
    }
}
