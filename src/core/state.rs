//! Calculator engine state.
//!
//! `EngineState` is the sole mutable entity of a calculator session. It is
//! plain data: every field is a value type and the whole state can be
//! cloned, compared and serialized.

use super::format::{parse_number, DEFAULT_SIGNIFICANT_DIGITS, ERROR_DISPLAY};
use super::history::{CalcHistory, DEFAULT_HISTORY_LIMIT};
use super::token::Operator;
use serde::{Deserialize, Serialize};

/// Maximum characters of user-entered text by default.
pub const DEFAULT_MAX_DIGITS: usize = 12;

/// Numeric limits of the engine.
///
/// Limits are configuration, not session data: they survive a Clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLimits {
    /// Longest entry, excluding a leading minus sign.
    pub max_digits: usize,
    /// History records kept.
    pub history_limit: usize,
    /// Significant digits kept in computed results.
    pub significant_digits: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

/// Calculator session state.
///
/// # Example
///
/// ```rust
/// use synthcalc::core::{EngineState, Token};
///
/// let state = EngineState::new()
///     .apply(Token::Digit(5))
///     .apply("+".parse().unwrap())
///     .apply(Token::Digit(3))
///     .apply(Token::Equals);
///
/// assert_eq!(state.display(), "8");
/// assert_eq!(state.history().lines(), vec!["5 + 3 = 8".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub(crate) display: String,
    pub(crate) operator: Option<Operator>,
    #[serde(with = "accumulator_text")]
    pub(crate) accumulator: Option<f64>,
    pub(crate) overwrite: bool,
    pub(crate) history: CalcHistory,
    pub(crate) limits: EngineLimits,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    /// Initial state with default limits.
    pub fn new() -> Self {
        Self::with_limits(EngineLimits::default())
    }

    /// Initial state with custom limits.
    pub fn with_limits(limits: EngineLimits) -> Self {
        Self {
            display: "0".to_string(),
            operator: None,
            accumulator: None,
            overwrite: true,
            history: CalcHistory::with_limit(limits.history_limit),
            limits,
        }
    }

    /// Raw display text. May be the error sentinel.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn history(&self) -> &CalcHistory {
        &self.history
    }

    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    /// Numeric value of the display (NaN for the error sentinel).
    pub fn value(&self) -> f64 {
        parse_number(&self.display)
    }

    /// Whether the display currently shows a non-finite result.
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY || !self.value().is_finite()
    }

    /// Display text without a leading minus sign.
    pub(crate) fn entry(&self) -> &str {
        self.display.strip_prefix('-').unwrap_or(&self.display)
    }

    /// Characters of user-entered text, excluding a leading minus sign.
    pub fn entry_len(&self) -> usize {
        self.entry().chars().count()
    }
}

/// Stores the accumulator as text so infinities and NaN survive formats
/// without a representation for them.
mod accumulator_text {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(|v| v.to_string()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| text.parse::<f64>().map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Token;

    #[test]
    fn initial_state_has_defaults() {
        let state = EngineState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.operator(), None);
        assert_eq!(state.accumulator(), None);
        assert!(state.overwrite());
        assert!(state.history().is_empty());
        assert_eq!(state.limits(), &EngineLimits::default());
    }

    #[test]
    fn custom_limits_size_the_history() {
        let limits = EngineLimits {
            history_limit: 2,
            ..EngineLimits::default()
        };
        let state = EngineState::with_limits(limits);
        assert_eq!(state.history().limit(), 2);
    }

    #[test]
    fn entry_len_ignores_minus_sign() {
        let mut state = EngineState::new();
        state.display = "-123.4".to_string();
        assert_eq!(state.entry_len(), 5);
        assert_eq!(state.value(), -123.4);
    }

    #[test]
    fn error_sentinel_is_detected() {
        let mut state = EngineState::new();
        assert!(!state.is_error());
        state.display = ERROR_DISPLAY.to_string();
        assert!(state.is_error());
        assert!(state.value().is_nan());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = EngineState::new();
        let json = serde_json::to_string(&state).unwrap();
        let restored: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn infinite_accumulator_survives_serialization() {
        let state = EngineState::new().apply_all([
            Token::Digit(5),
            Token::Operator(Operator::Div),
            Token::Digit(0),
            Token::Operator(Operator::Add),
        ]);
        assert_eq!(state.accumulator(), Some(f64::INFINITY));

        let json = serde_json::to_string(&state).unwrap();
        let restored: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);

        let next = restored.apply_all([Token::Digit(3), Token::Equals]);
        assert_eq!(next.display(), ERROR_DISPLAY);
    }

    #[test]
    fn nan_accumulator_survives_binary_encoding() {
        let mut state = EngineState::new();
        state.accumulator = Some(f64::NAN);
        state.operator = Some(Operator::Mul);

        let bytes = bincode::serialize(&state).unwrap();
        let restored: EngineState = bincode::deserialize(&bytes).unwrap();
        assert!(restored.accumulator().is_some_and(f64::is_nan));
        assert_eq!(restored.operator(), Some(Operator::Mul));
    }

    #[test]
    fn malformed_accumulator_is_rejected() {
        let mut json = serde_json::to_value(EngineState::new()).unwrap();
        json["accumulator"] = serde_json::json!("twelve");
        assert!(serde_json::from_value::<EngineState>(json).is_err());
    }

    #[test]
    fn limits_deserialize_with_defaults() {
        let limits: EngineLimits = serde_json::from_str(r#"{"max_digits": 8}"#).unwrap();
        assert_eq!(limits.max_digits, 8);
        assert_eq!(limits.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(limits.significant_digits, DEFAULT_SIGNIFICANT_DIGITS);
    }
}
