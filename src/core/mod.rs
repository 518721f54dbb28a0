//! Calculator engine core.
//!
//! This module contains the pure functional core of the calculator:
//! - Button tokens and operators
//! - The engine state and its transition function
//! - Guard predicates deciding which edits take effect
//! - Number formatting and the bounded history log
//!
//! Nothing in this module performs I/O. The only side effect of a
//! transition is tracing output.

mod engine;
mod format;
pub mod guard;
mod history;
mod state;
mod token;

pub use format::{
    format_number, parse_number, round_significant, DEFAULT_SIGNIFICANT_DIGITS, ERROR_DISPLAY,
};
pub use guard::Guard;
pub use history::{CalcHistory, HistoryRecord, DEFAULT_HISTORY_LIMIT};
pub use state::{EngineLimits, EngineState, DEFAULT_MAX_DIGITS};
pub use token::{Operator, Token, TokenError};
