//! Synthcalc: a strict left-to-right accumulator calculator
//!
//! Synthcalc follows the "pure core, imperative shell" philosophy. The
//! calculator engine is a pure transition function over a small value-typed
//! state, while everything that touches the outside world (the offline
//! asset cache, configuration files) lives in the shell.
//!
//! # Core Concepts
//!
//! - **Tokens**: discrete button presses (digits, `.`, operators, `=`,
//!   `AC`, `+/-`, `⌫`)
//! - **Engine state**: display text, pending operator, accumulator,
//!   overwrite flag and a bounded history
//! - **Session**: the boundary a renderer talks to
//! - **Offline cache**: versioned asset cache run as Stillwater effects
//!
//! # Example
//!
//! ```rust
//! use synthcalc::core::{EngineState, Token};
//!
//! let tokens = ["4", "+", "2", "+", "1", "="]
//!     .iter()
//!     .map(|label| label.parse::<Token>().unwrap());
//!
//! let state = EngineState::new().apply_all(tokens);
//! assert_eq!(state.display(), "7");
//!
//! let state = state.apply(Token::Clear);
//! assert_eq!(state, EngineState::new());
//! ```

pub mod cache;
pub mod config;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::core::{EngineLimits, EngineState, Operator, Token};
pub use crate::session::{Session, View};
