//! Calculator session: the boundary between a renderer and the engine.
//!
//! A session owns the single [`EngineState`] of one calculator screen. The
//! renderer forwards key labels and reads back a [`View`]; one key is fully
//! applied before the next is accepted.

mod view;

pub use view::{keypad, View};

use crate::core::{EngineLimits, EngineState, Token, TokenError};
use chrono::{DateTime, Utc};
use tracing::{debug, info_span, Span};
use uuid::Uuid;

/// One calculator screen from start to end.
///
/// # Example
///
/// ```rust
/// use synthcalc::session::Session;
///
/// let mut session = Session::new();
/// for key in ["4", "+", "2", "+", "1", "="] {
///     session.press(key).unwrap();
/// }
///
/// let view = session.view();
/// assert_eq!(view.display, "7");
/// assert_eq!(view.history, vec!["6 + 1 = 7".to_string()]);
/// ```
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: EngineState,
    keystrokes: usize,
    span: Span,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a session with default limits.
    pub fn new() -> Self {
        Self::with_limits(EngineLimits::default())
    }

    /// Start a session with custom limits.
    pub fn with_limits(limits: EngineLimits) -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("session", id = %id);
        span.in_scope(|| debug!(?limits, "session started"));
        Self {
            id,
            started_at: Utc::now(),
            state: EngineState::with_limits(limits),
            keystrokes: 0,
            span,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Tokens applied so far, rejected ones included.
    pub fn keystrokes(&self) -> usize {
        self.keystrokes
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Parse a key label and apply it.
    pub fn press(&mut self, label: &str) -> Result<&EngineState, TokenError> {
        let token = label.parse::<Token>()?;
        Ok(self.apply(token))
    }

    /// Apply one token.
    pub fn apply(&mut self, token: Token) -> &EngineState {
        let _entered = self.span.enter();
        self.state = self.state.apply(token);
        self.keystrokes += 1;
        debug!(
            token = %token,
            display = self.state.display(),
            overwrite = self.state.overwrite(),
            "token applied"
        );
        &self.state
    }

    /// Current render model.
    pub fn view(&self) -> View {
        View::of(&self.state)
    }
}
