//! Bounded calculation history.
//!
//! Completed `operand operator operand = result` records, newest first.
//! Recording is pure: it returns a new history and leaves the original
//! untouched.

use super::format::format_number;
use super::token::Operator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Number of records kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// One completed calculation.
///
/// Operands and result are stored already formatted, exactly as they were
/// shown to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub lhs: String,
    pub operator: Operator,
    pub rhs: String,
    pub result: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Build a record from raw operands, formatting them with the display rule.
    pub fn new(
        lhs: f64,
        operator: Operator,
        rhs: f64,
        result: impl Into<String>,
        significant_digits: usize,
    ) -> Self {
        Self {
            lhs: format_number(lhs, significant_digits),
            operator,
            rhs: format_number(rhs, significant_digits),
            result: result.into(),
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.lhs,
            self.operator.symbol(),
            self.rhs,
            self.result
        )
    }
}

/// Newest-first log of completed calculations with a fixed capacity.
///
/// # Example
///
/// ```rust
/// use synthcalc::core::{CalcHistory, HistoryRecord, Operator};
///
/// let history = CalcHistory::new();
/// let history = history.record(HistoryRecord::new(5.0, Operator::Add, 3.0, "8", 10));
///
/// assert_eq!(history.lines(), vec!["5 + 3 = 8".to_string()]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalcHistory {
    records: VecDeque<HistoryRecord>,
    limit: usize,
}

impl Default for CalcHistory {
    fn default() -> Self {
        Self::new()
    }
}

// Equality ignores timestamps: two histories are the same log if they show
// the same lines under the same limit.
impl PartialEq for CalcHistory {
    fn eq(&self, other: &Self) -> bool {
        self.limit == other.limit
            && self.records.len() == other.records.len()
            && self
                .records
                .iter()
                .zip(&other.records)
                .all(|(a, b)| a.to_string() == b.to_string())
    }
}

impl CalcHistory {
    /// Create an empty history holding up to five records.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history with a custom capacity (at least one).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            records: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Record a calculation, returning a new history.
    ///
    /// The record goes to the front; the oldest record is evicted once the
    /// limit is exceeded.
    pub fn record(&self, record: HistoryRecord) -> Self {
        let mut records = self.records.clone();
        records.push_front(record);
        records.truncate(self.limit);
        Self {
            records,
            limit: self.limit,
        }
    }

    /// Same limit, no records.
    pub fn cleared(&self) -> Self {
        Self::with_limit(self.limit)
    }

    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// Rendered records, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lhs: f64, rhs: f64) -> HistoryRecord {
        let result = format_number(lhs + rhs, 10);
        HistoryRecord::new(lhs, Operator::Add, rhs, result, 10)
    }

    #[test]
    fn new_history_is_empty() {
        let history = CalcHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
        assert!(history.latest().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = CalcHistory::new();
        let next = history.record(record(1.0, 2.0));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn newest_record_comes_first() {
        let history = CalcHistory::new()
            .record(record(1.0, 1.0))
            .record(record(2.0, 2.0));

        assert_eq!(history.lines(), vec!["2 + 2 = 4", "1 + 1 = 2"]);
        assert_eq!(history.latest().unwrap().result, "4");
    }

    #[test]
    fn oldest_record_is_evicted_past_limit() {
        let mut history = CalcHistory::new();
        for i in 0..6 {
            history = history.record(record(i as f64, 0.0));
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.lines().first().unwrap(), "5 + 0 = 5");
        assert_eq!(history.lines().last().unwrap(), "1 + 0 = 1");
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let history = CalcHistory::with_limit(0)
            .record(record(1.0, 1.0))
            .record(record(2.0, 2.0));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn operands_use_display_formatting() {
        let rec = HistoryRecord::new(0.1 + 0.2, Operator::Mul, 10.0, "3", 10);
        assert_eq!(rec.to_string(), "0.3 * 10 = 3");
    }

    #[test]
    fn cleared_keeps_limit() {
        let history = CalcHistory::with_limit(3).record(record(1.0, 1.0));
        let cleared = history.cleared();
        assert!(cleared.is_empty());
        assert_eq!(cleared.limit(), 3);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = CalcHistory::new().record(record(5.0, 3.0));
        let json = serde_json::to_string(&history).unwrap();
        let restored: CalcHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history, restored);
    }
}
