// The match-result algebra shared by every operator evaluation

use crate::rules::value::Value;

/// The outcome of applying one operator or rule at one input offset:
/// either "no match at `offset`" or "match of `length` bytes starting at
/// `offset`, producing `value`".
///
/// There are exactly two constructors, [`MatchResult::matched`] and
/// [`MatchResult::no_match`]; `new_offset` is always derived from
/// `offset + length` rather than stored, so the two can never drift
/// apart. Every operator shares this one result shape, which is what
/// lets them compose without special-casing each other.
///
/// The consumed length and value of a no-match are deliberately
/// inaccessible. Reading them is a bug in the caller, not a recoverable
/// condition, and the accessors panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<T> {
    offset: usize,
    outcome: Option<Matched<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Matched<T> {
    length: usize,
    value: Value<T>,
}

impl<T> MatchResult<T> {
    /// A successful match of `length` bytes starting at `offset`.
    ///
    /// Zero-width matches (predicates, empty repeats) pass `length` 0.
    pub fn matched(length: usize, value: Value<T>, offset: usize) -> Self {
        MatchResult {
            offset,
            outcome: Some(Matched { length, value }),
        }
    }

    /// A definitive no-match at `offset`.
    pub fn no_match(offset: usize) -> Self {
        MatchResult {
            offset,
            outcome: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.outcome.is_some()
    }

    /// Start offset of the attempt; set for matches and no-matches alike.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Consumed byte count.
    ///
    /// # Panics
    ///
    /// Panics on a no-match result.
    pub fn length(&self) -> usize {
        self.expect_matched("the length of a no-match is not observable")
            .length
    }

    /// The first offset past the match, always `offset + length`.
    ///
    /// # Panics
    ///
    /// Panics on a no-match result.
    pub fn new_offset(&self) -> usize {
        self.offset + self.length()
    }

    /// Borrows the matched value.
    ///
    /// # Panics
    ///
    /// Panics on a no-match result.
    pub fn value(&self) -> &Value<T> {
        &self
            .expect_matched("the value of a no-match is not observable")
            .value
    }

    /// Consumes the result, returning the matched value.
    ///
    /// # Panics
    ///
    /// Panics on a no-match result.
    pub fn into_value(self) -> Value<T> {
        match self.outcome {
            Some(matched) => matched.value,
            None => panic!("the value of a no-match is not observable"),
        }
    }

    fn expect_matched(&self, message: &str) -> &Matched<T> {
        match &self.outcome {
            Some(matched) => matched,
            None => panic!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_offset_is_derived_from_length() {
        let result: MatchResult<()> = MatchResult::matched(3, Value::text("foo"), 2);
        assert!(result.is_match());
        assert_eq!(result.offset(), 2);
        assert_eq!(result.length(), 3);
        assert_eq!(result.new_offset(), 5);
        assert_eq!(result.value(), &Value::text("foo"));
    }

    #[test]
    fn test_no_match_keeps_its_offset() {
        let result: MatchResult<()> = MatchResult::no_match(7);
        assert!(!result.is_match());
        assert_eq!(result.offset(), 7);
    }

    #[test]
    #[should_panic(expected = "length of a no-match")]
    fn test_no_match_length_panics() {
        let result: MatchResult<()> = MatchResult::no_match(0);
        let _ = result.length();
    }

    #[test]
    #[should_panic(expected = "value of a no-match")]
    fn test_no_match_value_panics() {
        let result: MatchResult<()> = MatchResult::no_match(0);
        let _ = result.into_value();
    }
}
