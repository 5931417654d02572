//! Operator evaluation
//!
//! This module is the recursive core of the engine: it walks an operator
//! tree against the input, one operator kind at a time, producing
//! [`MatchResult`]s. It extends [`RuleSet`] with a second `impl` block,
//! keeping the evaluation logic next to its helpers while the table and
//! rule-boundary concerns stay in `rule_set`.
//!
//! # Backtracking
//!
//! There is no position stack to rewind. Each attempt receives the
//! offset to try and returns a fresh result; a combinator that needs to
//! backtrack simply discards the child result and reuses the offset it
//! already holds. Sequence and repeat anchor their no-match at their own
//! start offset so partial consumption is never visible to callers.

use crate::engine::errors::OperatorError;
use crate::engine::result::MatchResult;
use crate::engine::rule_set::RuleSet;
use crate::rules::class::CharClass;
use crate::rules::operator::Operator;
use crate::rules::value::Value;

impl<T> RuleSet<T> {
    /// Evaluates one operator node against `input` at byte offset
    /// `offset`.
    ///
    /// The match on the operator kind is exhaustive; there is no
    /// "unrecognized operator" path. Structural faults (malformed class
    /// specifications, impossible repeat bounds, definitional failures
    /// of nested identifier references) come back as errors and are
    /// attributed to the enclosing rule by [`RuleSet::parse`].
    pub(crate) fn evaluate(
        &self,
        operator: &Operator,
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        match operator {
            Operator::Literal(text) => Ok(Self::evaluate_literal(text, input, offset)),
            Operator::Identifier(name) => self
                .parse(name, input, offset)
                .map_err(|cause| OperatorError::Definition(Box::new(cause))),
            Operator::CharacterClass(class) => Self::evaluate_class(class, input, offset),
            Operator::Any => Ok(Self::evaluate_any(input, offset)),
            Operator::Sequence(operators) => self.evaluate_sequence(operators, input, offset),
            Operator::Choice(operators) => self.evaluate_choice(operators, input, offset),
            Operator::Repeat { operator, min, max } => {
                self.evaluate_repeat(operator, *min, *max, input, offset)
            }
            Operator::Not(operator) => self.evaluate_not(operator, input, offset),
            Operator::And(operator) => self.evaluate_and(operator, input, offset),
        }
    }

    /// A single comparison against the input; no backtracking needed.
    fn evaluate_literal(text: &str, input: &str, offset: usize) -> MatchResult<T> {
        let matches = input
            .get(offset..)
            .map_or(false, |rest| rest.starts_with(text));

        if matches {
            MatchResult::matched(text.len(), Value::text(text), offset)
        } else {
            MatchResult::no_match(offset)
        }
    }

    /// Exactly one character, provided it belongs to the class.
    fn evaluate_class(
        class: &CharClass,
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        let Some(c) = Self::char_at(input, offset) else {
            return Ok(MatchResult::no_match(offset));
        };

        let contained = class
            .contains(c)
            .map_err(|message| OperatorError::MalformedClass {
                spec: class.spec().to_string(),
                message,
            })?;

        if contained {
            Ok(MatchResult::matched(
                c.len_utf8(),
                Value::Text(c.to_string()),
                offset,
            ))
        } else {
            Ok(MatchResult::no_match(offset))
        }
    }

    /// Exactly one character, if any input remains. `Not(Any)` is the
    /// canonical end-of-input test.
    fn evaluate_any(input: &str, offset: usize) -> MatchResult<T> {
        match Self::char_at(input, offset) {
            Some(c) => MatchResult::matched(c.len_utf8(), Value::Text(c.to_string()), offset),
            None => MatchResult::no_match(offset),
        }
    }

    fn evaluate_sequence(
        &self,
        operators: &[Operator],
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        let start = offset;
        let mut position = offset;
        let mut length = 0;
        let mut values = Vec::with_capacity(operators.len());

        for operator in operators {
            let result = self.evaluate(operator, input, position)?;
            if !result.is_match() {
                // whatever earlier children consumed is discarded; the
                // sequence fails as a whole at its own start
                return Ok(MatchResult::no_match(start));
            }
            position = result.new_offset();
            length += result.length();
            values.push(result.into_value());
        }

        Ok(MatchResult::matched(length, Value::List(values), start))
    }

    /// Ordered choice: children are tried in listed order at the same
    /// offset and the first match is returned verbatim. The order is
    /// semantic and must never be rearranged.
    fn evaluate_choice(
        &self,
        operators: &[Operator],
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        for operator in operators {
            let result = self.evaluate(operator, input, offset)?;
            if result.is_match() {
                return Ok(result);
            }
        }

        Ok(MatchResult::no_match(offset))
    }

    /// Greedy repetition: the child is matched as often as it will, up
    /// to `max`; fewer than `min` successes fail the repeat as a whole
    /// at its start offset. Zero successes with `min` 0 is a valid
    /// zero-width match carrying an empty list.
    fn evaluate_repeat(
        &self,
        operator: &Operator,
        min: usize,
        max: Option<usize>,
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        if let Some(max) = max {
            if min > max {
                return Err(OperatorError::RepeatBounds { min, max });
            }
        }

        let start = offset;
        let mut position = offset;
        let mut length = 0;
        let mut values = Vec::new();

        while max.map_or(true, |max| values.len() < max) {
            let result = self.evaluate(operator, input, position)?;
            if !result.is_match() {
                break;
            }
            position = result.new_offset();
            length += result.length();
            values.push(result.into_value());
        }

        if values.len() < min {
            return Ok(MatchResult::no_match(start));
        }

        Ok(MatchResult::matched(length, Value::List(values), start))
    }

    /// Negative lookahead: inverts the child's outcome and never
    /// consumes input, no matter how much the child would have.
    fn evaluate_not(
        &self,
        operator: &Operator,
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        let result = self.evaluate(operator, input, offset)?;
        if result.is_match() {
            Ok(MatchResult::no_match(offset))
        } else {
            Ok(MatchResult::matched(0, Value::Empty, offset))
        }
    }

    /// Positive lookahead: succeeds with the child but discards its
    /// consumed length.
    fn evaluate_and(
        &self,
        operator: &Operator,
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, OperatorError> {
        let result = self.evaluate(operator, input, offset)?;
        if result.is_match() {
            Ok(MatchResult::matched(0, Value::Empty, offset))
        } else {
            Ok(MatchResult::no_match(offset))
        }
    }

    /// The character starting at `offset`, if the offset is in bounds
    /// and on a character boundary.
    fn char_at(input: &str, offset: usize) -> Option<char> {
        input.get(offset..).and_then(|rest| rest.chars().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::definition::Definition;

    fn rules(definitions: Vec<Definition<()>>) -> RuleSet<()> {
        RuleSet::new(definitions)
    }

    #[test]
    fn test_sequence_backtracks_to_its_start_offset() {
        let rules = rules(vec![Definition::new(
            "AB",
            Operator::Sequence(vec![Operator::literal("a"), Operator::literal("b")]),
        )]);

        let result = rules.parse("AB", "ac", 1).unwrap();
        assert!(!result.is_match());
        assert_eq!(result.offset(), 1);
    }

    #[test]
    fn test_choice_returns_the_first_match() {
        let rules = rules(vec![Definition::new(
            "Prefix",
            Operator::Choice(vec![Operator::literal("a"), Operator::literal("ab")]),
        )]);

        let result = rules.parse("Prefix", "ab", 0).unwrap();
        assert_eq!(result.length(), 1);
        assert_eq!(result.into_value(), Value::text("a"));
    }

    #[test]
    fn test_predicates_are_zero_width() {
        let rules = rules(vec![
            Definition::new("NotA", Operator::not(Operator::literal("a"))),
            Definition::new("SeesA", Operator::and(Operator::literal("a"))),
        ]);

        let not = rules.parse("NotA", "b", 0).unwrap();
        assert_eq!(not.length(), 0);
        assert_eq!(not.new_offset(), 0);

        let and = rules.parse("SeesA", "a", 0).unwrap();
        assert_eq!(and.length(), 0);
        assert_eq!(and.new_offset(), 0);
    }

    #[test]
    fn test_repeat_with_zero_minimum_matches_nothing() {
        let rules = rules(vec![Definition::new(
            "Word",
            Operator::zero_or_more(Operator::literal("a")),
        )]);

        let result = rules.parse("Word", "bbb", 0).unwrap();
        assert!(result.is_match());
        assert_eq!(result.length(), 0);
        assert_eq!(result.into_value(), Value::text(""));
    }

    #[test]
    fn test_repeat_bounds_fault_is_attributed_to_the_rule() {
        let rules = rules(vec![Definition::new(
            "Bad",
            Operator::repeat(Operator::literal("a"), 3, Some(1)),
        )]);

        let error = rules.parse("Bad", "aaaa", 0).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid definition `Bad`: Repeat minimum 3 exceeds maximum 1"
        );
    }

    #[test]
    fn test_multibyte_characters_consume_their_utf8_length() {
        let rules = rules(vec![Definition::new("One", Operator::Any)]);

        let result = rules.parse("One", "déjà", 1).unwrap();
        assert_eq!(result.length(), 'é'.len_utf8());
        assert_eq!(result.new_offset(), 1 + 'é'.len_utf8());
    }
}
