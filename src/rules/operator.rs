// Operator tree definitions for grammar rules

use crate::rules::class::CharClass;

/// A single node in a rule's operator tree.
///
/// The set of kinds is closed: the evaluator matches on it exhaustively,
/// so every kind is guaranteed to be handled and a new kind cannot be
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Matches if the input at the current offset starts with this string
    Literal(String),

    /// Delegates to the named definition in the enclosing rule set
    Identifier(String),

    /// Matches exactly one character inside the class
    CharacterClass(CharClass),

    /// Matches exactly one character, as long as input remains
    Any,

    /// All children must match back to back; on any child failure the
    /// whole sequence reports no-match at its own start offset
    Sequence(Vec<Operator>),

    /// Children are tried in order at the same offset; the first match
    /// wins and later children are never attempted
    Choice(Vec<Operator>),

    /// Greedy repetition of the child, bounded by `min` and `max`
    Repeat {
        operator: Box<Operator>,
        /// Fewest repetitions required for the repeat to match
        min: usize,
        /// Most repetitions attempted; `None` means no upper bound
        max: Option<usize>,
    },

    /// Zero-width negative lookahead: succeeds iff the child fails
    Not(Box<Operator>),

    /// Zero-width positive lookahead: succeeds iff the child matches,
    /// without consuming what the child consumed
    And(Box<Operator>),
}

impl Operator {
    pub fn literal(text: impl Into<String>) -> Self {
        Operator::Literal(text.into())
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Operator::Identifier(name.into())
    }

    /// A character class from its range specification, e.g. `"a-zA-Z_"`.
    pub fn class(spec: impl Into<String>) -> Self {
        Operator::CharacterClass(CharClass::new(spec))
    }

    pub fn repeat(operator: Operator, min: usize, max: Option<usize>) -> Self {
        Operator::Repeat {
            operator: Box::new(operator),
            min,
            max,
        }
    }

    /// `operator*`
    pub fn zero_or_more(operator: Operator) -> Self {
        Operator::repeat(operator, 0, None)
    }

    /// `operator+`
    pub fn one_or_more(operator: Operator) -> Self {
        Operator::repeat(operator, 1, None)
    }

    /// `operator?`
    pub fn optional(operator: Operator) -> Self {
        Operator::repeat(operator, 0, Some(1))
    }

    /// `!operator`
    pub fn not(operator: Operator) -> Self {
        Operator::Not(Box::new(operator))
    }

    /// `&operator`
    pub fn and(operator: Operator) -> Self {
        Operator::And(Box::new(operator))
    }
}
