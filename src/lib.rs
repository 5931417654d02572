//! # Introduction
//!
//! Pegmite evaluates parsing expression grammars (PEGs) directly: a
//! grammar is an in-memory table of named rules, each rule an operator
//! tree, and parsing is a recursive walk of those trees over an input
//! string. There is no code generation step and no separate compile
//! phase: the rule data structures are the grammar.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Definitions → Grammar/RuleSet → operator evaluation → MatchResult → action → value
//! ```
//!
//! 1. [`rules`] holds the grammar data model: operator trees, character
//!    classes, named definitions with optional semantic actions, and the
//!    [`rules::value::Value`] algebra carried by matches.
//! 2. [`engine`] is the evaluator: the match-result algebra, per-operator
//!    evaluation with PEG semantics, rule resolution with definitional
//!    error attribution, and the whole-input [`engine::grammar::Grammar`]
//!    façade.
//! 3. [`meta`] is a grammar for PEG syntax itself, built entirely on the
//!    public API, compiling textual grammars into [`Grammar`] values.
//!
//! ## PEG semantics
//!
//! Choice is ordered (the first matching alternative wins, always),
//! repetition is greedy but bounded, lookahead predicates are zero-width,
//! and a failing sequence backtracks to its own start offset. Matching a
//! rule either succeeds with a value or definitively does not match;
//! there is no ambiguity and no error recovery. Left recursion and
//! memoization are out of scope: rules recurse through plain function
//! calls, so a grammar that loops without consuming input will recurse
//! without bound.

pub mod engine;
pub mod meta;
pub mod rules;

pub use engine::errors::{DefinitionError, OperatorError};
pub use engine::grammar::Grammar;
pub use engine::result::MatchResult;
pub use engine::rule_set::RuleSet;
pub use rules::class::CharClass;
pub use rules::definition::{Action, Definition};
pub use rules::operator::Operator;
pub use rules::value::Value;
