//! Rule evaluation engine
//!
//! This module evaluates grammars against input strings:
//! - [`result`]: the match-result algebra shared by every operator
//! - [`errors`]: the definitional error taxonomy
//! - [`rule_set`]: identifier → definition lookup and rule-level parsing
//! - [`evaluate`]: per-operator evaluation (the recursive core)
//! - [`grammar`]: the whole-input parsing façade
//!
//! # Evaluation model
//!
//! Evaluation is a single-threaded, purely recursive tree walk. Nothing
//! is mutated during a parse: every attempt returns a fresh
//! [`result::MatchResult`], and backtracking is nothing more than the
//! caller discarding a result and reusing the offset it already holds.
//! Because of that, any number of threads may parse concurrently with
//! the same rule set.
//!
//! Ordinary non-matching input is not an error; it travels through the
//! combinators as a first-class no-match result. Errors are reserved
//! for malformed grammars: unknown rule references and structurally
//! invalid operator payloads.

pub mod errors;
pub mod evaluate;
pub mod grammar;
pub mod result;
pub mod rule_set;
