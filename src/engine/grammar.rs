// Grammar façade: a rule set bound to a designated top-level rule

use crate::engine::errors::DefinitionError;
use crate::engine::rule_set::RuleSet;
use crate::rules::definition::Definition;
use crate::rules::value::Value;

/// The main entry point of the library: a rule set plus the identifier
/// of the rule that parses a whole input.
///
/// A grammar is stateless beyond those two pieces and never mutated by
/// parsing, so it can be shared freely between threads.
#[derive(Debug)]
pub struct Grammar<T> {
    top_level: String,
    rules: RuleSet<T>,
}

impl<T> Grammar<T> {
    /// Binds `definitions` to the rule named `top_level`, which
    /// [`Grammar::parse`] starts from.
    pub fn new(top_level: impl Into<String>, definitions: Vec<Definition<T>>) -> Self {
        Grammar {
            top_level: top_level.into(),
            rules: RuleSet::new(definitions),
        }
    }

    pub fn top_level(&self) -> &str {
        &self.top_level
    }

    /// The underlying rule set, for callers that need offset-level
    /// access to partial matches.
    pub fn rule_set(&self) -> &RuleSet<T> {
        &self.rules
    }

    /// Parses `input` from position 0 using the top-level rule.
    ///
    /// `Ok(None)` means the grammar does not match this input; it is an
    /// expected outcome, not an error. `Ok(Some(value))` carries the
    /// (possibly action-transformed) value with all position bookkeeping
    /// discarded. Errors only arise from malformed grammars.
    ///
    /// The match is not required to consume the whole input; grammars
    /// that want that end their top-level rule with a `!.` test
    /// ([`Operator::not`] around [`Operator::Any`]).
    ///
    /// [`Operator::not`]: crate::rules::operator::Operator::not
    /// [`Operator::Any`]: crate::rules::operator::Operator::Any
    pub fn parse(&self, input: &str) -> Result<Option<Value<T>>, DefinitionError> {
        let result = self.rules.parse(&self.top_level, input, 0)?;

        if !result.is_match() {
            return Ok(None);
        }

        Ok(Some(result.into_value()))
    }
}
