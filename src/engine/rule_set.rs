// Rule set construction and rule-level parsing

use rustc_hash::FxHashMap;

use crate::engine::errors::DefinitionError;
use crate::engine::result::MatchResult;
use crate::rules::definition::Definition;

/// An immutable lookup table from identifier to rule definition.
///
/// Built once at grammar-authoring time and never mutated afterwards;
/// parsing only reads it, so one rule set safely serves any number of
/// concurrent [`RuleSet::parse`] calls.
#[derive(Debug)]
pub struct RuleSet<T> {
    definitions: FxHashMap<String, Definition<T>>,
}

impl<T> RuleSet<T> {
    /// Indexes `definitions` by identifier.
    ///
    /// When two definitions share an identifier the later one wins,
    /// matching plain insertion-overwrite semantics.
    pub fn new(definitions: Vec<Definition<T>>) -> Self {
        let mut table = FxHashMap::default();
        for definition in definitions {
            table.insert(definition.identifier().to_string(), definition);
        }
        RuleSet { definitions: table }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.definitions.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Applies the named rule to `input` at byte offset `offset`.
    ///
    /// An ordinary failure to match is an `Ok` no-match result, never an
    /// error. Errors mean the grammar itself is malformed: the
    /// identifier is unknown, or a structural fault was hit inside the
    /// rule's operator tree, in which case the fault is re-attributed to
    /// this rule with the original cause preserved.
    ///
    /// On a match, the definition's action runs and its output replaces
    /// the raw parse-tree value while the consumed length and start
    /// offset are kept; enclosing operators only ever see the
    /// transformed value.
    pub fn parse(
        &self,
        identifier: &str,
        input: &str,
        offset: usize,
    ) -> Result<MatchResult<T>, DefinitionError> {
        let definition = match self.definitions.get(identifier) {
            Some(definition) => definition,
            None => {
                return Err(DefinitionError::unknown(
                    identifier,
                    self.definitions.keys().map(String::as_str),
                ));
            }
        };

        let result = self
            .evaluate(definition.operator(), input, offset)
            .map_err(|cause| DefinitionError::invalid(identifier, cause))?;

        if !result.is_match() {
            return Ok(result);
        }

        let length = result.length();
        let start = result.offset();
        let value = definition.apply(result.into_value());
        Ok(MatchResult::matched(length, value, start))
    }
}
