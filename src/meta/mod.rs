//! A grammar for PEG syntax itself
//!
//! This module is a downstream consumer of the engine, not part of it:
//! the grammar of textual PEG notation is expressed as ordinary rule
//! definitions over [`crate::engine`], with actions that build
//! [`Operator`] trees, and compiling a grammar is just parsing its
//! source with that grammar.
//!
//! The rules follow Bryan Ford's canonical PEG syntax: `Name <- expr`
//! definitions, `/` ordered choice, `&`/`!` lookahead prefixes,
//! `?`/`*`/`+` repetition suffixes, `'…'`/`"…"` literals, `[…]` classes,
//! `.` for any character, `(…)` grouping, and `#` line comments.
//!
//! Escape sequences inside literals are kept as their raw source text;
//! class bodies likewise keep their raw range text, which
//! [`crate::rules::class::CharClass`] decodes at match time.

mod rules;

use once_cell::sync::Lazy;

use crate::engine::errors::DefinitionError;
use crate::engine::grammar::Grammar;
use crate::rules::definition::Definition;
use crate::rules::operator::Operator;
use crate::rules::value::Value;

/// Values produced by the meta grammar's actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// An operator tree built from a parsed expression
    Op(Operator),
    /// One parsed `Identifier <- Expression` rule
    Rule {
        identifier: String,
        operator: Operator,
    },
    /// Every rule of a parsed grammar, in source order
    Rules(Vec<(String, Operator)>),
}

/// The PEG-syntax grammar, built once and shared.
pub fn grammar() -> &'static Grammar<MetaValue> {
    static GRAMMAR: Lazy<Grammar<MetaValue>> = Lazy::new(rules::build);
    &GRAMMAR
}

/// Compiles textual PEG source into a grammar.
///
/// `Ok(None)` means the source is not valid PEG notation. On success the
/// first rule in the source becomes the top-level rule. Compiled rules
/// carry no actions (PEG notation has no way to express them), so the
/// result is generic over any caller value type; action-free rules read
/// back as the text they match.
pub fn compile<T>(source: &str) -> Result<Option<Grammar<T>>, DefinitionError> {
    let parsed = grammar().parse(source)?;

    let Some(Value::Custom(MetaValue::Rules(rules))) = parsed else {
        return Ok(None);
    };
    let Some((top_level, _)) = rules.first() else {
        return Ok(None);
    };

    let top_level = top_level.clone();
    let definitions = rules
        .into_iter()
        .map(|(identifier, operator)| Definition::new(identifier, operator))
        .collect();

    Ok(Some(Grammar::new(top_level, definitions)))
}
