// Named rule definitions binding an operator tree to an optional action

use std::fmt;

use crate::rules::operator::Operator;
use crate::rules::value::Value;

/// A semantic action: rewrites the raw matched value of a rule into a
/// caller value before any enclosing operator sees it.
///
/// Actions are infallible and must be `Send + Sync` so that one grammar
/// can serve concurrent parses.
pub type Action<T> = Box<dyn Fn(Value<T>) -> Value<T> + Send + Sync>;

/// A single named rule: an identifier, an operator tree and an optional
/// action applied to every successful match.
pub struct Definition<T> {
    identifier: String,
    operator: Operator,
    action: Option<Action<T>>,
}

impl<T> Definition<T> {
    /// A rule without an action; matches flatten to the text they consumed.
    pub fn new(identifier: impl Into<String>, operator: Operator) -> Self {
        Definition {
            identifier: identifier.into(),
            operator,
            action: None,
        }
    }

    /// A rule with an action.
    pub fn with_action(
        identifier: impl Into<String>,
        operator: Operator,
        action: impl Fn(Value<T>) -> Value<T> + Send + Sync + 'static,
    ) -> Self {
        Definition {
            identifier: identifier.into(),
            operator,
            action: Some(Box::new(action)),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Transforms a matched value.
    ///
    /// Without an explicit action, a `List` flattens to the text it
    /// consumed and any other value passes through unchanged, so an
    /// action-free rule still reads back as the substring it matched.
    pub fn apply(&self, value: Value<T>) -> Value<T> {
        match &self.action {
            Some(action) => action(value),
            None => match value {
                Value::List(_) => {
                    let text = value.flatten();
                    Value::Text(text)
                }
                other => other,
            },
        }
    }
}

impl<T> fmt::Debug for Definition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("identifier", &self.identifier)
            .field("operator", &self.operator)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
