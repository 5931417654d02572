// Parse values produced by matching operators and rules

/// The payload carried by a successful match.
///
/// Leaf operators produce [`Value::Text`], zero-width predicates produce
/// [`Value::Empty`], and the aggregating operators (sequence, repeat)
/// collect their children into [`Value::List`]. Once a definition's
/// action has run, the caller's own type appears as [`Value::Custom`]
/// and flows through enclosing operators unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    /// No payload: the result of a zero-width predicate
    Empty,
    /// A leaf string: literals, class and any-character matches, and
    /// rules flattened by the default action
    Text(String),
    /// Ordered child values collected by sequence and repeat operators
    List(Vec<Value<T>>),
    /// A caller value produced by a definition's action
    Custom(T),
}

impl<T> Value<T> {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// Depth-first concatenation of every text leaf.
    ///
    /// `Empty` and `Custom` values contribute nothing. For a value built
    /// purely from action-free rules this reads back exactly the input
    /// substring the match consumed.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Value::Empty | Value::Custom(_) => {}
            Value::Text(text) => out.push_str(text),
            Value::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// The items of a `List`, or any other value as a one-element list.
    ///
    /// Action authors use this to destructure a match without caring
    /// whether the rule body happened to be an aggregate.
    pub fn into_list(self) -> Vec<Value<T>> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_custom(self) -> Option<T> {
        match self {
            Value::Custom(value) => Some(value),
            _ => None,
        }
    }
}
