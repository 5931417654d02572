// Rule definitions and actions for the PEG-syntax grammar

use crate::engine::grammar::Grammar;
use crate::meta::MetaValue;
use crate::rules::definition::Definition;
use crate::rules::operator::Operator;
use crate::rules::value::Value;

fn op(operator: Operator) -> Value<MetaValue> {
    Value::Custom(MetaValue::Op(operator))
}

fn take_op(item: Value<MetaValue>) -> Option<Operator> {
    match item {
        Value::Custom(MetaValue::Op(operator)) => Some(operator),
        _ => None,
    }
}

/// The first operator value among `items`, if any.
fn first_op(items: Vec<Value<MetaValue>>) -> Option<Operator> {
    items.into_iter().find_map(take_op)
}

/// The lexeme of an at-most-once repetition like `(AND / NOT)?`. Token
/// rules already discard their trailing spacing, so the text is the bare
/// lexeme.
fn optional_marker(item: Option<Value<MetaValue>>) -> Option<String> {
    item.map(Value::into_list)
        .unwrap_or_default()
        .into_iter()
        .find_map(|item| match item {
            Value::Text(text) => Some(text),
            _ => None,
        })
}

/// Builds the grammar of PEG notation. Called once, through the shared
/// static in [`crate::meta::grammar`].
pub(super) fn build() -> Grammar<MetaValue> {
    Grammar::new(
        "Grammar",
        vec![
            // Grammar <- Spacing Definition+ EndOfFile
            Definition::with_action(
                "Grammar",
                Operator::Sequence(vec![
                    Operator::identifier("Spacing"),
                    Operator::one_or_more(Operator::identifier("Definition")),
                    Operator::identifier("EndOfFile"),
                ]),
                |value| {
                    let rules = value
                        .into_list()
                        .into_iter()
                        .flat_map(Value::into_list)
                        .filter_map(|item| match item {
                            Value::Custom(MetaValue::Rule {
                                identifier,
                                operator,
                            }) => Some((identifier, operator)),
                            _ => None,
                        })
                        .collect();
                    Value::Custom(MetaValue::Rules(rules))
                },
            ),
            // Definition <- Identifier LEFTARROW Expression
            Definition::with_action(
                "Definition",
                Operator::Sequence(vec![
                    Operator::identifier("Identifier"),
                    Operator::identifier("LEFTARROW"),
                    Operator::identifier("Expression"),
                ]),
                |value| {
                    let mut items = value.into_list().into_iter();
                    let identifier = match items.next().and_then(take_op) {
                        Some(Operator::Identifier(name)) => name,
                        _ => return Value::Empty,
                    };
                    items.next(); // the arrow token
                    let Some(operator) = items.next().and_then(take_op) else {
                        return Value::Empty;
                    };
                    Value::Custom(MetaValue::Rule {
                        identifier,
                        operator,
                    })
                },
            ),
            // Expression <- Sequence (SLASH Sequence)*
            Definition::with_action(
                "Expression",
                Operator::Sequence(vec![
                    Operator::identifier("Sequence"),
                    Operator::zero_or_more(Operator::Sequence(vec![
                        Operator::identifier("SLASH"),
                        Operator::identifier("Sequence"),
                    ])),
                ]),
                |value| {
                    let mut items = value.into_list().into_iter();
                    let Some(first) = items.next().and_then(take_op) else {
                        return Value::Empty;
                    };
                    let rest: Vec<Operator> = items
                        .flat_map(Value::into_list)
                        .flat_map(Value::into_list)
                        .filter_map(take_op)
                        .collect();

                    if rest.is_empty() {
                        return op(first);
                    }
                    let mut alternatives = vec![first];
                    alternatives.extend(rest);
                    op(Operator::Choice(alternatives))
                },
            ),
            // Sequence <- Prefix*
            Definition::with_action(
                "Sequence",
                Operator::zero_or_more(Operator::identifier("Prefix")),
                |value| {
                    let mut operators: Vec<Operator> =
                        value.into_list().into_iter().filter_map(take_op).collect();
                    if operators.len() == 1 {
                        op(operators.remove(0))
                    } else {
                        op(Operator::Sequence(operators))
                    }
                },
            ),
            // Prefix <- (AND / NOT)? Suffix
            Definition::with_action(
                "Prefix",
                Operator::Sequence(vec![
                    Operator::optional(Operator::Choice(vec![
                        Operator::identifier("AND"),
                        Operator::identifier("NOT"),
                    ])),
                    Operator::identifier("Suffix"),
                ]),
                |value| {
                    let mut items = value.into_list().into_iter();
                    let marker = optional_marker(items.next());
                    let Some(suffix) = items.next().and_then(take_op) else {
                        return Value::Empty;
                    };
                    match marker.as_deref() {
                        Some("&") => op(Operator::and(suffix)),
                        Some("!") => op(Operator::not(suffix)),
                        _ => op(suffix),
                    }
                },
            ),
            // Suffix <- Primary (QUESTION / STAR / PLUS)?
            Definition::with_action(
                "Suffix",
                Operator::Sequence(vec![
                    Operator::identifier("Primary"),
                    Operator::optional(Operator::Choice(vec![
                        Operator::identifier("QUESTION"),
                        Operator::identifier("STAR"),
                        Operator::identifier("PLUS"),
                    ])),
                ]),
                |value| {
                    let mut items = value.into_list().into_iter();
                    let Some(primary) = items.next().and_then(take_op) else {
                        return Value::Empty;
                    };
                    match optional_marker(items.next()).as_deref() {
                        Some("?") => op(Operator::optional(primary)),
                        Some("*") => op(Operator::zero_or_more(primary)),
                        Some("+") => op(Operator::one_or_more(primary)),
                        _ => op(primary),
                    }
                },
            ),
            // Primary <- Identifier !LEFTARROW
            //          / OPEN Expression CLOSE
            //          / Literal / Class / DOT
            Definition::with_action(
                "Primary",
                Operator::Choice(vec![
                    Operator::Sequence(vec![
                        Operator::identifier("Identifier"),
                        Operator::not(Operator::identifier("LEFTARROW")),
                    ]),
                    Operator::Sequence(vec![
                        Operator::identifier("OPEN"),
                        Operator::identifier("Expression"),
                        Operator::identifier("CLOSE"),
                    ]),
                    Operator::identifier("Literal"),
                    Operator::identifier("Class"),
                    Operator::identifier("DOT"),
                ]),
                |value| match value {
                    // a literal or class expression, already built
                    Value::Custom(custom) => Value::Custom(custom),
                    // the DOT token yields its bare lexeme
                    Value::Text(text) if text == "." => op(Operator::Any),
                    // reference or parenthesized group: the one operator inside
                    Value::List(items) => match first_op(items) {
                        Some(operator) => op(operator),
                        None => Value::Empty,
                    },
                    other => other,
                },
            ),
            // Identifier <- IdentStart IdentCont* Spacing
            Definition::with_action(
                "Identifier",
                Operator::Sequence(vec![
                    Operator::identifier("IdentStart"),
                    Operator::zero_or_more(Operator::identifier("IdentCont")),
                    Operator::identifier("Spacing"),
                ]),
                |value| {
                    let mut name = String::new();
                    let mut items = value.into_list().into_iter();
                    if let Some(start) = items.next() {
                        name.push_str(&start.flatten());
                    }
                    if let Some(rest) = items.next() {
                        name.push_str(&rest.flatten());
                    }
                    // the trailing spacing is not part of the name
                    op(Operator::identifier(name))
                },
            ),
            // IdentStart <- [a-zA-Z_]
            Definition::new("IdentStart", Operator::class("a-zA-Z_")),
            // IdentCont <- IdentStart / [0-9]
            Definition::new(
                "IdentCont",
                Operator::Choice(vec![
                    Operator::identifier("IdentStart"),
                    Operator::class("0-9"),
                ]),
            ),
            // Literal <- ['] (!['] Char)* ['] Spacing
            //          / ["] (!["] Char)* ["] Spacing
            Definition::with_action(
                "Literal",
                Operator::Choice(vec![
                    Operator::Sequence(vec![
                        Operator::literal("'"),
                        Operator::zero_or_more(Operator::Sequence(vec![
                            Operator::not(Operator::literal("'")),
                            Operator::identifier("Char"),
                        ])),
                        Operator::literal("'"),
                        Operator::identifier("Spacing"),
                    ]),
                    Operator::Sequence(vec![
                        Operator::literal("\""),
                        Operator::zero_or_more(Operator::Sequence(vec![
                            Operator::not(Operator::literal("\"")),
                            Operator::identifier("Char"),
                        ])),
                        Operator::literal("\""),
                        Operator::identifier("Spacing"),
                    ]),
                ]),
                |value| {
                    let mut items = value.into_list();
                    if items.len() < 2 {
                        return Value::Empty;
                    }
                    // the body sits between the quotes; escapes stay raw
                    let text = items.remove(1).flatten();
                    op(Operator::Literal(text))
                },
            ),
            // Class <- '[' (!']' Range)* ']' Spacing
            Definition::with_action(
                "Class",
                Operator::Sequence(vec![
                    Operator::literal("["),
                    Operator::zero_or_more(Operator::Sequence(vec![
                        Operator::not(Operator::literal("]")),
                        Operator::identifier("Range"),
                    ])),
                    Operator::literal("]"),
                    Operator::identifier("Spacing"),
                ]),
                |value| {
                    let mut items = value.into_list();
                    if items.len() < 2 {
                        return Value::Empty;
                    }
                    let spec = items.remove(1).flatten();
                    op(Operator::class(spec))
                },
            ),
            // Range <- Char '-' Char / Char
            Definition::new(
                "Range",
                Operator::Choice(vec![
                    Operator::Sequence(vec![
                        Operator::identifier("Char"),
                        Operator::literal("-"),
                        Operator::identifier("Char"),
                    ]),
                    Operator::identifier("Char"),
                ]),
            ),
            // Char <- '\\' [nrt'"\[\]\\]
            //       / '\\' [0-2][0-7][0-7]
            //       / '\\' [0-7][0-7]?
            //       / !'\\' .
            Definition::new(
                "Char",
                Operator::Choice(vec![
                    Operator::Sequence(vec![
                        Operator::literal("\\"),
                        Operator::class("nrt'\"\\[\\]\\\\"),
                    ]),
                    Operator::Sequence(vec![
                        Operator::literal("\\"),
                        Operator::Sequence(vec![
                            Operator::class("0-2"),
                            Operator::class("0-7"),
                            Operator::class("0-7"),
                        ]),
                    ]),
                    Operator::Sequence(vec![
                        Operator::literal("\\"),
                        Operator::Sequence(vec![
                            Operator::class("0-7"),
                            Operator::optional(Operator::class("0-7")),
                        ]),
                    ]),
                    Operator::Sequence(vec![
                        Operator::not(Operator::literal("\\")),
                        Operator::Any,
                    ]),
                ]),
            ),
            // token rules: the lexeme plus any trailing spacing
            token("LEFTARROW", "<-"),
            token("SLASH", "/"),
            token("AND", "&"),
            token("NOT", "!"),
            token("QUESTION", "?"),
            token("STAR", "*"),
            token("PLUS", "+"),
            token("OPEN", "("),
            token("CLOSE", ")"),
            token("DOT", "."),
            // Spacing <- (Space / Comment)*
            Definition::new(
                "Spacing",
                Operator::zero_or_more(Operator::Choice(vec![
                    Operator::identifier("Space"),
                    Operator::identifier("Comment"),
                ])),
            ),
            // Comment <- '#' (!EndOfLine .)* EndOfLine
            Definition::new(
                "Comment",
                Operator::Sequence(vec![
                    Operator::literal("#"),
                    Operator::zero_or_more(Operator::Sequence(vec![
                        Operator::not(Operator::identifier("EndOfLine")),
                        Operator::Any,
                    ])),
                    Operator::identifier("EndOfLine"),
                ]),
            ),
            // Space <- ' ' / '\t' / EndOfLine
            Definition::new(
                "Space",
                Operator::Choice(vec![
                    Operator::literal(" "),
                    Operator::literal("\t"),
                    Operator::identifier("EndOfLine"),
                ]),
            ),
            // EndOfLine <- '\r\n' / '\n' / '\r'
            Definition::new(
                "EndOfLine",
                Operator::Choice(vec![
                    Operator::literal("\r\n"),
                    Operator::literal("\n"),
                    Operator::literal("\r"),
                ]),
            ),
            // EndOfFile <- !.
            Definition::new("EndOfFile", Operator::not(Operator::Any)),
        ],
    )
}

/// `NAME <- 'lexeme' Spacing`
///
/// The action drops the consumed spacing (which may contain comments)
/// from the value, so rules matching a token see the bare lexeme.
fn token(identifier: &str, lexeme: &str) -> Definition<MetaValue> {
    let text = lexeme.to_string();
    Definition::with_action(
        identifier,
        Operator::Sequence(vec![
            Operator::literal(lexeme),
            Operator::identifier("Spacing"),
        ]),
        move |_| Value::Text(text.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_marker_extracts_the_lexeme() {
        let item: Value<MetaValue> = Value::List(vec![Value::text("&")]);
        assert_eq!(optional_marker(Some(item)).as_deref(), Some("&"));
        assert_eq!(optional_marker(None), None);
    }

    #[test]
    fn test_token_rules_span_the_spacing_but_yield_the_bare_lexeme() {
        let grammar = build();
        let result = grammar.rule_set().parse("LEFTARROW", "<-  x", 0).unwrap();
        assert_eq!(result.new_offset(), 4);
        assert_eq!(result.into_value(), Value::text("<-"));

        // a comment inside the trailing spacing never leaks into the value
        let result = grammar
            .rule_set()
            .parse("DOT", ". # trailing\n", 0)
            .unwrap();
        assert_eq!(result.into_value(), Value::text("."));
    }
}
