// Character-range specifications for class operators

use std::iter::Peekable;
use std::str::Chars;

/// A character-range specification like `a-zA-Z0-9_`.
///
/// The specification language mirrors a regex character class body:
/// plain characters, `lo-hi` ranges, and backslash escapes. `\n`, `\r`
/// and `\t` decode to their control characters, `\s` stands for blank
/// characters (space, tab, newline, carriage return), `\d` for ASCII
/// digits, and any other escaped character stands for itself. A leading
/// or trailing `-` is a literal dash.
///
/// The specification is kept as written and scanned on every membership
/// test; a malformed specification (dangling trailing escape) surfaces
/// as an error from [`CharClass::contains`], which the engine attributes
/// to the rule using the class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass {
    spec: String,
}

/// One decoded element of a specification.
enum Item {
    /// A plain or escaped character
    One(char),
    /// `\s`
    Blank,
    /// `\d`
    Digit,
}

impl CharClass {
    pub fn new(spec: impl Into<String>) -> Self {
        CharClass { spec: spec.into() }
    }

    /// The specification exactly as written.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Tests whether `c` belongs to the class.
    ///
    /// The whole specification is scanned even after a hit, so a
    /// malformed specification errors for every tested character rather
    /// than only the ones that miss the items before the fault.
    pub fn contains(&self, c: char) -> Result<bool, String> {
        let mut chars = self.spec.chars().peekable();
        let mut found = false;

        while let Some(item) = Self::next_item(&mut chars)? {
            let low = match item {
                Item::One(low) => low,
                Item::Blank => {
                    found |= matches!(c, ' ' | '\t' | '\n' | '\r');
                    continue;
                }
                Item::Digit => {
                    found |= c.is_ascii_digit();
                    continue;
                }
            };

            if chars.peek() != Some(&'-') {
                found |= c == low;
                continue;
            }

            chars.next();
            match Self::next_item(&mut chars)? {
                Some(Item::One(high)) => {
                    found |= low <= c && c <= high;
                }
                Some(Item::Blank) | Some(Item::Digit) => {
                    return Err("a shorthand escape cannot bound a range".to_string());
                }
                // trailing dash: both it and the preceding character are literal
                None => {
                    found |= c == low || c == '-';
                }
            }
        }

        Ok(found)
    }

    fn next_item(chars: &mut Peekable<Chars>) -> Result<Option<Item>, String> {
        let Some(ch) = chars.next() else {
            return Ok(None);
        };

        if ch != '\\' {
            return Ok(Some(Item::One(ch)));
        }

        match chars.next() {
            None => Err("dangling escape at end of specification".to_string()),
            Some('n') => Ok(Some(Item::One('\n'))),
            Some('r') => Ok(Some(Item::One('\r'))),
            Some('t') => Ok(Some(Item::One('\t'))),
            Some('s') => Ok(Some(Item::Blank)),
            Some('d') => Ok(Some(Item::Digit)),
            Some(other) => Ok(Some(Item::One(other))),
        }
    }
}
