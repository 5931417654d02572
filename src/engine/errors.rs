//! Definitional error types for grammar evaluation
//!
//! These errors mark grammar-authoring bugs (as opposed to parse
//! failures, which are ordinary [`crate::engine::result::MatchResult`]
//! no-matches): a rule referencing an identifier that does not exist,
//! or an operator carrying a payload that cannot be evaluated.
//!
//! All of them are fatal to the `parse` call that hit them. They bubble
//! up through the evaluator untouched and get attributed to a named rule
//! at each rule-resolution boundary, so a deeply nested fault surfaces
//! naming the outermost rule whose evaluation failed, with the chain of
//! causes preserved through [`std::error::Error::source`].

use std::error::Error;
use std::fmt;

/// Structural faults raised while walking an operator tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// A character-class specification that cannot be scanned
    MalformedClass { spec: String, message: String },

    /// A repeat whose minimum exceeds its declared maximum
    RepeatBounds { min: usize, max: usize },

    /// A nested identifier reference failed definitionally
    Definition(Box<DefinitionError>),
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorError::MalformedClass { spec, message } => {
                write!(f, "Malformed character class `[{}]`: {}", spec, message)
            }
            OperatorError::RepeatBounds { min, max } => {
                write!(f, "Repeat minimum {} exceeds maximum {}", min, max)
            }
            OperatorError::Definition(cause) => write!(f, "{}", cause),
        }
    }
}

impl Error for OperatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OperatorError::Definition(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Faults attributable to a named rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// The identifier names no definition in the rule set
    Unknown {
        identifier: String,
        /// Nearby definition names, for "did you mean" diagnostics
        candidates: Vec<String>,
    },

    /// Evaluating the rule's operator tree raised a structural fault
    Invalid {
        identifier: String,
        cause: OperatorError,
    },
}

impl DefinitionError {
    /// An unknown-definition error, collecting close-by names from
    /// `available` as suggestions: either the unknown identifier is a
    /// substring of the candidate, or the two are within an edit
    /// distance of a third of the identifier's length.
    pub(crate) fn unknown<'a>(
        identifier: &str,
        available: impl Iterator<Item = &'a str>,
    ) -> Self {
        let mut candidates: Vec<String> = available
            .filter(|name| {
                name.contains(identifier)
                    || levenshtein(identifier, name) <= identifier.chars().count() / 3
            })
            .map(str::to_string)
            .collect();
        // the rule table iterates in hash order; sort for stable messages
        candidates.sort();

        DefinitionError::Unknown {
            identifier: identifier.to_string(),
            candidates,
        }
    }

    pub(crate) fn invalid(identifier: &str, cause: OperatorError) -> Self {
        DefinitionError::Invalid {
            identifier: identifier.to_string(),
            cause,
        }
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::Unknown {
                identifier,
                candidates,
            } => {
                if candidates.is_empty() {
                    write!(f, "Unknown definition `{}`.", identifier)
                } else {
                    write!(
                        f,
                        "Unknown definition `{}`, did you mean one of these `{}`?",
                        identifier,
                        candidates.join("`, `")
                    )
                }
            }
            DefinitionError::Invalid { identifier, cause } => {
                write!(f, "Invalid definition `{}`: {}", identifier, cause)
            }
        }
    }
}

impl Error for DefinitionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DefinitionError::Invalid { cause, .. } => Some(cause),
            DefinitionError::Unknown { .. } => None,
        }
    }
}

/// Edit distance between two strings, two-row iterative form.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("Numbr", "Number"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_unknown_without_candidates() {
        let error = DefinitionError::unknown("Foo", ["Digits", "Spacing"].into_iter());
        assert_eq!(error.to_string(), "Unknown definition `Foo`.");
    }

    #[test]
    fn test_unknown_suggests_close_names() {
        let error = DefinitionError::unknown(
            "Numbr",
            ["Number", "Digit", "SignedNumbr"].into_iter(),
        );
        assert_eq!(
            error.to_string(),
            "Unknown definition `Numbr`, did you mean one of these `Number`, `SignedNumbr`?"
        );
    }

    #[test]
    fn test_invalid_displays_its_cause() {
        let error = DefinitionError::invalid(
            "Word",
            OperatorError::RepeatBounds { min: 4, max: 2 },
        );
        assert_eq!(
            error.to_string(),
            "Invalid definition `Word`: Repeat minimum 4 exceeds maximum 2"
        );
        assert!(error.source().is_some());
    }
}
