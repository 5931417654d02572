// Integration tests for compiling textual PEG notation

use pegmite::meta::{self, MetaValue};
use pegmite::{Grammar, Value};

fn compile(source: &str) -> Grammar<()> {
    meta::compile(source)
        .expect("compiling hit a definitional error")
        .expect("source is not valid PEG notation")
}

fn parse(grammar: &Grammar<()>, input: &str) -> Option<String> {
    grammar
        .parse(input)
        .expect("parsing hit a definitional error")
        .map(|value| value.flatten())
}

#[test]
fn test_compile_a_sentence_grammar() {
    let grammar = compile(
        "Sentence <- Words '!' !.\n\
         Words    <- Word (' ' Word)*\n\
         Word     <- [a-zA-Z]+\n",
    );

    assert_eq!(grammar.top_level(), "Sentence");
    assert!(grammar.rule_set().contains("Words"));
    assert!(grammar.rule_set().contains("Word"));
    assert!(!grammar.rule_set().contains("Paragraph"));
    assert_eq!(grammar.rule_set().len(), 3);
    assert_eq!(
        parse(&grammar, "A nice sentence!"),
        Some("A nice sentence!".to_string())
    );
    assert_eq!(parse(&grammar, "No terminator"), None);
    assert_eq!(parse(&grammar, "Trailing! junk"), None);
}

#[test]
fn test_the_first_rule_is_the_top_level() {
    let grammar = compile("First <- 'a' Second\nSecond <- 'b'\n");

    assert_eq!(grammar.top_level(), "First");
    assert_eq!(parse(&grammar, "ab"), Some("ab".to_string()));
}

#[test]
fn test_repetition_suffixes() {
    let grammar = compile("Top <- 'a'* 'b'+ 'c'? !.\n");

    assert_eq!(parse(&grammar, "aabbc"), Some("aabbc".to_string()));
    assert_eq!(parse(&grammar, "bb"), Some("bb".to_string()));
    assert_eq!(parse(&grammar, "aab"), Some("aab".to_string()));
    // at least one b is required
    assert_eq!(parse(&grammar, "aac"), None);
    // c at most once
    assert_eq!(parse(&grammar, "abcc"), None);
}

#[test]
fn test_lookahead_prefixes() {
    let grammar = compile("Top <- &'a' [a-z]+ !.\n");
    assert_eq!(parse(&grammar, "abc"), Some("abc".to_string()));
    assert_eq!(parse(&grammar, "xyz"), None);

    let grammar = compile("Top <- (!'q' [a-z])+ !.\n");
    assert_eq!(parse(&grammar, "abc"), Some("abc".to_string()));
    assert_eq!(parse(&grammar, "aqc"), None);
}

#[test]
fn test_ordered_choice_and_grouping() {
    let grammar = compile("Top <- ('ab' / 'a') 'c' !.\n");

    assert_eq!(parse(&grammar, "abc"), Some("abc".to_string()));
    assert_eq!(parse(&grammar, "ac"), Some("ac".to_string()));
    assert_eq!(parse(&grammar, "bc"), None);

    // the first alternative shadows the second at the same input
    let grammar = compile("Top <- ('a' / 'ab') 'c' !.\n");
    assert_eq!(parse(&grammar, "abc"), None);
}

#[test]
fn test_both_quote_styles() {
    let grammar = compile("Top <- \"ab\" 'cd' !.\n");
    assert_eq!(parse(&grammar, "abcd"), Some("abcd".to_string()));

    // a single quote inside double quotes, and vice versa
    let grammar = compile("Top <- \"'\" '\"' !.\n");
    assert_eq!(parse(&grammar, "'\""), Some("'\"".to_string()));
}

#[test]
fn test_character_classes_and_dot() {
    let grammar = compile("Number <- [0-9]+ ('.' [0-9]+)? !.\n");
    assert_eq!(parse(&grammar, "1200.96"), Some("1200.96".to_string()));
    assert_eq!(parse(&grammar, "42"), Some("42".to_string()));
    assert_eq!(parse(&grammar, "1,2"), None);

    let grammar = compile("Top <- 'a' . 'c' !.\n");
    assert_eq!(parse(&grammar, "abc"), Some("abc".to_string()));
    assert_eq!(parse(&grammar, "axc"), Some("axc".to_string()));
    assert_eq!(parse(&grammar, "ac"), None);
}

#[test]
fn test_comments_and_spacing_are_ignored() {
    let grammar = compile(
        "# a grammar of words\n\
         \n\
         Top  <- Word !.   # only one word\n\
         Word <- [a-z]+\n",
    );

    assert_eq!(grammar.top_level(), "Top");
    assert_eq!(parse(&grammar, "hello"), Some("hello".to_string()));
    assert_eq!(parse(&grammar, "two words"), None);
}

#[test]
fn test_a_comment_after_a_token_keeps_the_construct() {
    // the comment rides along in the DOT token's spacing; the `!.`
    // predicate must still be compiled
    let grammar = compile("Top <- [a-z]+ !. # must consume everything\n");
    assert_eq!(parse(&grammar, "word"), Some("word".to_string()));
    assert_eq!(parse(&grammar, "two words"), None);

    // same for a repetition suffix followed by a comment
    let grammar = compile("Top <- 'a'+ # at least one\n!.\n");
    assert_eq!(parse(&grammar, "aaa"), Some("aaa".to_string()));
    assert_eq!(parse(&grammar, ""), None);
    assert_eq!(parse(&grammar, "ab"), None);
}

#[test]
fn test_class_escapes_decode_at_match_time() {
    let grammar = compile("Top <- [a\\t]+ !.\n");

    assert_eq!(parse(&grammar, "a\ta"), Some("a\ta".to_string()));
    assert_eq!(parse(&grammar, "t"), None);
}

#[test]
fn test_literal_escapes_stay_raw() {
    // '\n' in PEG notation is the two characters backslash and n, not
    // a newline
    let grammar = compile("Top <- '\\n' !.\n");

    assert_eq!(parse(&grammar, "\\n"), Some("\\n".to_string()));
    assert_eq!(parse(&grammar, "\n"), None);
}

#[test]
fn test_invalid_notation_does_not_compile() {
    assert!(meta::compile::<()>("1234").unwrap().is_none());
    assert!(meta::compile::<()>("Top <- 'unterminated\n").unwrap().is_none());
    assert!(meta::compile::<()>("").unwrap().is_none());
}

#[test]
fn test_compiled_grammars_flag_unknown_references() {
    let grammar = compile("Top <- Missing\n");

    let error = grammar.parse("x").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid definition `Top`: Unknown definition `Missing`."
    );
}

#[test]
fn test_the_meta_grammar_is_shared() {
    assert!(std::ptr::eq(meta::grammar(), meta::grammar()));
}

#[test]
fn test_parsing_notation_yields_rules_in_source_order() {
    let parsed = meta::grammar()
        .parse("A <- 'a'\nB <- 'b'\n")
        .expect("the grammar of PEG notation is well formed")
        .expect("the source is valid PEG notation");

    let Value::Custom(MetaValue::Rules(rules)) = parsed else {
        panic!("expected a rule list, got {:?}", parsed);
    };
    let identifiers: Vec<&str> = rules.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(identifiers, ["A", "B"]);
}
