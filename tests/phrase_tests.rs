use chainscope::phrase::{
    case_template, classify_case, locate, match_prose, simplify_cases, LetterCase, LocatedPhrase, PhraseMatch,
    ProseRejection,
};
use chainscope::separation::TextDecomposition;

fn span(text: &str, phrase: &str) -> PhraseMatch {
    locate(&TextDecomposition::new(text), phrase).expect("phrase should be found")
}

fn assert_span(phrase: &str, text: &str, start_part: usize, start_offset: usize, end_offset: usize) {
    let m = span(text, phrase);
    assert_eq!(m.start_part, start_part, "{phrase:?} in {text:?}");
    assert_eq!(m.start_offset, start_offset, "{phrase:?} in {text:?}");
    assert_eq!(m.end_offset, end_offset, "{phrase:?} in {text:?}");
}

#[test]
fn finds_phrases_at_every_position() {
    assert_span("test", "testing this here", 0, 0, 4);
    assert_span("this is a test", "this_is_a_test_", 0, 0, 4);
    assert_span("test", "this_is_a_realtest_right_here", 3, 4, 8);
    assert_span("this is a testr", "yes_forrealthis_is_a_testrighthere_", 1, 7, 5);
    assert_span("testing", "this_is_actuallytestingstuff", 2, 8, 15);
    assert_span("this is a test", "once_again_this_is_a_test", 2, 0, 4);
    assert_span("this is a test", "once_againthis_is_a_testing", 1, 5, 4);
}

#[test]
fn multi_run_match_reports_end_part() {
    let m = span("yes_forrealthis_is_a_testrighthere_", "this is a testr");
    assert_eq!(m.end_part, 4);
    assert!(!m.is_single_run());
}

#[test]
fn single_run_containment_wins_over_multi_run() {
    let m = span("ChickenEATSgrainstonight", "chicken eats grains");
    assert!(m.is_single_run());
    assert_eq!((m.start_offset, m.end_offset), (0, 17));
}

#[test]
fn single_run_anywhere_beats_earlier_multi_run() {
    let m = span("a_bc_abc", "a bc");
    assert!(m.is_single_run());
    assert_eq!((m.start_part, m.start_offset, m.end_offset), (2, 0, 3));
}

#[test]
fn found_cases() {
    for (phrase, text) in [
        ("a", "a"),
        ("is", "this is a test"),
        ("this is", "this is a test"),
        ("this is a", "this-is_____a test"),
    ] {
        assert!(locate(&TextDecomposition::new(text), phrase).is_some(), "{phrase:?} in {text:?}");
    }
}

#[test]
fn not_found_cases() {
    let d = TextDecomposition::new("this is a test");
    assert!(locate(&d, "ths is").is_none());
    assert!(locate(&d, "this s").is_none());
    assert!(locate(&TextDecomposition::new("testing"), "").is_none());
}

fn before(text: &str, phrase: &str) -> String {
    let d = TextDecomposition::new(text);
    LocatedPhrase::find(&d, phrase).expect("found").text_before()
}

fn after(text: &str, phrase: &str) -> String {
    let d = TextDecomposition::new(text);
    LocatedPhrase::find(&d, phrase).expect("found").text_after()
}

#[test]
fn text_before_match() {
    assert_eq!(before("test", "test"), "");
    assert_eq!(before("test", "st"), "te");
    assert_eq!(before("_This is_a!test today", "a test"), "_This is_");
}

#[test]
fn text_after_match() {
    assert_eq!(after("test", "test"), "");
    assert_eq!(after("test", "te"), "st");
    assert_eq!(after("_This is_a!test today", "is a"), "!test today");
    assert_eq!(after("this_is_a_test!", "is a"), "_test!");
}

fn consistent(text: &str, phrase: &str) -> bool {
    let d = TextDecomposition::new(text);
    LocatedPhrase::find(&d, phrase).expect("found").separators_consistent()
}

#[test]
fn separator_consistency_inside_match() {
    assert!(consistent("this_is_a_test", "is"));
    assert!(consistent("chicken!!this_is_a_testchicken", "this is a test"));
    assert!(consistent("for real this is a test", "this is a test"));
    assert!(consistent("this_is!_@_____a_test", "is a"));
    assert!(consistent("this_is_a_test!", "is a test"));
    assert!(!consistent("this_is a test", "this is a"));
}

fn template(text: &str, phrase: &str) -> String {
    let d = TextDecomposition::new(text);
    LocatedPhrase::find(&d, phrase).expect("found").case_template().expect("valid case")
}

#[test]
fn case_templates() {
    assert_eq!(template("word", "word"), "lower");
    assert_eq!(template("WORD", "word"), "upper");
    assert_eq!(template("Word", "word"), "capitalized");
    assert_eq!(template("A", "a"), "upper");
    assert_eq!(template("thisIsATest", "this is a test"), "lower capitalized upper capitalized");
    assert_eq!(template("this_is_a_test", "this is a test"), "lower");
    assert_eq!(template("yesthisIsaTESThere", "this is a test"), "lower capitalized lower upper");
    assert_eq!(template("stuff!THIS_IS_A_TEST!stuff", "this is a test"), "upper");
}

#[test]
fn mixed_case_word_is_rejected() {
    assert_eq!(classify_case("wOrD"), Err(ProseRejection::InvalidCase("wOrD".to_string())));
    let d = TextDecomposition::new("say_hELLo");
    assert!(matches!(match_prose(&d, "hello"), Err(ProseRejection::InvalidCase(_))));
}

#[test]
fn case_simplification() {
    use LetterCase::*;
    assert_eq!(simplify_cases(&[Lower]), vec![Lower]);
    assert_eq!(simplify_cases(&[Lower, Upper]), vec![Lower, Upper]);
    assert_eq!(simplify_cases(&[Lower, Lower]), vec![Lower]);
    assert_eq!(
        simplify_cases(&[Upper, Capitalized, Lower, Upper, Lower, Lower, Lower]),
        vec![Upper, Capitalized, Lower, Upper, Lower]
    );
    assert_eq!(case_template(&[Upper, Lower, Lower]), "upper lower");
}

fn first_separator(text: &str, phrase: &str) -> String {
    let d = TextDecomposition::new(text);
    LocatedPhrase::find(&d, phrase).expect("found").first_interior_separator().to_string()
}

#[test]
fn first_interior_separator() {
    assert_eq!(first_separator("this", "this"), "");
    assert_eq!(first_separator("stuff this test", "this"), "");
    assert_eq!(first_separator("two  words", "two words"), "  ");
    assert_eq!(first_separator("This contains two_words in the middle", "two words"), "_");
    assert_eq!(first_separator("this_is_a_bigger_test_case", "bigger test"), "_");
    assert_eq!(first_separator("two_words_at_the_beginning", "two words"), "_");
    assert_eq!(first_separator("at_ending_there_are_two_words", "two words"), "_");
}

#[test]
fn match_prose_checks_in_order() {
    let d = TextDecomposition::new("this_is a test");
    assert_eq!(match_prose(&d, "nothing"), Err(ProseRejection::NotFound));
    assert_eq!(match_prose(&d, "this is a"), Err(ProseRejection::InconsistentSeparator));

    let ok = match_prose(&TextDecomposition::new("prefixsimple_text_postfix_text"), "simple text").expect("usable");
    assert_eq!(ok.text_before, "prefix");
    assert_eq!(ok.text_after, "_postfix_text");
    assert_eq!(ok.case_template, "lower");
    assert_eq!(ok.first_separator, "_");
}
