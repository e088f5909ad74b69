//! Property-based tests for rename
//!
//! This module uses proptest to verify core invariants of the expression
//! engine over generated names and expressions.

use rename::{Engine, HighlightFormatter, HighlightStyle, parse_expression};

// Import proptest macro
use proptest::prelude::*;

/// Build `s<D>match<D>replace<D>flags`, escaping the delimiter in both texts
fn build_expression(delimiter: char, match_text: &str, replace_text: &str, flags: &str) -> String {
    let escape = |text: &str| text.replace(delimiter, &format!("\\{}", delimiter));
    format!(
        "s{d}{}{d}{}{d}{}",
        escape(match_text),
        escape(replace_text),
        flags,
        d = delimiter
    )
}

fn markers() -> HighlightFormatter {
    HighlightFormatter::new(HighlightStyle::Markers)
}

// ============================================================================
// Property 1: Parsing is stable
// ============================================================================

proptest! {
    /// Escaped delimiters come back as literal text and re-serialization
    /// parses to the same expression
    #[test]
    fn prop_parse_serialize_is_stable(
        delimiter in prop::sample::select(vec!['/', '#', '|', ':', ',', '@']),
        match_text in "[a-z/#|:,@.]{0,12}",
        replace_text in "[a-z0-9/#|:,@.]{0,12}",
        flags in prop::sample::select(vec!["", "i", "g", "ig", "gi", "gg"]),
    ) {
        let expr = build_expression(delimiter, &match_text, &replace_text, flags);
        let parsed = parse_expression(&expr).unwrap();

        prop_assert_eq!(parsed.delimiter(), delimiter);
        prop_assert_eq!(parsed.match_text(), match_text.as_str());
        prop_assert_eq!(parsed.replace_text(), replace_text.as_str());
        prop_assert_eq!(parsed.case_insensitive(), flags.contains('i'));
        prop_assert_eq!(parsed.global(), flags.contains('g'));

        let serialized = parsed.to_expression();
        let reparsed = parse_expression(&serialized).unwrap();
        prop_assert_eq!(&reparsed, &parsed);
        prop_assert_eq!(reparsed.to_expression(), serialized);
    }

    /// Any flag other than i or g is rejected
    #[test]
    fn prop_unknown_flags_rejected(flag in "[a-fhj-z0-9A-Z]") {
        let expr = format!("s/a/b/{}", flag);
        let err = Engine::new(&expr).unwrap_err();
        prop_assert!(err.is_format());
    }
}

// ============================================================================
// Property 2: Substitution semantics
// ============================================================================

proptest! {
    /// Without g only the first match changes, with g every match changes
    #[test]
    fn prop_global_vs_first_only(text in "[ab]{0,30}") {
        let first = Engine::new("s/a/X/").unwrap();
        let global = Engine::new("s/a/X/g").unwrap();

        prop_assert_eq!(first.run(&text), text.replacen('a', "X", 1));
        prop_assert_eq!(global.run(&text), text.replace('a', "X"));
    }

    /// A pattern that cannot match leaves the name alone
    #[test]
    fn prop_no_match_is_identity(
        name in "[a-m._]{0,20}",
        pattern in "[n-z]{1,5}",
    ) {
        let engine = Engine::new(&format!("s/{}/REPLACED/g", pattern)).unwrap();
        prop_assert_eq!(engine.run(&name), name.clone());

        let (from, to) = engine.highlight(&name, &markers());
        prop_assert_eq!(&from, &name);
        prop_assert_eq!(&from, &to);
    }

    /// The i flag makes the match ignore case
    #[test]
    fn prop_case_insensitive(word in "[a-z]{1,8}", suffix in "[0-9]{0,4}") {
        let name = format!("{}{}", word.to_uppercase(), suffix);
        let sensitive = Engine::new(&format!("s/{}/x/", word)).unwrap();
        let insensitive = Engine::new(&format!("s/{}/x/i", word)).unwrap();

        prop_assert_eq!(sensitive.run(&name), name.clone());
        prop_assert_eq!(insensitive.run(&name), format!("x{}", suffix));
    }

    /// Swapping two groups and swapping back restores the name
    #[test]
    fn prop_group_swap_round_trip(left in "[a-z]{1,6}", right in "[0-9]{1,6}") {
        let swap = Engine::new("s/^([a-z]+)([0-9]+)$/$2$1/").unwrap();
        let unswap = Engine::new("s/^([0-9]+)([a-z]+)$/$2$1/").unwrap();

        let name = format!("{}{}", left, right);
        let swapped = swap.run(&name);
        prop_assert_eq!(&swapped, &format!("{}{}", right, left));
        prop_assert_eq!(unswap.run(&swapped), name);
    }
}

// ============================================================================
// Property 3: Highlight agrees with run
// ============================================================================

proptest! {
    /// Removing the emphasis from the highlighted destination gives run()
    #[test]
    fn prop_highlight_strips_to_run(
        name in "[a-z0-9._ ]{0,24}",
        expr in prop::sample::select(vec![
            "s/a/b/",
            "s/a/b/g",
            "s/[0-9]+/#/g",
            "s/(.)(.)/$2$1/",
            "s/\\./_/g",
            "s/x*/-/g",
            "s/^/new_/",
            "s/ +$//",
            "s/(a)|(e)/[$1$2]/g",
        ]),
    ) {
        let engine = Engine::new(expr).unwrap();
        let formatter = markers();
        let (from, to) = engine.highlight(&name, &formatter);

        prop_assert_eq!(formatter.strip(&to), engine.run(&name));
        prop_assert_eq!(formatter.strip(&from), name.clone());
        prop_assert_eq!(from == to, engine.run(&name) == name);
    }
}

proptest! {
    /// Names and replacements containing marker characters still strip back
    /// to exactly what run() produces
    #[test]
    fn prop_highlight_strips_marker_characters(
        name in r"[a-c\[\]{}+\- .\\]{0,20}",
        pattern in prop::sample::select(vec!["a", "b+", "c|a", "x*", "-", r"\[", r"\]", "^", r"\+\}"]),
        replacement in r"[ab\[\]{}+\-]{0,6}",
        global in any::<bool>(),
    ) {
        let expr = format!("s/{}/{}/{}", pattern, replacement, if global { "g" } else { "" });
        let engine = Engine::new(&expr).unwrap();
        let formatter = markers();
        let (from, to) = engine.highlight(&name, &formatter);

        prop_assert_eq!(formatter.strip(&to), engine.run(&name));
        prop_assert_eq!(formatter.strip(&from), name.clone());
        prop_assert_eq!(from == to, engine.run(&name) == name);
    }
}
