//! Property tests: formatting formatted output is a no-op.
//!
//! Sources are generated from the token classes the reformatter distinguishes
//! (`{ } ( ) ; ,`, identifiers, numbers) joined by arbitrary whitespace.

use mingo_editor_core::format;
use proptest::prelude::*;

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(";".to_string()),
        Just(",".to_string()),
        prop::string::string_regex("[a-z_][a-z0-9_]{0,6}").unwrap(),
        prop::string::string_regex("[0-9]{1,4}").unwrap(),
    ]
}

fn separator_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        3 => Just(" ".to_string()),
        1 => Just("\n".to_string()),
        1 => Just("\t".to_string()),
        1 => Just("  \n\n  ".to_string()),
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((token_strategy(), separator_strategy()), 0..60).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(token, sep)| format!("{token}{sep}"))
            .collect::<String>()
    })
}

proptest! {
    #[test]
    fn format_is_idempotent(source in source_strategy()) {
        let once = format(&source);
        let twice = format(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn format_output_has_no_tabs_or_trailing_spaces(source in source_strategy()) {
        let formatted = format(&source);
        prop_assert!(!formatted.contains('\t'));
        for line in formatted.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
    }
}
