//! Property-based tests for the conversion pipeline
//!
//! Sources are generated line by line with depths that never grow by more
//! than one level, using symbols, quoted strings (with parens, commas and fold
//! markers inside), explicit paren groups and fold operators.

use cirru_lisp::{convert, format_document, parse, ErrorKind, IndentationError, Options};
use proptest::prelude::*;

/// Generate a single item of a line
fn item_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Bare symbols
        "[a-z][a-z0-9-]{0,4}",
        // Strings that would mean something outside quotes
        "[a-z (),$]{0,6}".prop_map(|s| format!("\"{}\"", s)),
        // Explicit groups
        ("[a-z]{1,3}", "[a-z]{1,3}").prop_map(|(a, b)| format!("({} {})", a, b)),
        Just("()".to_string()),
        Just("$".to_string()),
    ]
}

fn line_content_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(item_strategy(), 1..5).prop_map(|items| items.join(" "))
}

/// Generate (depth, content) lines where depth grows at most one level per line
fn lines_strategy() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec((any::<bool>(), 0usize..8, line_content_strategy()), 1..12).prop_map(
        |lines| {
            let mut depth = 0;
            lines
                .into_iter()
                .enumerate()
                .map(|(i, (indent, back, content))| {
                    if i > 0 {
                        depth = if indent { depth + 1 } else { back % (depth + 1) };
                    }
                    (depth, content)
                })
                .collect()
        },
    )
}

fn render(lines: &[(usize, String)]) -> String {
    lines
        .iter()
        .map(|(depth, content)| format!("{}{}", "  ".repeat(*depth), content))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn printed_output_reparses_to_same_shape(lines in lines_strategy()) {
        let source = render(&lines);
        let first = parse(&source).unwrap();
        let printed = convert(&source).unwrap();
        let second = parse(&printed).unwrap();
        prop_assert!(
            first.same_shape(&second),
            "source:\n{}\nprinted:\n{}",
            source,
            printed
        );
        prop_assert_eq!(convert(&printed).unwrap(), printed);
    }

    #[test]
    fn cirru_text_reparses_to_same_shape(lines in lines_strategy()) {
        let first = parse(&render(&lines)).unwrap();
        let text = format_document(&first, &Options::default()).unwrap();
        let second = parse(&text).unwrap();
        prop_assert!(first.same_shape(&second), "text:\n{}", text);
    }

    #[test]
    fn monotonic_indentation_always_parses(lines in lines_strategy()) {
        let source = render(&lines);
        prop_assert!(parse(&source).is_ok());
    }

    #[test]
    fn skipping_a_level_always_fails(
        lines in lines_strategy(),
        at in any::<prop::sample::Index>(),
        extra in 2usize..4,
    ) {
        let mut lines = lines;
        let index = at.index(lines.len());
        let previous = if index == 0 { None } else { Some(lines[index - 1].0) };
        let expected = previous.map_or(0, |depth| depth + 1);
        let found = previous.map_or(extra - 1, |depth| depth + extra);
        lines[index].0 = found;

        let err = parse(&render(&lines)).unwrap_err();
        prop_assert_eq!(err.line(), index + 1);
        prop_assert_eq!(
            err.kind,
            ErrorKind::Indentation(IndentationError::SkippedLevel { expected, found })
        );
    }
}
