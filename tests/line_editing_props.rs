//! Property-based invariant tests for input line assembly.
//!
//! Verifies, for arbitrary raw keystroke streams:
//! 1. The buffer always matches a naive stack model of the same stream
//! 2. Completed lines are never empty
//! 3. A line terminator always leaves the buffer empty
//! 4. Backspace on an empty buffer never produces state or panics
//! 5. Feeding never panics, whatever the character soup

use chatloop::LineBuffer;
use proptest::prelude::*;

/// One unit of raw input, as the input surface delivers them.
#[derive(Debug, Clone)]
enum Stroke {
    Char(char),
    Delete,
    Terminator,
}

fn arb_stroke() -> impl Strategy<Value = Stroke> {
    prop_oneof![
        // Printable ASCII keeps the naive model honest (one char = one
        // grapheme); grapheme clusters get their own unit tests.
        (32u8..=126).prop_map(|b| Stroke::Char(b as char)),
        Just(Stroke::Delete),
        Just(Stroke::Terminator),
    ]
}

proptest! {
    #[test]
    fn buffer_matches_naive_model(strokes in proptest::collection::vec(arb_stroke(), 0..200)) {
        let mut buffer = LineBuffer::new();
        let mut model: Vec<char> = Vec::new();
        let mut completed: Vec<String> = Vec::new();

        for stroke in &strokes {
            match stroke {
                Stroke::Char(c) => {
                    prop_assert!(buffer.feed(*c).is_none());
                    model.push(*c);
                }
                Stroke::Delete => {
                    prop_assert!(buffer.feed('\u{7f}').is_none(), "delete must not complete a line");
                    model.pop();
                }
                Stroke::Terminator => {
                    let line = buffer.feed('\n');
                    if model.is_empty() {
                        prop_assert!(line.is_none());
                    } else {
                        let expected: String = model.iter().collect();
                        prop_assert_eq!(line.as_deref(), Some(expected.as_str()));
                        completed.extend(line);
                    }
                    model.clear();
                }
            }
            prop_assert_eq!(buffer.as_str(), model.iter().collect::<String>());
        }

        // No completed line is ever empty.
        prop_assert!(completed.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn terminator_always_empties_buffer(body in "[ -~]{0,80}") {
        let mut buffer = LineBuffer::new();
        for c in body.chars() {
            buffer.feed(c);
        }
        let _ = buffer.feed('\n');
        prop_assert!(buffer.is_empty());
    }

    #[test]
    fn delete_storm_never_panics(n in 0usize..64) {
        let mut buffer = LineBuffer::new();
        for _ in 0..n {
            buffer.feed('\u{7f}');
            buffer.feed('\u{8}');
        }
        prop_assert!(buffer.is_empty());
        prop_assert_eq!(buffer.feed('\n'), None);
    }
}
