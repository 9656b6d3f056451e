use tracing::warn;

use crate::scanner::Correction;
use crate::tokenizer::{tokenize, Word};
use crate::utils::join_with_spaces;

/// Apply corrections to `sentence`, rightmost first.
///
/// The sentence is re-joined with single spaces, so runs of whitespace between
/// tokens collapse. Punctuation around a corrected span is kept. A correction
/// whose span no longer matches the sentence is skipped.
pub fn apply(sentence: &str, corrections: &[Correction]) -> String {
    let mut tokens: Vec<String> = tokenize(sentence).into_iter().map(str::to_owned).collect();

    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by(|a, b| b.position.cmp(&a.position));

    for correction in ordered {
        let end = correction.position + correction.length;
        if correction.length == 0 || end > tokens.len() {
            warn!(
                position = correction.position,
                length = correction.length,
                "correction is out of range, skipping"
            );
            continue;
        }

        let joined = join_with_spaces(tokens[correction.position..end].iter());
        let span = Word::new(&joined);
        if span.core != correction.original {
            warn!(
                expected = %correction.original,
                found = %span.core,
                "correction doesn't match sentence, skipping"
            );
            continue;
        }

        let replacement = span.with_core(&correction.correct);
        tokens.drain(correction.position + 1..end);
        tokens[correction.position] = replacement;
    }

    join_with_spaces(tokens.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Reason;

    fn correction(position: usize, length: usize, original: &str, correct: &str) -> Correction {
        Correction {
            position,
            length,
            original: original.to_owned(),
            correct: correct.to_owned(),
            reason: Reason::GeographicName,
        }
    }

    #[test]
    fn no_corrections_normalizes_spacing() {
        assert_eq!(apply("  a   b\tc ", &[]), "a b c");
        assert_eq!(apply("", &[]), "");
    }

    #[test]
    fn multi_word_spans_are_replaced_whole() {
        let corrections = vec![
            correction(2, 2, "new york", "New York"),
            correction(5, 1, "monday", "Monday"),
        ];
        assert_eq!(
            apply("I visited new york on monday.", &corrections),
            "I visited New York on Monday."
        );
    }

    #[test]
    fn order_of_corrections_does_not_matter() {
        let corrections = vec![
            correction(4, 1, "monday", "Monday"),
            correction(0, 3, "salt lake city", "Salt Lake City"),
        ];
        assert_eq!(
            apply("salt lake city, on monday", &corrections),
            "Salt Lake City, on Monday"
        );
    }

    #[test]
    fn punctuation_is_kept_around_spans() {
        let corrections = vec![correction(0, 2, "new york", "New York")];
        assert_eq!(apply("(new york)!", &corrections), "(New York)!");
    }

    #[test]
    fn stale_corrections_are_skipped() {
        let corrections = vec![
            correction(0, 1, "paris", "Paris"),
            correction(7, 1, "rome", "Rome"),
        ];
        assert_eq!(apply("london calling", &corrections), "london calling");
    }
}
