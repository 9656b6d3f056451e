use serde::Serialize;
use tracing::debug;

use crate::errors::StoreError;
use crate::gazetteer::{CapitalizationCheck, NameStore};
use crate::reason::Reason;
use crate::resolver::{Context, WordResolver};
use crate::tokenizer::{tokenize, Word};
use crate::utils::join_with_spaces;

/// Longest geographic span tried first, in tokens.
const MAX_SPAN: usize = 3;

/// One proposed edit within a sentence.
///
/// `position` and `length` are token indexes into the whitespace-split
/// sentence; `original` and `correct` exclude the punctuation around the span.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub position: usize,
    pub length: usize,
    pub original: String,
    pub correct: String,
    pub reason: Reason,
}

/// Finds non-overlapping corrections in a sentence, preferring the longest
/// geographic name at every position.
pub struct PhraseScanner<'a, S: ?Sized> {
    resolver: WordResolver<'a, S>,
}

impl<'a, S: NameStore + ?Sized> PhraseScanner<'a, S> {
    pub fn new(resolver: WordResolver<'a, S>) -> Self {
        Self { resolver }
    }

    pub fn scan(&self, sentence: &str) -> Result<Vec<Correction>, StoreError> {
        let tokens = tokenize(sentence);
        let context = Context::new(sentence);
        let mut corrections = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            if let Some((length, correction)) = self.longest_span(&tokens, index)? {
                corrections.extend(correction);
                index += length;
                continue;
            }

            let word = Word::new(tokens[index]);
            if word.is_meaningful() {
                let decision = self.resolver.resolve(word.core, &context)?;
                if decision.needs_correction {
                    corrections.push(Correction {
                        position: index,
                        length: 1,
                        original: word.core.to_owned(),
                        correct: decision.correct_form,
                        reason: decision.reason,
                    });
                }
            }
            index += 1;
        }

        for correction in &corrections {
            debug!(
                position = correction.position,
                original = %correction.original,
                correct = %correction.correct,
                reason = %correction.reason,
                "found correction"
            );
        }

        Ok(corrections)
    }

    /// The longest known multi-word name starting at `start`, with a
    /// correction if it is miscapitalized. A correctly capitalized name still
    /// claims its tokens.
    fn longest_span(
        &self,
        tokens: &[&str],
        start: usize,
    ) -> Result<Option<(usize, Option<Correction>)>, StoreError> {
        for length in (2..=MAX_SPAN).rev() {
            if start + length > tokens.len() {
                continue;
            }

            // a span must begin and end on a word, or its core covers fewer tokens
            let window = &tokens[start..start + length];
            if !Word::new(window[0]).is_meaningful()
                || !Word::new(window[length - 1]).is_meaningful()
            {
                continue;
            }

            let joined = join_with_spaces(window.iter());
            let span = Word::new(&joined);

            match self.resolver.store().check_capitalization(span.core)? {
                CapitalizationCheck::Unmatched => continue,
                CapitalizationCheck::Matched { correct: true, .. } => {
                    return Ok(Some((length, None)));
                }
                CapitalizationCheck::Matched { canonical, .. } => {
                    let correction = Correction {
                        position: start,
                        length,
                        original: span.core.to_owned(),
                        correct: canonical,
                        reason: Reason::geographic_span(length),
                    };
                    return Ok(Some((length, Some(correction))));
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::{FeatureClass, Gazetteer, GeographicRecord};

    fn place(id: u64, name: &str) -> GeographicRecord {
        GeographicRecord {
            geonameid: id,
            name: name.to_owned(),
            asciiname: name.to_owned(),
            feature_class: Some(FeatureClass::PopulatedPlace),
            feature_code: "PPL".to_owned(),
            country_code: Some("US".to_owned()),
            population: 1000,
        }
    }

    fn store() -> Gazetteer {
        Gazetteer::from_records(vec![
            place(1, "New York"),
            place(2, "York"),
            place(3, "Salt Lake City"),
            place(4, "Salt Lake"),
            place(5, "Lake City"),
            place(6, "Paris"),
        ])
    }

    fn scan(sentence: &str) -> Vec<Correction> {
        let store = store();
        PhraseScanner::new(WordResolver::new(&store))
            .scan(sentence)
            .unwrap()
    }

    #[test]
    fn two_word_names_are_found() {
        assert_eq!(
            scan("new york"),
            vec![Correction {
                position: 0,
                length: 2,
                original: "new york".to_owned(),
                correct: "New York".to_owned(),
                reason: Reason::GeographicTwoWords,
            }]
        );
    }

    #[test]
    fn longest_match_wins() {
        let corrections = scan("we drove to salt lake city today");
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].position, 3);
        assert_eq!(corrections[0].length, 3);
        assert_eq!(corrections[0].correct, "Salt Lake City");
        assert_eq!(corrections[0].reason, Reason::GeographicThreeWords);
    }

    #[test]
    fn spans_do_not_overlap() {
        // "york" alone is also a place, but it belongs to the two-word match
        let corrections = scan("new york and york");
        assert_eq!(corrections.len(), 2);
        assert_eq!((corrections[0].position, corrections[0].length), (0, 2));
        assert_eq!((corrections[1].position, corrections[1].length), (3, 1));
        assert_eq!(corrections[1].reason, Reason::GeographicName);
    }

    #[test]
    fn correct_spans_claim_their_tokens() {
        assert!(scan("Salt Lake City is big").is_empty());
        assert!(scan("I love New York").is_empty());
    }

    #[test]
    fn punctuation_around_spans_is_ignored_for_lookup() {
        let corrections = scan("(new york), on monday.");
        assert_eq!(corrections.len(), 2);
        assert_eq!(corrections[0].original, "new york");
        assert_eq!(corrections[1].original, "monday");
        assert_eq!(corrections[1].correct, "Monday");
        assert_eq!(corrections[1].position, 3);
    }

    #[test]
    fn single_words_use_the_sentence_as_context() {
        let corrections = scan("we met captain Smith in paris");
        let reasons: Vec<_> = corrections.iter().map(|c| c.reason).collect();
        assert_eq!(reasons, vec![Reason::MilitaryRank, Reason::GeographicName]);
    }

    #[test]
    fn punctuation_tokens_do_not_count_as_words() {
        let corrections = scan("we saw paris .");
        assert_eq!(corrections.len(), 1);
        assert_eq!((corrections[0].position, corrections[0].length), (2, 1));
        assert_eq!(corrections[0].reason, Reason::GeographicName);

        let corrections = scan("we saw ( paris )");
        assert_eq!(corrections.len(), 1);
        assert_eq!((corrections[0].position, corrections[0].length), (3, 1));
        assert_eq!(corrections[0].reason, Reason::GeographicName);

        let corrections = scan("- new york");
        assert_eq!((corrections[0].position, corrections[0].length), (1, 2));
        assert_eq!(corrections[0].reason, Reason::GeographicTwoWords);
    }

    #[test]
    fn empty_sentence_has_no_corrections() {
        assert!(scan("").is_empty());
        assert!(scan("   ").is_empty());
        assert!(scan("-- !").is_empty());
    }
}
