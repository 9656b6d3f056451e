//! Single-word resolution against the name store and the rule catalog.
//!
//! Rules are tried in [`Rule::PRIORITY`] order and the first one that matches
//! decides, even when its decision is "already correct".

use serde::Serialize;
use tracing::trace;

use crate::errors::StoreError;
use crate::gazetteer::{CapitalizationCheck, NameStore};
use crate::reason::Reason;
use crate::rules::{Category, RuleCatalog, CATALOG, DEITY_TRIGGERS};
use crate::tokenizer::{tokenize, Word};
use crate::utils::join_with_spaces;

/// Outcome of resolving one word.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub needs_correction: bool,
    pub correct_form: String,
    pub reason: Reason,
}

impl Decision {
    pub(crate) fn unchanged(word: &str) -> Self {
        Self {
            needs_correction: false,
            correct_form: word.to_owned(),
            reason: Reason::Correct,
        }
    }

    pub(crate) fn corrected(correct_form: String, reason: Reason) -> Self {
        Self {
            needs_correction: true,
            correct_form,
            reason,
        }
    }
}

/// The text surrounding a word, usually its whole sentence.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    words: Vec<Word<'a>>,
    /// Lowercased tokens joined with single spaces.
    lowercase: String,
}

impl<'a> Context<'a> {
    pub fn new(text: &'a str) -> Self {
        let words: Vec<Word> = tokenize(text).into_iter().map(Word::new).collect();
        let lowercase = join_with_spaces(words.iter().map(|word| word.original)).to_lowercase();
        Self { words, lowercase }
    }

    pub fn empty() -> Context<'static> {
        Context {
            words: Vec::new(),
            lowercase: String::new(),
        }
    }

    /// Whether `term` (lowercase) occurs anywhere in the context, inside
    /// longer words included.
    fn mentions(&self, term: &str) -> bool {
        self.lowercase.contains(term)
    }

    /// Whether the first occurrence of `word` is directly followed by a word
    /// starting with an uppercase letter.
    fn precedes_capitalized(&self, word: &str) -> bool {
        self.words
            .iter()
            .position(|candidate| candidate.core == word)
            .and_then(|index| self.words.get(index + 1))
            .and_then(|next| next.core.chars().next())
            .map_or(false, char::is_uppercase)
    }
}

/// One step of the resolution pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Geographic,
    Lexical(Category),
}

impl Rule {
    pub const PRIORITY: [Rule; 11] = [
        Rule::Geographic,
        Rule::Lexical(Category::Day),
        Rule::Lexical(Category::Month),
        Rule::Lexical(Category::Holiday),
        Rule::Lexical(Category::Language),
        Rule::Lexical(Category::MilitaryRank),
        Rule::Lexical(Category::Title),
        Rule::Lexical(Category::Religion),
        Rule::Lexical(Category::Deity),
        Rule::Lexical(Category::Season),
        // reserved: telling "went north" from "North America" needs more than a word list
        Rule::Lexical(Category::Direction),
    ];
}

pub struct WordResolver<'a, S: ?Sized> {
    store: &'a S,
    catalog: &'a RuleCatalog,
}

impl<'a, S: NameStore + ?Sized> WordResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_catalog(store, &CATALOG)
    }

    pub fn with_catalog(store: &'a S, catalog: &'a RuleCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Decide whether `word` needs a different capitalization.
    pub fn resolve(&self, word: &str, context: &Context) -> Result<Decision, StoreError> {
        let lowercase = word.to_lowercase();

        for &rule in Rule::PRIORITY.iter() {
            let decision = match rule {
                Rule::Geographic => self.geographic(word)?,
                Rule::Lexical(category) => self.lexical(category, word, &lowercase, context),
            };

            if let Some(decision) = decision {
                trace!(word, ?rule, reason = %decision.reason, "resolved word");
                return Ok(decision);
            }
        }

        Ok(Decision::unchanged(word))
    }

    fn geographic(&self, word: &str) -> Result<Option<Decision>, StoreError> {
        let decision = match self.store.check_capitalization(word)? {
            CapitalizationCheck::Unmatched => None,
            CapitalizationCheck::Matched { correct: true, .. } => Some(Decision::unchanged(word)),
            CapitalizationCheck::Matched { canonical, .. } => {
                Some(Decision::corrected(canonical, Reason::GeographicName))
            }
        };
        Ok(decision)
    }

    fn lexical(
        &self,
        category: Category,
        word: &str,
        lowercase: &str,
        context: &Context,
    ) -> Option<Decision> {
        let rule = self.catalog.category(category);

        let matched = match category {
            Category::Holiday => {
                rule.contains(lowercase) || rule.terms.iter().any(|term| context.mentions(term))
            }
            Category::MilitaryRank | Category::Title => {
                rule.contains(lowercase) && context.precedes_capitalized(word)
            }
            Category::Deity => rule.contains(lowercase) && DEITY_TRIGGERS.contains(&lowercase),
            _ => rule.contains(lowercase),
        };

        if !matched {
            return None;
        }

        let proposed = rule.transform.apply(word);
        if proposed == word {
            Some(Decision::unchanged(word))
        } else {
            Some(Decision::corrected(proposed, rule.reason))
        }
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
            country_code: Some("GB".to_owned()),
            population: 1000,
        }
    }

    fn store() -> Gazetteer {
        Gazetteer::from_records(vec![place(1, "New York"), place(2, "Paris"), place(3, "March")])
    }

    fn resolve(word: &str, context: &str) -> Decision {
        let store = store();
        WordResolver::new(&store)
            .resolve(word, &Context::new(context))
            .unwrap()
    }

    #[test]
    fn unknown_word_is_correct() {
        assert_eq!(resolve("york", ""), Decision::unchanged("york"));
    }

    #[test]
    fn days_are_capitalized() {
        assert_eq!(
            resolve("monday", ""),
            Decision::corrected("Monday".to_owned(), Reason::DayOfWeek)
        );
        assert_eq!(resolve("Monday", ""), Decision::unchanged("Monday"));
        assert_eq!(resolve("MONDAY", "").correct_form, "Monday");
    }

    #[test]
    fn geographic_names_take_precedence() {
        assert_eq!(
            resolve("march", ""),
            Decision::corrected("March".to_owned(), Reason::GeographicName)
        );
        assert_eq!(resolve("paris", "").reason, Reason::GeographicName);
    }

    #[test]
    fn correct_geographic_name_does_not_fall_through() {
        let decision = resolve("March", "");
        assert!(!decision.needs_correction);
        assert_eq!(decision.reason, Reason::Correct);
    }

    #[test]
    fn months_and_languages() {
        assert_eq!(resolve("january", "").reason, Reason::Month);
        assert_eq!(resolve("english", "").correct_form, "English");
        assert_eq!(resolve("english", "").reason, Reason::Language);
    }

    #[test]
    fn holiday_terms_are_title_cased() {
        assert_eq!(
            resolve("christmas", ""),
            Decision::corrected("Christmas".to_owned(), Reason::Holiday)
        );
    }

    #[test]
    fn holiday_in_context_title_cases_other_words() {
        let decision = resolve("celebrate", "we celebrate easter");
        assert_eq!(decision, Decision::corrected("Celebrate".to_owned(), Reason::Holiday));

        let decision = resolve("party", "a new year party");
        assert_eq!(decision.reason, Reason::Holiday);
    }

    #[test]
    fn holiday_terms_match_inside_longer_words() {
        assert_eq!(
            resolve("europe", "eastern europe"),
            Decision::corrected("Europe".to_owned(), Reason::Holiday)
        );
        assert_eq!(resolve("met", "we met on valentine's day").reason, Reason::Holiday);
        assert_eq!(resolve("gifts", "christmastime gifts").correct_form, "Gifts");
    }

    #[test]
    fn holiday_context_ignores_spacing() {
        assert_eq!(resolve("party", "a new   year party").reason, Reason::Holiday);
        assert!(!resolve("party", "a new, year party").needs_correction);
    }

    #[test]
    fn rank_before_name_is_capitalized() {
        assert_eq!(
            resolve("captain", "captain Smith arrived"),
            Decision::corrected("Captain".to_owned(), Reason::MilitaryRank)
        );
        assert!(!resolve("captain", "the captain arrived").needs_correction);
        assert!(!resolve("captain", "").needs_correction);
        assert!(!resolve("captain", "we met the captain").needs_correction);
    }

    #[test]
    fn title_before_name_is_capitalized() {
        assert_eq!(
            resolve("senator", "ask senator Jones, please"),
            Decision::corrected("Senator".to_owned(), Reason::Title)
        );
    }

    #[test]
    fn only_first_occurrence_is_considered() {
        let context = "the mayor said mayor Brown agreed";
        assert!(!resolve("mayor", context).needs_correction);
    }

    #[test]
    fn religions_and_deities() {
        assert_eq!(resolve("islam", "").reason, Reason::Religion);
        assert_eq!(
            resolve("god", ""),
            Decision::corrected("God".to_owned(), Reason::Deity)
        );
    }

    #[test]
    fn deity_terms_outside_the_trigger_list_are_inert() {
        let store = store();
        let catalog = RuleCatalog::builtin().with_terms(Category::Deity, &["zeus"]);
        let resolver = WordResolver::with_catalog(&store, &catalog);
        let decision = resolver.resolve("zeus", &Context::empty()).unwrap();
        assert_eq!(decision, Decision::unchanged("zeus"));
    }

    #[test]
    fn seasons_are_lowercased() {
        assert_eq!(
            resolve("Winter", ""),
            Decision::corrected("winter".to_owned(), Reason::Season)
        );
        assert!(!resolve("winter", "").needs_correction);
    }

    #[test]
    fn directions_are_left_alone() {
        assert_eq!(resolve("North", ""), Decision::unchanged("North"));
        assert_eq!(resolve("north", ""), Decision::unchanged("north"));
    }

    #[test]
    fn resolving_a_correction_again_changes_nothing() {
        for (word, context) in &[
            ("monday", ""),
            ("paris", ""),
            ("captain", "captain Smith"),
            ("Summer", ""),
            ("we", "we love christmas"),
        ] {
            let first = resolve(word, context);
            let second = resolve(&first.correct_form, context);
            assert!(!second.needs_correction, "{} -> {:?}", word, second);
        }
    }

    #[test]
    fn priority_order_is_fixed() {
        assert_eq!(Rule::PRIORITY[0], Rule::Geographic);
        assert_eq!(
            Rule::PRIORITY.last(),
            Some(&Rule::Lexical(Category::Direction))
        );
    }

    struct Offline;

    impl NameStore for Offline {
        fn lookup(&self, _name: &str) -> Result<Option<GeographicRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_owned()))
        }
    }

    #[test]
    fn store_failures_propagate() {
        let resolver = WordResolver::new(&Offline);
        let result = resolver.resolve("monday", &Context::empty());
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
