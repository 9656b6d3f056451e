//! Static lexical rule categories.
//!
//! Each category is a set of lowercase terms sharing one capitalization
//! transform. The built-in catalog is built once and never changes; custom
//! catalogs are new values, not edits to the shared one.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::reason::Reason;
use crate::utils::{capitalize, title_case};

lazy_static! {
    /// The built-in rule catalog shared by the whole process.
    pub static ref CATALOG: RuleCatalog = RuleCatalog::builtin();
}

/// Deity terms that actually get capitalized. Other terms in the deity
/// category are recognized but left alone.
pub const DEITY_TRIGGERS: &[&str] = &["god", "allah", "jesus", "christ", "buddha"];

/// Generic geographic nouns. They belong to a name only when they follow
/// another word, as in `Mississippi River`.
pub const GENERIC_TERMS: &[&str] = &[
    "river", "lake", "ocean", "sea", "bay", "gulf", "mountain", "mount", "hill", "valley", "peak",
    "street", "road", "avenue", "boulevard", "drive", "city", "town", "village", "island",
    "peninsula", "desert", "forest", "park",
];

/// Directions and position words that stay lowercase unless they start a
/// known region name, as in `Central America`.
pub const REGION_DESCRIPTORS: &[&str] = &[
    "north", "south", "east", "west", "northern", "southern", "eastern", "western", "northeast",
    "northwest", "southeast", "southwest", "northeastern", "northwestern", "southeastern",
    "southwestern", "central", "upper", "lower", "middle",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Day,
    Month,
    Holiday,
    Language,
    MilitaryRank,
    Title,
    Religion,
    Deity,
    Season,
    Direction,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Day,
        Category::Month,
        Category::Holiday,
        Category::Language,
        Category::MilitaryRank,
        Category::Title,
        Category::Religion,
        Category::Deity,
        Category::Season,
        Category::Direction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Day => "days",
            Category::Month => "months",
            Category::Holiday => "holidays",
            Category::Language => "languages",
            Category::MilitaryRank => "military_ranks",
            Category::Title => "titles",
            Category::Religion => "religions",
            Category::Deity => "deities",
            Category::Season => "seasons",
            Category::Direction => "directions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    CapitalizeFirst,
    TitleCase,
    Lowercase,
    /// Reserved: recognized, never rewritten.
    Keep,
}

impl Transform {
    pub fn apply(self, word: &str) -> String {
        match self {
            Transform::CapitalizeFirst => capitalize(word),
            Transform::TitleCase => title_case(word),
            Transform::Lowercase => word.to_lowercase(),
            Transform::Keep => word.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleCategory {
    pub category: Category,
    pub terms: HashSet<String>,
    pub transform: Transform,
    pub reason: Reason,
}

impl RuleCategory {
    fn new(category: Category, terms: &[&str], transform: Transform, reason: Reason) -> Self {
        Self {
            category,
            terms: terms.iter().map(|term| (*term).to_owned()).collect(),
            transform,
            reason,
        }
    }

    /// `lowercase` must already be lowercased.
    pub fn contains(&self, lowercase: &str) -> bool {
        self.terms.contains(lowercase)
    }

    /// Terms of this category that must stay lowercase in running text.
    pub fn keeps_lowercase(&self) -> bool {
        matches!(self.transform, Transform::Lowercase | Transform::Keep)
    }
}

#[derive(Debug, Clone)]
pub struct RuleCatalog {
    categories: Vec<RuleCategory>,
}

impl RuleCatalog {
    pub fn builtin() -> Self {
        use Category::*;
        use Transform::*;

        let categories = vec![
            RuleCategory::new(
                Day,
                &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
                CapitalizeFirst,
                Reason::DayOfWeek,
            ),
            RuleCategory::new(
                Month,
                &[
                    "january", "february", "march", "april", "may", "june", "july", "august",
                    "september", "october", "november", "december",
                ],
                CapitalizeFirst,
                Reason::Month,
            ),
            RuleCategory::new(
                Holiday,
                &[
                    "christmas", "easter", "thanksgiving", "halloween", "valentine",
                    "independence day", "new year",
                ],
                TitleCase,
                Reason::Holiday,
            ),
            RuleCategory::new(
                Language,
                &[
                    "english", "spanish", "french", "german", "italian", "chinese", "japanese",
                    "russian", "arabic",
                ],
                CapitalizeFirst,
                Reason::Language,
            ),
            RuleCategory::new(
                MilitaryRank,
                &[
                    "captain", "colonel", "general", "lieutenant", "sergeant", "major",
                    "admiral", "commander",
                ],
                CapitalizeFirst,
                Reason::MilitaryRank,
            ),
            RuleCategory::new(
                Title,
                &[
                    "president", "senator", "governor", "mayor", "doctor", "professor", "judge",
                    "reverend",
                ],
                CapitalizeFirst,
                Reason::Title,
            ),
            RuleCategory::new(
                Religion,
                &["christianity", "islam", "judaism", "buddhism", "hinduism"],
                CapitalizeFirst,
                Reason::Religion,
            ),
            RuleCategory::new(
                Deity,
                &["god", "allah", "buddha", "jesus", "christ"],
                CapitalizeFirst,
                Reason::Deity,
            ),
            RuleCategory::new(
                Season,
                &["spring", "summer", "fall", "autumn", "winter"],
                Lowercase,
                Reason::Season,
            ),
            RuleCategory::new(
                Direction,
                &[
                    "north", "south", "east", "west", "northern", "southern", "eastern",
                    "western",
                ],
                Keep,
                Reason::Correct,
            ),
        ];

        Self { categories }
    }

    /// A new catalog with `terms` added to `category`.
    pub fn with_terms<I, T>(mut self, category: Category, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.categories[category as usize]
            .terms
            .extend(terms.into_iter().map(|term| term.as_ref().to_lowercase()));
        self
    }

    pub fn category(&self, category: Category) -> &RuleCategory {
        // categories are stored in declaration order
        &self.categories[category as usize]
    }

    pub fn categories(&self) -> impl Iterator<Item = &RuleCategory> {
        self.categories.iter()
    }

    /// Categories whose terms must stay lowercase.
    pub fn lowercase_terms(&self) -> impl Iterator<Item = &RuleCategory> {
        self.categories.iter().filter(|rule| rule.keeps_lowercase())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every category `word` belongs to, in catalog order.
    pub fn classify(&self, word: &str) -> Vec<Category> {
        let lowercase = word.to_lowercase();
        self.categories
            .iter()
            .filter(|rule| rule.contains(&lowercase))
            .map(|rule| rule.category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_category() {
        assert_eq!(CATALOG.len(), Category::ALL.len());
        for category in Category::ALL.iter() {
            assert_eq!(CATALOG.category(*category).category, *category);
        }
    }

    #[test]
    fn seasons_and_directions_stay_lowercase() {
        let lowercase: Vec<_> = CATALOG.lowercase_terms().map(|rule| rule.category).collect();
        assert_eq!(lowercase, vec![Category::Season, Category::Direction]);
    }

    #[test]
    fn words_can_belong_to_several_categories() {
        assert_eq!(CATALOG.classify("May"), vec![Category::Month]);
        assert_eq!(CATALOG.classify("general"), vec![Category::MilitaryRank]);
        assert_eq!(CATALOG.classify("buddha"), vec![Category::Deity]);
        assert!(CATALOG.classify("table").is_empty());
    }

    #[test]
    fn transforms() {
        assert_eq!(Transform::CapitalizeFirst.apply("monday"), "Monday");
        assert_eq!(Transform::TitleCase.apply("new year"), "New Year");
        assert_eq!(Transform::Lowercase.apply("Winter"), "winter");
        assert_eq!(Transform::Keep.apply("North"), "North");
    }

    #[test]
    fn with_terms_builds_a_new_catalog() {
        let custom = RuleCatalog::builtin().with_terms(Category::Deity, &["Zeus"]);
        assert!(custom.category(Category::Deity).contains("zeus"));
        assert!(!CATALOG.category(Category::Deity).contains("zeus"));
    }
}
