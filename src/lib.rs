//! `geocase` checks and restores the capitalization of words and phrases in
//! free text.
//!
//! It relies on two sources of knowledge: a gazetteer of geographic names
//! (for example a [GeoNames](https://www.geonames.org/) dump), and a small
//! catalog of lexical rules covering days, months, holidays, languages,
//! ranks and titles, religions, deities and seasons.
//!
//! # Usage
//!
//! ```
//! use geocase::{Capitalizer, FeatureClass, Gazetteer, GeographicRecord};
//!
//! let gazetteer = Gazetteer::from_records(vec![GeographicRecord {
//!     geonameid: 5128581,
//!     name: "New York".to_owned(),
//!     asciiname: "New York".to_owned(),
//!     feature_class: Some(FeatureClass::PopulatedPlace),
//!     feature_code: "PPL".to_owned(),
//!     country_code: Some("US".to_owned()),
//!     population: 8175133,
//! }]);
//!
//! let capitalizer = Capitalizer::new(gazetteer);
//! let result = capitalizer.analyze("I visited new york on monday.")?;
//!
//! assert_eq!(result.corrected_text, "I visited New York on Monday.");
//! assert_eq!(result.total_corrections, 2);
//! # Ok::<(), geocase::StoreError>(())
//! ```
//!
//! A gazetteer can also be read from a GeoNames dump with
//! [`Gazetteer::load_geonames_dump`], and saved into a compact JSON snapshot
//! with [`Gazetteer::save_to_file`] for quicker loading later.
//!
//! # How text is checked
//!
//! Text is split into sentences on `.`, `!` or `?` followed by whitespace.
//! Within a sentence, at every token the longest known geographic name (three
//! words, then two) wins; otherwise the single word goes through the rules in
//! [`Rule::PRIORITY`] order and the first one that matches decides. Corrected
//! sentences are re-joined with single spaces; sentences with nothing to
//! correct are left exactly as they were.

mod capitalizer;
mod errors;
mod gazetteer;
pub mod input;
mod reason;
mod report;
mod resolver;
pub mod rewriter;
mod rules;
mod scanner;
mod tokenizer;
mod utils;

pub use crate::capitalizer::Capitalizer;
pub use crate::errors::{GazetteerLoadingError, GazetteerSavingError, InputError, StoreError};
pub use crate::gazetteer::{
    CapitalizationCheck, FeatureClass, Gazetteer, GeographicRecord, NameMismatch, NameStore,
};
pub use crate::reason::Reason;
pub use crate::report::{AnalysisResult, Change, WordCheck};
pub use crate::resolver::{Context, Decision, Rule, WordResolver};
pub use crate::rules::{
    Category, RuleCatalog, RuleCategory, Transform, CATALOG, DEITY_TRIGGERS, GENERIC_TERMS,
    REGION_DESCRIPTORS,
};
pub use crate::scanner::{Correction, PhraseScanner};
