use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{GazetteerLoadingError, GazetteerSavingError, StoreError};
use crate::rules::{GENERIC_TERMS, REGION_DESCRIPTORS};
use crate::utils::{capitalize, group_thousands, join_with_spaces};

lazy_static! {
    /// Runs of capitalized words, e.g. `Salt Lake City`.
    static ref CAPITALIZED_RUN: Regex = Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap();
}

/// GeoNames feature classes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureClass {
    #[serde(rename = "A")]
    Administrative,
    #[serde(rename = "H")]
    Hydrographic,
    #[serde(rename = "L")]
    Area,
    #[serde(rename = "P")]
    PopulatedPlace,
    #[serde(rename = "R")]
    RoadRailroad,
    #[serde(rename = "S")]
    Spot,
    #[serde(rename = "T")]
    Hypsographic,
    #[serde(rename = "U")]
    Undersea,
    #[serde(rename = "V")]
    Vegetation,
}

impl FeatureClass {
    pub fn from_code(code: &str) -> Option<Self> {
        let class = match code {
            "A" => FeatureClass::Administrative,
            "H" => FeatureClass::Hydrographic,
            "L" => FeatureClass::Area,
            "P" => FeatureClass::PopulatedPlace,
            "R" => FeatureClass::RoadRailroad,
            "S" => FeatureClass::Spot,
            "T" => FeatureClass::Hypsographic,
            "U" => FeatureClass::Undersea,
            "V" => FeatureClass::Vegetation,
            _ => return None,
        };
        Some(class)
    }

    pub fn label(self) -> &'static str {
        match self {
            FeatureClass::Administrative => "Administrative",
            FeatureClass::Hydrographic => "Hydrographic",
            FeatureClass::Area => "Area",
            FeatureClass::PopulatedPlace => "Populated place",
            FeatureClass::RoadRailroad => "Road/Railroad",
            FeatureClass::Spot => "Spot",
            FeatureClass::Hypsographic => "Hypsographic",
            FeatureClass::Undersea => "Undersea",
            FeatureClass::Vegetation => "Vegetation",
        }
    }
}

/// One named place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeographicRecord {
    pub geonameid: u64,
    pub name: String,
    pub asciiname: String,
    pub feature_class: Option<FeatureClass>,
    #[serde(default)]
    pub feature_code: String,
    pub country_code: Option<String>,
    #[serde(default)]
    pub population: u64,
}

impl GeographicRecord {
    /// Human-readable summary, e.g. `Paris (Populated place) in FR, population: 2,138,551`.
    pub fn describe(&self) -> String {
        let class = self.feature_class.map_or("Unknown", FeatureClass::label);
        let mut description = format!("{} ({})", self.name, class);
        if let Some(country) = &self.country_code {
            description.push_str(" in ");
            description.push_str(country);
        }
        if self.population > 0 {
            description.push_str(", population: ");
            description.push_str(&group_thousands(self.population));
        }
        description
    }

    /// Parse one line of a GeoNames tab-separated dump.
    fn from_dump_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.trim_end_matches(&['\r', '\n'][..]).split('\t').collect();
        if fields.len() < 19 {
            return None;
        }

        let geonameid = fields[0].parse().ok()?;
        let population = if fields[14].is_empty() {
            0
        } else {
            fields[14].parse().ok()?
        };
        let country_code = Some(fields[8])
            .filter(|code| !code.is_empty())
            .map(str::to_owned);

        Some(Self {
            geonameid,
            name: fields[1].to_owned(),
            asciiname: fields[2].to_owned(),
            feature_class: FeatureClass::from_code(fields[6]),
            feature_code: fields[7].to_owned(),
            country_code,
            population,
        })
    }
}

/// Result of checking a piece of text against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapitalizationCheck {
    /// Not a known geographic name.
    Unmatched,
    /// A known name; `correct` tells whether the text already equals `canonical`.
    Matched { correct: bool, canonical: String },
}

/// A capitalized run of words whose stored form is spelled differently.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NameMismatch {
    pub found: String,
    pub correct_form: String,
    /// Byte offset of `found` in the checked text.
    pub offset: usize,
}

/// Lookup from a geographic name to its authoritative record.
///
/// Implementations try an exact match first and fall back to a
/// case-insensitive one. When several records match, the most populous one
/// wins, ties going to the lowest identifier.
pub trait NameStore {
    fn lookup(&self, name: &str) -> Result<Option<GeographicRecord>, StoreError>;

    fn is_known(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.lookup(name)?.is_some())
    }

    fn canonical_form(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lookup(name)?.map(|record| record.name))
    }

    fn check_capitalization(&self, text: &str) -> Result<CapitalizationCheck, StoreError> {
        let check = match self.canonical_form(text)? {
            None => CapitalizationCheck::Unmatched,
            Some(canonical) => CapitalizationCheck::Matched {
                correct: text == canonical,
                canonical,
            },
        };
        Ok(check)
    }

    /// Find runs of capitalized words in `text` that are known names with a
    /// different canonical capitalization, such as `Mcdonald` for `McDonald`.
    ///
    /// Lowercase names are not found here; see
    /// [`Capitalizer::analyze`](crate::Capitalizer::analyze) for those.
    fn find_miscapitalized(&self, text: &str) -> Result<Vec<NameMismatch>, StoreError> {
        let mut mismatches = Vec::new();
        for mat in CAPITALIZED_RUN.find_iter(text) {
            if let CapitalizationCheck::Matched {
                correct: false,
                canonical,
            } = self.check_capitalization(mat.as_str())?
            {
                mismatches.push(NameMismatch {
                    found: mat.as_str().to_owned(),
                    correct_form: canonical,
                    offset: mat.start(),
                });
            }
        }
        Ok(mismatches)
    }

    /// Capitalize a phrase as a place name.
    ///
    /// A direction or position word starting a known name makes the rest of
    /// the phrase take that name's form; otherwise it stays lowercase. Generic
    /// nouns are capitalized after the first word only. Other words take
    /// their stored form, or get their first letter capitalized.
    fn format_place_name(&self, phrase: &str) -> Result<String, StoreError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let mut result = Vec::with_capacity(words.len());

        for (index, word) in words.iter().enumerate() {
            let lowercase = word.to_lowercase();

            if REGION_DESCRIPTORS.contains(&lowercase.as_str()) {
                if index + 1 < words.len() {
                    let rest = join_with_spaces(words[index..].iter());
                    if let Some(canonical) = self.canonical_form(&rest)? {
                        result.push(canonical);
                        break;
                    }
                }
                result.push(lowercase);
            } else if GENERIC_TERMS.contains(&lowercase.as_str()) {
                result.push(if index > 0 { capitalize(word) } else { lowercase });
            } else {
                match self.canonical_form(word)? {
                    Some(canonical) => result.push(canonical),
                    None => result.push(capitalize(word)),
                }
            }
        }

        Ok(join_with_spaces(result.iter()))
    }
}

impl<S: NameStore + ?Sized> NameStore for &S {
    fn lookup(&self, name: &str) -> Result<Option<GeographicRecord>, StoreError> {
        (**self).lookup(name)
    }
}

impl<S: NameStore + ?Sized> NameStore for Arc<S> {
    fn lookup(&self, name: &str) -> Result<Option<GeographicRecord>, StoreError> {
        (**self).lookup(name)
    }
}

/// In-memory name store.
///
/// Built once from a set of records and read-only afterwards, so it can be
/// shared between threads freely.
#[derive(Debug, Default)]
pub struct Gazetteer {
    records: IndexMap<u64, GeographicRecord>,
    exact: HashMap<String, Vec<u64>>,
    folded: HashMap<String, Vec<u64>>,
}

impl Gazetteer {
    /// Build a gazetteer from records. A later record with the same
    /// identifier replaces an earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = GeographicRecord>,
    {
        let records: IndexMap<u64, GeographicRecord> = records
            .into_iter()
            .map(|record| (record.geonameid, record))
            .collect();

        let mut exact: HashMap<String, Vec<u64>> = HashMap::new();
        let mut folded: HashMap<String, Vec<u64>> = HashMap::new();

        for record in records.values() {
            for key in record_keys(record) {
                exact.entry(key.to_owned()).or_default().push(record.geonameid);
                folded
                    .entry(key.to_lowercase())
                    .or_default()
                    .push(record.geonameid);
            }
        }

        for ids in exact.values_mut().chain(folded.values_mut()) {
            ids.sort_by(|a, b| {
                records[a]
                    .population
                    .cmp(&records[b].population)
                    .reverse()
                    .then(a.cmp(b))
            });
            ids.dedup();
        }

        debug!(
            records = records.len(),
            names = exact.len(),
            "built gazetteer index"
        );

        Self {
            records,
            exact,
            folded,
        }
    }

    /// Save this gazetteer into a file as a JSON list of records.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GazetteerSavingError> {
        let records: Vec<&GeographicRecord> = self.records.values().collect();
        let serialized = serde_json::to_string(&records)?;
        File::create(path)?.write_all(serialized.as_bytes())?;

        Ok(())
    }

    /// Load a gazetteer previously written by [`Gazetteer::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, GazetteerLoadingError> {
        let mut string = String::new();
        File::open(path)?.read_to_string(&mut string)?;
        let records: Vec<GeographicRecord> = serde_json::from_str(&string)?;

        Ok(Self::from_records(records))
    }

    /// Load records from one or more GeoNames tab-separated dump files.
    ///
    /// Lines that don't have all 19 columns or whose identifier or population
    /// isn't numeric are skipped.
    pub fn load_geonames_dump<I, P>(paths: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut records = Vec::new();
        for path in paths {
            read_dump(path.as_ref(), &mut records)?;
        }
        Ok(Self::from_records(records))
    }

    /// Load either a JSON snapshot (`.json`) or a GeoNames dump.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GazetteerLoadingError> {
        let path = path.as_ref();
        let is_snapshot = path
            .extension()
            .map_or(false, |extension| extension.eq_ignore_ascii_case("json"));

        if is_snapshot {
            Self::load_from_file(path)
        } else {
            Ok(Self::load_geonames_dump(Some(path))?)
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &GeographicRecord> {
        self.records.values()
    }

    /// Number of records per feature class. Records without a recognized
    /// class are not counted.
    pub fn feature_counts(&self) -> BTreeMap<FeatureClass, usize> {
        let mut counts = BTreeMap::new();
        for class in self.records.values().filter_map(|record| record.feature_class) {
            *counts.entry(class).or_insert(0) += 1;
        }
        counts
    }

    fn best_of(&self, ids: Option<&Vec<u64>>) -> Option<&GeographicRecord> {
        ids.and_then(|ids| ids.first())
            .and_then(|id| self.records.get(id))
    }
}

impl NameStore for Gazetteer {
    fn lookup(&self, name: &str) -> Result<Option<GeographicRecord>, StoreError> {
        let found = self
            .best_of(self.exact.get(name))
            .or_else(|| self.best_of(self.folded.get(&name.to_lowercase())));

        Ok(found.cloned())
    }
}

fn record_keys(record: &GeographicRecord) -> impl Iterator<Item = &str> {
    let ascii = Some(record.asciiname.as_str())
        .filter(|ascii| !ascii.is_empty() && *ascii != record.name);
    std::iter::once(record.name.as_str()).chain(ascii)
}

fn read_dump(path: &Path, records: &mut Vec<GeographicRecord>) -> io::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let mut skipped = 0usize;
    let before = records.len();

    for line in reader.lines() {
        match GeographicRecord::from_dump_line(&line?) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    debug!(
        path = %path.display(),
        imported = records.len() - before,
        skipped,
        "read geonames dump"
    );
    Ok(())
}
