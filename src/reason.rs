use std::fmt;

use serde::{Serialize, Serializer};

/// Why a word or span was (or was not) corrected.
///
/// Serializes as its human-readable label, which is also the key used in
/// per-reason statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    GeographicName,
    GeographicTwoWords,
    GeographicThreeWords,
    DayOfWeek,
    Month,
    Holiday,
    Language,
    MilitaryRank,
    Title,
    Religion,
    Deity,
    Season,
    Correct,
}

impl Reason {
    pub fn label(self) -> &'static str {
        match self {
            Reason::GeographicName => "Geographic name",
            Reason::GeographicTwoWords => "Geographic name (2 words)",
            Reason::GeographicThreeWords => "Geographic name (3 words)",
            Reason::DayOfWeek => "Day of week",
            Reason::Month => "Month",
            Reason::Holiday => "Holiday",
            Reason::Language => "Language",
            Reason::MilitaryRank => "Military rank before name",
            Reason::Title => "Title before name",
            Reason::Religion => "Religion",
            Reason::Deity => "Deity",
            Reason::Season => "Season (lowercase)",
            Reason::Correct => "Correct",
        }
    }

    /// Reason for a geographic match spanning `words` tokens.
    pub(crate) fn geographic_span(words: usize) -> Self {
        match words {
            3 => Reason::GeographicThreeWords,
            2 => Reason::GeographicTwoWords,
            _ => Reason::GeographicName,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
