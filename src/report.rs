use indexmap::IndexMap;
use serde::Serialize;

use crate::reason::Reason;
use crate::resolver::Decision;
use crate::scanner::Correction;

/// A correction together with the sentence it was found in.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub sentence: usize,
    #[serde(flatten)]
    pub correction: Correction,
}

/// Everything `analyze` found in one text.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub original_text: String,
    pub corrected_text: String,
    pub changes: Vec<Change>,
    pub stats: IndexMap<Reason, usize>,
    pub total_corrections: usize,
}

/// The verdict for a single word, shaped for output.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WordCheck {
    pub word: String,
    #[serde(flatten)]
    pub decision: Decision,
}

/// Accumulates corrected sentences in text order.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    corrected: String,
    changes: Vec<Change>,
    stats: IndexMap<Reason, usize>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text copied through as-is.
    pub fn push_verbatim(&mut self, text: &str) {
        self.corrected.push_str(text);
    }

    pub fn push_sentence(&mut self, sentence: usize, corrected: &str, corrections: Vec<Correction>) {
        self.corrected.push_str(corrected);
        for correction in corrections {
            *self.stats.entry(correction.reason).or_insert(0) += 1;
            self.changes.push(Change {
                sentence,
                correction,
            });
        }
    }

    pub fn build(self, original: &str) -> AnalysisResult {
        AnalysisResult {
            original_text: original.to_owned(),
            corrected_text: self.corrected,
            total_corrections: self.changes.len(),
            changes: self.changes,
            stats: self.stats,
        }
    }
}
