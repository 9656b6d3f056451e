use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::split_in_three;

lazy_static! {
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]\s+").unwrap();
    static ref LEADING_PUNCTUATION: Regex = Regex::new(r"^\W+").unwrap();
    static ref TRAILING_PUNCTUATION: Regex = Regex::new(r"\W+$").unwrap();
}

/// Split text into sentences, keeping the boundary that ended each one.
pub(crate) fn sentences(text: &str) -> Sentences {
    Sentences { string: text }
}

/// One sentence body followed by the terminal punctuation and whitespace
/// that closed it. The last sentence of a text usually has an empty boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment<'a> {
    pub body: &'a str,
    pub boundary: &'a str,
}

pub(crate) struct Sentences<'a> {
    string: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.string.is_empty() {
            return None;
        }

        if let Some(mat) = SENTENCE_BOUNDARY.find(self.string) {
            let (body, boundary, rest) = split_in_three(self.string, mat.start(), mat.end());
            self.string = rest;
            Some(Segment { body, boundary })
        } else {
            let body = self.string;
            self.string = "";
            Some(Segment { body, boundary: "" })
        }
    }
}

/// A whitespace-delimited token with its punctuation edges split off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Word<'a> {
    pub original: &'a str,
    pub prefix: &'a str,
    pub core: &'a str,
    pub suffix: &'a str,
}

impl<'a> Word<'a> {
    pub fn new(original: &'a str) -> Self {
        let start = LEADING_PUNCTUATION
            .find(original)
            .map_or(0, |mat| mat.end());
        let end = TRAILING_PUNCTUATION
            .find(&original[start..])
            .map_or(original.len(), |mat| start + mat.start());
        let (prefix, core, suffix) = split_in_three(original, start, end);

        Self {
            original,
            prefix,
            core,
            suffix,
        }
    }

    pub fn is_meaningful(&self) -> bool {
        !self.core.is_empty()
    }

    /// Rebuild the token around a different core.
    pub fn with_core(&self, core: &str) -> String {
        let mut result = String::with_capacity(self.prefix.len() + core.len() + self.suffix.len());
        result.push_str(self.prefix);
        result.push_str(core);
        result.push_str(self.suffix);
        result
    }
}

pub(crate) fn tokenize(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}
