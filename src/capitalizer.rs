use tracing::debug;

use crate::errors::StoreError;
use crate::gazetteer::NameStore;
use crate::report::{AnalysisResult, ReportBuilder, WordCheck};
use crate::resolver::{Context, Decision, WordResolver};
use crate::rewriter;
use crate::rules::{RuleCatalog, CATALOG};
use crate::scanner::{Correction, PhraseScanner};
use crate::tokenizer::sentences;
use crate::utils::split_in_three;

/// Capitalization checker over a name store and a rule catalog.
///
/// See [crate documentation](index.html) for examples.
pub struct Capitalizer<'c, S> {
    store: S,
    catalog: &'c RuleCatalog,
}

impl<S: NameStore> Capitalizer<'static, S> {
    /// Use the built-in rule catalog.
    pub fn new(store: S) -> Self {
        Self {
            store,
            catalog: &CATALOG,
        }
    }
}

impl<'c, S: NameStore> Capitalizer<'c, S> {
    pub fn with_catalog(store: S, catalog: &'c RuleCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &RuleCatalog {
        self.catalog
    }

    fn resolver(&self) -> WordResolver<'_, S> {
        WordResolver::with_catalog(&self.store, self.catalog)
    }

    /// Check one word, with an optional surrounding text as context.
    pub fn resolve(&self, word: &str, context: &str) -> Result<Decision, StoreError> {
        self.resolver().resolve(word, &Context::new(context))
    }

    /// Same as [`Capitalizer::resolve`], keeping the word next to its verdict.
    pub fn check_word(&self, word: &str, context: &str) -> Result<WordCheck, StoreError> {
        let decision = self.resolve(word, context)?;
        Ok(WordCheck {
            word: word.to_owned(),
            decision,
        })
    }

    /// Find corrections in one sentence.
    pub fn scan(&self, sentence: &str) -> Result<Vec<Correction>, StoreError> {
        PhraseScanner::new(self.resolver()).scan(sentence)
    }

    /// Restore capitalization in one sentence.
    pub fn correct_sentence(&self, sentence: &str) -> Result<String, StoreError> {
        let corrections = self.scan(sentence)?;
        Ok(rewriter::apply(sentence, &corrections))
    }

    /// Check and correct a whole text, sentence by sentence.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, StoreError> {
        let scanner = PhraseScanner::new(self.resolver());
        let mut report = ReportBuilder::new();

        for (index, segment) in sentences(text).enumerate() {
            let body = segment.body;
            let corrections = if body.trim().is_empty() {
                Vec::new()
            } else {
                scanner.scan(body)?
            };

            if corrections.is_empty() {
                report.push_verbatim(body);
            } else {
                let start = body.len() - body.trim_start().len();
                let end = body.trim_end().len();
                let (leading, inner, trailing) = split_in_three(body, start, end);

                let corrected = rewriter::apply(inner, &corrections);
                report.push_verbatim(leading);
                report.push_sentence(index, &corrected, corrections);
                report.push_verbatim(trailing);
            }
            report.push_verbatim(segment.boundary);
        }

        let result = report.build(text);
        debug!(
            corrections = result.total_corrections,
            length = text.len(),
            "analyzed text"
        );
        Ok(result)
    }
}
