//! The token normalization pipeline.
//!
//! Stages run in a fixed order per configured text column:
//! language detection, normalization, tokenization, stopword removal,
//! tagging/lemmatization (nouns only), duplicate collapse, custom stopword
//! removal, frequency pruning and, optionally, bigram derivation.
//!
//! Every stage takes an immutable column and returns a new one, so stages can
//! be run and tested on their own. Resource loading happens once in
//! [`TokenNormalizer::new`]; after that no stage can fail.

use crate::config::{ColumnConfig, PipelineConfig, LANGUAGE_ERROR_TAG};
use crate::error::{PipelineError, Result};
use crate::frequency::{prune, FrequencyTable};
use crate::language::{Language, LanguageDetector};
use crate::nl;
use crate::normalization::Normalizer;
use crate::stopwords::{load_custom, StopwordLists, StopwordSet};
use crate::structures::{distinct_tokens, Column, LanguageTag, Table, TokenColumn};
use crate::tagger::{NounFilter, TaggerSet};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

/// Counters for one processed column. Degradations are reported here rather
/// than logged, so callers decide what to do with them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub documents: usize,
    pub languages_detected: bool,
    pub language_counts: IndexMap<String, usize>,
    pub detection_failures: usize,
    pub tokens_before_pruning: usize,
    pub tokens_after_pruning: usize,
    pub vocabulary_before_pruning: usize,
    pub vocabulary_after_pruning: usize,
    pub empty_documents: usize,
}

#[derive(Debug, Clone)]
pub struct ColumnOutput {
    pub languages: Vec<LanguageTag>,
    /// Whether `languages` was computed here rather than taken from the input.
    pub detected: bool,
    pub tokens: TokenColumn,
    pub combinations: Option<TokenColumn>,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub table: Table,
    pub stats: Vec<ColumnStats>,
}

pub struct TokenNormalizer {
    config: PipelineConfig,
    detector: LanguageDetector,
    normalizer: Normalizer,
    stopwords: StopwordLists,
    custom_stopwords: Option<StopwordSet>,
    taggers: TaggerSet,
    noun_filter: NounFilter,
}

impl TokenNormalizer {
    /// Loads every resource the configuration names. Missing stopword files,
    /// unreadable tagger models and bad rewrite patterns fail here.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let stopwords = StopwordLists::load(&config.stopwords)?;
        let taggers = TaggerSet::load(&config.tagger)?;
        Self::with_resources(config, stopwords, taggers)
    }

    /// Uses the given stopword lists and taggers instead of loading them.
    pub fn with_resources(
        config: PipelineConfig,
        stopwords: StopwordLists,
        taggers: TaggerSet,
    ) -> Result<Self> {
        let normalizer = Normalizer::new(&config.normalization)?;
        let custom_stopwords = load_custom(&config.stopwords)?;
        Ok(Self {
            detector: LanguageDetector::new(&config.detector),
            noun_filter: NounFilter::new(&config.tagger),
            normalizer,
            stopwords,
            custom_stopwords,
            taggers,
            config,
        })
    }

    pub fn with_custom_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.custom_stopwords = Some(stopwords);
        self
    }

    fn map_documents<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        if self.config.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    fn map_with_language<F>(&self, column: &TokenColumn, languages: &[LanguageTag], f: F) -> TokenColumn
    where
        F: Fn(&[String], Language) -> Vec<String> + Sync + Send,
    {
        let language_at = |i: usize| {
            languages
                .get(i)
                .map(|tag| Language::from_tag(tag))
                .unwrap_or(Language::Unknown)
        };
        if self.config.parallel {
            column
                .par_iter()
                .enumerate()
                .map(|(i, tokens)| f(tokens.as_slice(), language_at(i)))
                .collect()
        } else {
            column
                .iter()
                .enumerate()
                .map(|(i, tokens)| f(tokens.as_slice(), language_at(i)))
                .collect()
        }
    }

    pub fn detect_languages(&self, texts: &[String]) -> Vec<LanguageTag> {
        self.map_documents(texts, |text| self.detector.detect(text))
    }

    pub fn normalize(&self, texts: &[String]) -> Vec<String> {
        self.map_documents(texts, |text| self.normalizer.normalize(text))
    }

    pub fn tokenize(&self, texts: &[String]) -> TokenColumn {
        self.map_documents(texts, |text| nl::tokenize(text))
    }

    pub fn remove_stopwords(&self, column: &TokenColumn, languages: &[LanguageTag]) -> TokenColumn {
        self.map_with_language(column, languages, |tokens, language| {
            self.stopwords.for_language(language).filter(tokens)
        })
    }

    /// Keeps noun-like tokens and replaces them by their lemma.
    pub fn tag_and_lemmatize(&self, column: &TokenColumn, languages: &[LanguageTag]) -> TokenColumn {
        self.map_with_language(column, languages, |tokens, language| {
            let tagged = self.taggers.for_language(language).tag(tokens);
            self.noun_filter.extract(&tagged, language)
        })
    }

    pub fn remove_duplicates(&self, column: &TokenColumn) -> TokenColumn {
        self.map_documents(column, |tokens| distinct_tokens(tokens))
    }

    /// No-op when no custom stopwords are configured.
    pub fn remove_custom_stopwords(&self, column: &TokenColumn) -> TokenColumn {
        match &self.custom_stopwords {
            Some(set) => self.map_documents(column, |tokens| set.filter(tokens)),
            None => column.clone(),
        }
    }

    pub fn remove_infrequent(&self, column: &TokenColumn, min_documents: usize) -> TokenColumn {
        prune(column, min_documents)
    }

    pub fn create_token_combinations(&self, column: &TokenColumn) -> TokenColumn {
        self.map_documents(column, |tokens| nl::token_combinations(tokens))
    }

    /// Runs every stage over one column. `languages`, when given, must hold
    /// one tag per document and is used as-is.
    pub fn process_column(
        &self,
        texts: &[String],
        languages: Option<&[LanguageTag]>,
        column: &ColumnConfig,
    ) -> ColumnOutput {
        let (languages, detected) = match languages {
            Some(tags) => (tags.to_vec(), false),
            None => (self.detect_languages(texts), true),
        };

        let normalized = self.normalize(texts);
        let tokens = self.tokenize(&normalized);
        let tokens = self.remove_stopwords(&tokens, &languages);
        let tokens = self.tag_and_lemmatize(&tokens, &languages);
        let tokens = if column.remove_duplicates {
            self.remove_duplicates(&tokens)
        } else {
            tokens
        };
        let tokens = self.remove_custom_stopwords(&tokens);

        let before = FrequencyTable::from_column(&tokens);
        let tokens_before_pruning: usize = tokens.iter().map(Vec::len).sum();
        let tokens = self.remove_infrequent(&tokens, column.min_documents);
        let after = FrequencyTable::from_column(&tokens);

        let combinations = column.combinations.then(|| {
            let combined = self.create_token_combinations(&tokens);
            self.remove_infrequent(&combined, column.combination_min_documents)
        });

        let mut language_counts = IndexMap::new();
        for tag in &languages {
            *language_counts.entry(tag.clone()).or_insert(0) += 1;
        }

        let stats = ColumnStats {
            column: column.name.clone(),
            documents: texts.len(),
            languages_detected: detected,
            detection_failures: language_counts.get(LANGUAGE_ERROR_TAG).copied().unwrap_or(0),
            language_counts,
            tokens_before_pruning,
            tokens_after_pruning: tokens.iter().map(Vec::len).sum(),
            vocabulary_before_pruning: before.vocab_size(),
            vocabulary_after_pruning: after.vocab_size(),
            empty_documents: tokens.iter().filter(|t| t.is_empty()).count(),
        };

        ColumnOutput {
            languages,
            detected,
            tokens,
            combinations,
            stats,
        }
    }

    /// Returns a copy of `input` where every configured text column is
    /// replaced by its token lists, with language and combination columns
    /// added next to it.
    pub fn transform(&self, input: &Table) -> Result<TransformOutput> {
        if self.config.columns.is_empty() {
            return Err(PipelineError::Config("no text columns configured".to_string()));
        }

        let mut table = input.clone();
        let mut stats = Vec::with_capacity(self.config.columns.len());

        for column in &self.config.columns {
            let texts = input.text(&column.name)?;
            let language_column = column.language_column_name();
            let existing = if input.contains(&language_column) {
                Some(input.text(&language_column)?)
            } else {
                None
            };

            let output = self.process_column(texts, existing, column);

            if output.detected {
                table.insert(language_column, Column::Text(output.languages))?;
            }
            table.insert(column.name.clone(), Column::Tokens(output.tokens))?;
            if let Some(combinations) = output.combinations {
                table.insert(column.combination_column(), Column::Tokens(combinations))?;
            }
            stats.push(output.stats);
        }

        Ok(TransformOutput { table, stats })
    }
}
