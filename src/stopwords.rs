//! Stopword sets for German and English plus caller-supplied custom sets.
//!
//! Built-in lists come from the `stop-words` crate. Each can be replaced by a
//! plain word list file (one word per line, `#` starts a comment line).

use crate::error::{PipelineError, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use stop_words::LANGUAGE;
use tracing::info;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StopwordConfig {
    #[serde(default)]
    pub german_path: Option<PathBuf>,
    #[serde(default)]
    pub english_path: Option<PathBuf>,
    /// Inline custom stopwords (domain boilerplate).
    #[serde(default)]
    pub custom: Vec<String>,
    #[serde(default)]
    pub custom_path: Option<PathBuf>,
}

/// Lowercased set of words to drop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn builtin(language: LANGUAGE) -> Self {
        Self::new(stop_words::get(language).into_iter().map(|s| s.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PipelineError::resource(path, e))?;
        Ok(Self::new(
            content
                .lines()
                .filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn extend(&mut self, other: StopwordSet) {
        self.words.extend(other.words);
    }

    /// Drops exact matches only; the remaining tokens keep their order.
    pub fn filter(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !self.words.contains(t.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct StopwordLists {
    pub german: StopwordSet,
    pub english: StopwordSet,
}

impl StopwordLists {
    pub fn new(german: StopwordSet, english: StopwordSet) -> Self {
        Self { german, english }
    }

    pub fn builtin() -> Self {
        Self::new(
            StopwordSet::builtin(LANGUAGE::German),
            StopwordSet::builtin(LANGUAGE::English),
        )
    }

    /// Builds both lists, reading configured files instead of the built-in
    /// lists where given. An unreadable file is fatal.
    pub fn load(config: &StopwordConfig) -> Result<Self> {
        let german = match &config.german_path {
            Some(path) => StopwordSet::from_path(path)?,
            None => StopwordSet::builtin(LANGUAGE::German),
        };
        let english = match &config.english_path {
            Some(path) => StopwordSet::from_path(path)?,
            None => StopwordSet::builtin(LANGUAGE::English),
        };
        info!(
            "Loaded stopwords: {} german, {} english",
            german.len(),
            english.len()
        );
        Ok(Self::new(german, english))
    }

    /// English documents use the English set; everything else the German one.
    pub fn for_language(&self, language: Language) -> &StopwordSet {
        match language {
            Language::English => &self.english,
            Language::German | Language::Unknown => &self.german,
        }
    }
}

impl Default for StopwordLists {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Loads the custom set from the inline list and the optional file.
/// Returns `None` when neither supplies a word.
pub fn load_custom(config: &StopwordConfig) -> Result<Option<StopwordSet>> {
    let mut set = StopwordSet::new(&config.custom);
    if let Some(path) = &config.custom_path {
        set.extend(StopwordSet::from_path(path)?);
    }
    if set.is_empty() {
        Ok(None)
    } else {
        info!("Loaded {} custom stopwords", set.len());
        Ok(Some(set))
    }
}
