//! Pipeline configuration and tuning defaults.

use crate::error::{PipelineError, Result};
use crate::language::DetectorConfig;
use crate::normalization::NormalizationConfig;
use crate::stopwords::StopwordConfig;
use crate::tagger::TaggerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Derived column suffixes
pub const LANGUAGE_COLUMN_SUFFIX: &str = "Lang";
pub const COMBINATION_COLUMN_SUFFIX: &str = "Comb";

// Language tag written when detection fails
pub const LANGUAGE_ERROR_TAG: &str = "error";

// Frequency pruning: 1 keeps every token
pub const DEFAULT_MIN_DOCUMENTS: usize = 1;

// Tokens kept by the noun filter regardless of their tag ("r" the language)
pub const DEFAULT_KEEP_TOKENS: &[&str] = &["r"];

pub const ENGLISH_NOUN_TAGS: &[&str] = &["NN", "NNS", "NNP", "NNPS"];
pub const GERMAN_NOUN_TAGS: &[&str] = &["FM", "NN", "NE"];

// Separator used for token lists in CSV output cells
pub const CSV_TOKEN_SEPARATOR: &str = " | ";

// Cumulative share used for the "documents at" marker in reports
pub const REPORT_CUMULATIVE_CUTOFF: f64 = 80.0;

/// One text column to run through the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    /// Column holding the language tags for `name`, `<name>Lang` by default.
    /// Tags already present in the table are reused; otherwise they are
    /// detected and written to that column.
    #[serde(default)]
    pub language_column: Option<String>,
    #[serde(default = "default_true")]
    pub remove_duplicates: bool,
    #[serde(default = "default_min_documents")]
    pub min_documents: usize,
    #[serde(default)]
    pub combinations: bool,
    #[serde(default = "default_min_documents")]
    pub combination_min_documents: usize,
}

impl ColumnConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language_column: None,
            remove_duplicates: true,
            min_documents: DEFAULT_MIN_DOCUMENTS,
            combinations: false,
            combination_min_documents: DEFAULT_MIN_DOCUMENTS,
        }
    }

    pub fn language_column_name(&self) -> String {
        self.language_column
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.name, LANGUAGE_COLUMN_SUFFIX))
    }

    pub fn combination_column(&self) -> String {
        format!("{}{}", self.name, COMBINATION_COLUMN_SUFFIX)
    }
}

fn default_true() -> bool {
    true
}

fn default_min_documents() -> usize {
    DEFAULT_MIN_DOCUMENTS
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub stopwords: StopwordConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
    /// Run per-document stages on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

impl PipelineConfig {
    /// Loads a config file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PipelineError::resource(path, e))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(config)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.name == name)
    }
}
