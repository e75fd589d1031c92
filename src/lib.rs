pub mod config;
pub mod error;
pub mod frequency;
pub mod language;
pub mod lemmatizer;
pub mod nl;
pub mod normalization;
pub mod persistence;
pub mod pipeline;
pub mod report;
pub mod stopwords;
pub mod structures;
pub mod tagger;

pub use error::{PipelineError, Result};
pub use pipeline::{ColumnStats, TokenNormalizer, TransformOutput};
