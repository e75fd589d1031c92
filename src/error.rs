use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a pipeline run. Per-document problems never end up here;
/// they degrade to empty token lists or the `"error"` language tag.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load resource {path:?}: {reason}")]
    Resource { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("column '{0}' not found in table")]
    MissingColumn(String),

    #[error("column '{column}' must hold {expected}")]
    ColumnType { column: String, expected: &'static str },

    #[error("table columns have mismatched lengths: '{column}' has {found} rows, expected {expected}")]
    RowCount { column: String, expected: usize, found: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl PipelineError {
    pub fn resource(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Resource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
