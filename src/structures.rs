use crate::error::{PipelineError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One token list per document, in corpus order.
pub type TokenColumn = Vec<Vec<String>>;

/// Language tag as stored in the table ("de", "en", "fr", ..., or "error").
pub type LanguageTag = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Text(Vec<String>),
    Tokens(TokenColumn),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Tokens(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Column::Text(values) => Some(values),
            Column::Tokens(_) => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&TokenColumn> {
        match self {
            Column::Tokens(values) => Some(values),
            Column::Text(_) => None,
        }
    }
}

/// Column-major in-memory table. Column order is the insertion order and is
/// kept on output; every column has `rows` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: usize,
    columns: IndexMap<String, Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows,
            columns: IndexMap::new(),
        }
    }

    /// Inserts or replaces a column. The first column fixes the row count.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() && self.rows == 0 {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(PipelineError::RowCount {
                column: name,
                expected: self.rows,
                found: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Result<&[String]> {
        self.columns
            .get(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?
            .as_text()
            .ok_or_else(|| PipelineError::ColumnType {
                column: name.to_string(),
                expected: "text",
            })
    }

    pub fn tokens(&self, name: &str) -> Result<&TokenColumn> {
        self.columns
            .get(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?
            .as_tokens()
            .ok_or_else(|| PipelineError::ColumnType {
                column: name.to_string(),
                expected: "tokens",
            })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &String> {
        self.columns.keys()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &Column)> {
        self.columns.iter()
    }
}

/// Reduces a token list to its distinct values, keeping the first occurrence
/// of each. Callers must not rely on the order matching the source text.
pub fn distinct_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(String::as_str)
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
