use crate::structures::TokenColumn;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Document frequency of every token in a column: how many documents
/// contain the token at least once. Tokens are kept in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyTable {
    documents: usize,
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each document contributes at most one count per token, whether or
    /// not its list was collapsed beforehand.
    pub fn from_column(column: &TokenColumn) -> Self {
        let mut table = Self::new();
        for tokens in column {
            table.add_document(tokens);
        }
        table
    }

    pub fn add_document<T: AsRef<str>>(&mut self, tokens: &[T]) {
        self.documents += 1;
        let mut seen = HashSet::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            if seen.insert(token) {
                *self.counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn vocab_size(&self) -> usize {
        self.counts.len()
    }

    pub fn document_frequency(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn max_frequency(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Tokens by descending frequency; ties keep first-seen order.
    pub fn most_common(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> =
            self.counts.iter().map(|(t, c)| (t.clone(), *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Tokens occurring in at least `min_documents` documents.
    pub fn frequent_tokens(&self, min_documents: usize) -> HashSet<&str> {
        self.counts
            .iter()
            .filter(|(_, count)| **count >= min_documents)
            .map(|(token, _)| token.as_str())
            .collect()
    }
}

/// Drops every token whose document frequency over the whole column is below
/// `min_documents`. Frequencies are computed once from the input column;
/// each document keeps its remaining tokens in their existing order.
pub fn prune(column: &TokenColumn, min_documents: usize) -> TokenColumn {
    if min_documents <= 1 {
        return column.clone();
    }
    let table = FrequencyTable::from_column(column);
    let keep = table.frequent_tokens(min_documents);
    column
        .iter()
        .map(|tokens| {
            tokens
                .iter()
                .filter(|t| keep.contains(t.as_str()))
                .cloned()
                .collect()
        })
        .collect()
}
