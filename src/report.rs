//! Descriptive statistics over finished token columns.

use crate::config::REPORT_CUMULATIVE_CUTOFF;
use crate::frequency::FrequencyTable;
use crate::structures::TokenColumn;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Number of distinct tokens in a column.
pub fn count_distinct_objects(column: &TokenColumn) -> usize {
    column
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<HashSet<&str>>()
        .len()
}

/// Raw occurrence count of every token, most common first.
pub fn object_frequency(column: &TokenColumn) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in column.iter().flatten() {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(t, c)| (t.to_string(), c))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    /// Document frequency.
    pub documents: usize,
    /// Distinct tokens with exactly that document frequency.
    pub objects: usize,
    /// Share of all distinct tokens with at most that document frequency.
    pub cumulative_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyDistribution {
    pub rows: Vec<DistributionRow>,
    /// Document frequency of the last row still at or below the cutoff share.
    pub documents_at_cutoff: Option<usize>,
}

/// Cumulative distribution of document frequencies, ordered by frequency.
pub fn frequency_distribution(column: &TokenColumn) -> FrequencyDistribution {
    let table = FrequencyTable::from_column(column);

    let mut grouped: BTreeMap<usize, usize> = BTreeMap::new();
    for (_, documents) in table.iter() {
        *grouped.entry(documents).or_insert(0) += 1;
    }

    let total = table.vocab_size();
    let mut cumulative = 0;
    let rows: Vec<DistributionRow> = grouped
        .into_iter()
        .map(|(documents, objects)| {
            cumulative += objects;
            DistributionRow {
                documents,
                objects,
                cumulative_percent: round2(cumulative as f64 / total as f64 * 100.0),
            }
        })
        .collect();

    let documents_at_cutoff = rows
        .iter()
        .filter(|row| row.cumulative_percent <= REPORT_CUMULATIVE_CUTOFF)
        .last()
        .map(|row| row.documents);

    FrequencyDistribution {
        rows,
        documents_at_cutoff,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub column: String,
    pub documents: usize,
    pub distinct_objects: usize,
    pub most_common: Vec<(String, usize)>,
    pub distribution: FrequencyDistribution,
}

impl ColumnReport {
    /// `top` limits the most-common list; `None` keeps all tokens.
    pub fn build(column: &str, tokens: &TokenColumn, top: Option<usize>) -> Self {
        let mut most_common = object_frequency(tokens);
        if let Some(limit) = top {
            most_common.truncate(limit);
        }
        Self {
            column: column.to_string(),
            documents: tokens.len(),
            distinct_objects: count_distinct_objects(tokens),
            most_common,
            distribution: frequency_distribution(tokens),
        }
    }
}
