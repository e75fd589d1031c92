use jobmine_rust::frequency::*;
use jobmine_rust::structures::{distinct_tokens, TokenColumn};
use std::collections::HashSet;

fn column(docs: &[&[&str]]) -> TokenColumn {
    docs.iter()
        .map(|doc| doc.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_document_frequency_counts_each_document_once() {
    let table = FrequencyTable::from_column(&column(&[&["haus", "haus", "haus"], &["haus"], &["garten"]]));
    assert_eq!(table.document_count(), 3);
    assert_eq!(table.document_frequency("haus"), 2);
    assert_eq!(table.document_frequency("garten"), 1);
    assert_eq!(table.document_frequency("missing"), 0);
    assert_eq!(table.max_frequency(), 2);
}

#[test]
fn test_most_common_order() {
    let table = FrequencyTable::from_column(&column(&[&["b", "a"], &["a", "c"], &["a", "c"]]));
    assert_eq!(
        table.most_common(),
        vec![("a".to_string(), 3), ("c".to_string(), 2), ("b".to_string(), 1)]
    );
}

#[test]
fn test_threshold_one_is_identity() {
    let input = column(&[&["x", "y", "x"], &[], &["z"]]);
    assert_eq!(prune(&input, 1), input);
    assert_eq!(prune(&input, 0), input);
}

#[test]
fn test_threshold_above_corpus_size_empties_everything() {
    let input = column(&[&["x", "y"], &["x"], &["x", "z"]]);
    let pruned = prune(&input, input.len() + 1);
    assert_eq!(pruned.len(), 3);
    assert!(pruned.iter().all(Vec::is_empty));
}

#[test]
fn test_prune_keeps_order_and_uncollapsed_duplicates() {
    let input = column(&[&["python", "sql", "python", "excel"], &["sql", "python"], &["excel"]]);
    let pruned = prune(&input, 2);
    assert_eq!(pruned, column(&[&["python", "sql", "python", "excel"], &["sql", "python"], &["excel"]]));

    let pruned = prune(&input, 3);
    assert!(pruned.iter().all(Vec::is_empty));
}

#[test]
fn test_duplicates_do_not_inflate_frequency() {
    // "java" occurs three times but in one document only
    let input = column(&[&["java", "java", "java"], &["go"], &["go"]]);
    assert_eq!(prune(&input, 2), column(&[&[], &["go"], &["go"]]));
}

#[test]
fn test_distinct_tokens_properties() {
    let tokens: Vec<String> = ["a", "b", "a", "c", "b"].iter().map(|s| s.to_string()).collect();
    let collapsed = distinct_tokens(&tokens);
    let as_set: HashSet<&String> = collapsed.iter().collect();
    assert_eq!(as_set.len(), collapsed.len());
    assert_eq!(as_set, tokens.iter().collect::<HashSet<_>>());
}
