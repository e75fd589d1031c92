use jobmine_rust::report::*;
use jobmine_rust::structures::TokenColumn;

fn column(docs: &[&[&str]]) -> TokenColumn {
    docs.iter()
        .map(|doc| doc.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_count_distinct_objects() {
    assert_eq!(count_distinct_objects(&column(&[&["a", "b"], &["a"], &["c", "a"]])), 3);
    assert_eq!(count_distinct_objects(&column(&[&[], &[]])), 0);
}

#[test]
fn test_object_frequency_counts_raw_occurrences() {
    let freq = object_frequency(&column(&[&["sql", "sql", "python"], &["sql"], &["excel", "python"]]));
    assert_eq!(
        freq,
        vec![("sql".to_string(), 3), ("python".to_string(), 2), ("excel".to_string(), 1)]
    );
}

#[test]
fn test_frequency_distribution() {
    let dist = frequency_distribution(&column(&[&["a", "b"], &["a"], &["a", "c"], &["d"]]));
    assert_eq!(
        dist.rows,
        vec![
            DistributionRow { documents: 1, objects: 3, cumulative_percent: 75.0 },
            DistributionRow { documents: 3, objects: 1, cumulative_percent: 100.0 },
        ]
    );
    assert_eq!(dist.documents_at_cutoff, Some(1));
}

#[test]
fn test_distribution_rounding_and_missing_cutoff() {
    // 1 of 3 tokens at frequency 1 -> 33.33%, nothing else at or below 80%
    let dist = frequency_distribution(&column(&[&["a", "b", "c"], &["b", "c"], &["c"]]));
    let percents: Vec<f64> = dist.rows.iter().map(|r| r.cumulative_percent).collect();
    assert_eq!(percents, vec![33.33, 66.67, 100.0]);
    assert_eq!(dist.documents_at_cutoff, Some(2));

    let single = frequency_distribution(&column(&[&["a"], &["a"]]));
    assert_eq!(single.documents_at_cutoff, None);

    let empty = frequency_distribution(&column(&[]));
    assert!(empty.rows.is_empty());
}

#[test]
fn test_column_report() {
    let tokens = column(&[&["a", "b"], &["a"], &["c"]]);
    let report = ColumnReport::build("tasks", &tokens, Some(1));
    assert_eq!(report.documents, 3);
    assert_eq!(report.distinct_objects, 3);
    assert_eq!(report.most_common, vec![("a".to_string(), 2)]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["column"], "tasks");
    assert!(json["distribution"]["rows"].is_array());
}
