use jobmine_rust::config::PipelineConfig;
use jobmine_rust::persistence::*;
use jobmine_rust::structures::{Column, Table};
use jobmine_rust::PipelineError;
use std::fs;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_table() -> Table {
    let mut table = Table::new();
    table.insert("id", Column::Text(strings(&["1", "2"]))).unwrap();
    table
        .insert(
            "tasks",
            Column::Tokens(vec![strings(&["python", "sql"]), vec![]]),
        )
        .unwrap();
    table.insert("tasksLang", Column::Text(strings(&["en", "de"]))).unwrap();
    table
}

#[test]
fn test_read_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postings.csv");
    fs::write(&path, "id,tasks\n1,\"Analyse, Reporting\"\n2\n").unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table.rows(), 2);
    assert_eq!(table.text("tasks").unwrap(), &strings(&["Analyse, Reporting", ""])[..]);
}

#[test]
fn test_read_csv_rejects_duplicate_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postings.csv");
    fs::write(&path, "id,tasks,tasks\n1,Python,SQL\n").unwrap();

    assert!(matches!(read_table(&path), Err(PipelineError::Config(_))));
}

#[test]
fn test_read_json_with_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postings.json");
    fs::write(&path, r#"[{"id": 1, "tasks": "Python"}, {"id": 2, "profile": "SQL", "tasks": null}]"#).unwrap();

    let table = read_table(&path).unwrap();
    let names: Vec<&String> = table.column_names().collect();
    assert_eq!(names, vec!["id", "tasks", "profile"]);
    assert_eq!(table.text("id").unwrap(), &strings(&["1", "2"])[..]);
    assert_eq!(table.text("tasks").unwrap(), &strings(&["Python", ""])[..]);
    assert_eq!(table.text("profile").unwrap(), &strings(&["", "SQL"])[..]);
}

#[test]
fn test_write_json_keeps_token_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("tokens.json");
    write_table(&sample_table(), &path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value[0]["tasks"], serde_json::json!(["python", "sql"]));
    assert_eq!(value[1]["tasks"], serde_json::json!([]));
    assert_eq!(value[1]["tasksLang"], "de");
    assert!(!dir.path().join("out").join("tokens.json.tmp").exists());
}

#[test]
fn test_write_csv_joins_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.csv");
    write_table(&sample_table(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "id,tasks,tasksLang");
    assert_eq!(lines[1], "1,python | sql,en");
    assert_eq!(lines[2], "2,,de");
}

#[test]
fn test_config_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.yaml");
    fs::write(
        &path,
        "columns:\n  - name: tasks\n    min_documents: 5\n    combinations: true\n  - name: profile\nparallel: true\ntagger:\n  keep_tokens: [r, c]\n",
    )
    .unwrap();

    let config = PipelineConfig::from_path(&path).unwrap();
    assert!(config.parallel);
    assert_eq!(config.columns.len(), 2);
    let tasks = config.column("tasks").unwrap();
    assert_eq!(tasks.min_documents, 5);
    assert!(tasks.combinations);
    assert!(tasks.remove_duplicates);
    assert_eq!(config.column("profile").unwrap().min_documents, 1);
    assert_eq!(config.tagger.keep_tokens, strings(&["r", "c"]));
    assert_eq!(config.tagger.german_tags, strings(&["FM", "NN", "NE"]));
    assert!(config.normalization.lowercase);
}
