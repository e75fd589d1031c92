//! Table input/output. CSV (header row required) and JSON arrays of flat
//! objects are supported; the format is picked from the file extension.
//! Writes go to a temp file first and are renamed into place.

use crate::config::CSV_TOKEN_SEPARATOR;
use crate::error::{PipelineError, Result};
use crate::structures::{Column, Table};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TableFormat::Json,
            _ => TableFormat::Csv,
        }
    }
}

pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let table = match TableFormat::from_path(path) {
        TableFormat::Csv => read_csv(path)?,
        TableFormat::Json => read_json(path)?,
    };
    info!(
        "Loaded {} rows, {} columns from {:?}",
        table.rows(),
        table.column_names().count(),
        path
    );
    Ok(table)
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut seen = HashSet::new();
    if let Some(name) = headers.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(PipelineError::Config(format!(
            "duplicate column '{}' in {:?}",
            name, path
        )));
    }
    let mut values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for result in rdr.records() {
        let record = result?;
        for (i, column) in values.iter_mut().enumerate() {
            // Short rows are padded with empty cells
            column.push(record.get(i).unwrap_or_default().to_string());
        }
    }

    let rows = values.first().map(Vec::len).unwrap_or(0);
    let mut table = Table::with_rows(rows);
    for (name, column) in headers.into_iter().zip(values) {
        table.insert(name, Column::Text(column))?;
    }
    Ok(table)
}

fn read_json(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)?;
    let records: Vec<Map<String, Value>> = serde_json::from_str(&content)?;

    // Union of keys in first-seen order
    let mut columns: IndexMap<String, Vec<String>> = IndexMap::new();
    for record in &records {
        for key in record.keys() {
            columns.entry(key.clone()).or_default();
        }
    }
    for record in &records {
        for (key, cells) in columns.iter_mut() {
            cells.push(record.get(key).map(cell_text).unwrap_or_default());
        }
    }

    let mut table = Table::with_rows(records.len());
    for (name, cells) in columns {
        table.insert(name, Column::Text(cells))?;
    }
    Ok(table)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One JSON object per row; token columns become arrays.
pub fn table_to_json(table: &Table) -> Value {
    let rows = (0..table.rows())
        .map(|row| {
            let mut object = Map::new();
            for (name, column) in table.columns() {
                let value = match column {
                    Column::Text(values) => Value::String(values[row].clone()),
                    Column::Tokens(values) => Value::Array(
                        values[row].iter().cloned().map(Value::String).collect(),
                    ),
                };
                object.insert(name.clone(), value);
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = match TableFormat::from_path(path) {
        TableFormat::Json => serde_json::to_vec_pretty(&table_to_json(table))?,
        TableFormat::Csv => table_to_csv(table)?,
    };
    write_atomic(path, &data)?;
    info!("Wrote {} rows to {:?}", table.rows(), path);
    Ok(())
}

fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.column_names())?;
    for row in 0..table.rows() {
        let record: Vec<String> = table
            .columns()
            .map(|(_, column)| match column {
                Column::Text(values) => values[row].clone(),
                Column::Tokens(values) => values[row].join(CSV_TOKEN_SEPARATOR),
            })
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))
}

pub fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &data)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let temp = temp_path(path);
    fs::write(&temp, data)?;
    fs::rename(&temp, path)?;
    debug!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}
