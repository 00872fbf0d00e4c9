//! Text tables for the statistics checkpoints, drawn with Arrow's pretty
//! printer.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::analysis::describe::{CategoricalSummary, ColumnInfo, NumericSummary};
use crate::data::model::{Table, Value};

/// Render string columns as a bordered table.
pub fn render(headers: &[String], rows: &[Vec<String>]) -> Result<String> {
    let fields: Vec<Field> = headers
        .iter()
        .map(|h| Field::new(h, DataType::Utf8, true))
        .collect();
    let columns: Vec<ArrayRef> = (0..headers.len())
        .map(|i| {
            let cells: Vec<&str> = rows.iter().map(|r| r[i].as_str()).collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("building table batch")?;
    Ok(pretty_format_batches(&[batch])
        .context("formatting table")?
        .to_string())
}

fn cell(v: &Value) -> String {
    match v {
        Value::Float(f) => format!("{f}"),
        other => other.to_string(),
    }
}

fn stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

/// First `n` rows of a table with a shape footer.
pub fn preview(table: &Table, n: usize) -> Result<String> {
    let rows: Vec<Vec<String>> = table
        .head(n)
        .rows()
        .iter()
        .map(|r| r.iter().map(cell).collect())
        .collect();
    let body = render(table.columns(), &rows)?;
    Ok(format!(
        "{body}\n[{} rows x {} columns]",
        table.len(),
        table.columns().len()
    ))
}

pub fn info(columns: &[ColumnInfo], rows: usize) -> Result<String> {
    let headers = ["#", "Column", "Non-Null Count", "Dtype"].map(String::from);
    let body: Vec<Vec<String>> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                i.to_string(),
                c.name.clone(),
                format!("{} non-null", c.non_null),
                c.dtype.name().to_string(),
            ]
        })
        .collect();
    Ok(format!("{rows} entries\n{}", render(&headers, &body)?))
}

/// Statistic names down the side, one column per summarised column.
pub fn numeric(summaries: &[(String, NumericSummary)]) -> Result<String> {
    let mut headers = vec![String::new()];
    headers.extend(summaries.iter().map(|(name, _)| name.clone()));
    let rows: Vec<Vec<String>> = NumericSummary::LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.to_string()];
            row.extend(summaries.iter().map(|(_, s)| stat(s.values()[i])));
            row
        })
        .collect();
    render(&headers, &rows)
}

pub fn categorical(summaries: &[(String, CategoricalSummary)]) -> Result<String> {
    let mut headers = vec![String::new()];
    headers.extend(summaries.iter().map(|(name, _)| name.clone()));
    let rows: Vec<Vec<String>> = CategoricalSummary::LABELS
        .iter()
        .map(|&label| {
            let mut row = vec![label.to_string()];
            row.extend(summaries.iter().map(|(_, s)| match label {
                "count" => s.count.to_string(),
                "unique" => s.unique.to_string(),
                "top" => s.top.clone().unwrap_or_else(|| "NaN".into()),
                _ => s.freq.to_string(),
            }));
            row
        })
        .collect();
    render(&headers, &rows)
}

/// Two-column listing, e.g. laureates per country.
pub fn pairs<K: ToString, V: ToString>(key: &str, value: &str, items: &[(K, V)]) -> Result<String> {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|(k, v)| vec![k.to_string(), v.to_string()])
        .collect();
    render(&[key.to_string(), value.to_string()], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_draws_headers_and_cells() {
        let out = render(
            &["Country".into(), "Laureates".into()],
            &[vec!["Sweden".into(), "29".into()]],
        )
        .unwrap();
        assert!(out.contains("| Country | Laureates |"));
        assert!(out.contains("| Sweden  | 29        |"));
    }

    #[test]
    fn numeric_table_lists_every_statistic() {
        let out = numeric(&[("Year".into(), NumericSummary::of(&[1901.0]))]).unwrap();
        for label in NumericSummary::LABELS {
            assert!(out.contains(label), "missing {label}");
        }
        assert!(out.contains("NaN"));
    }

    #[test]
    fn preview_reports_shape() {
        let t = Table::new(
            vec!["a".into()],
            vec![vec![Value::Integer(1)], vec![Value::Null]],
        )
        .unwrap();
        let out = preview(&t, 1).unwrap();
        assert!(out.ends_with("[2 rows x 1 columns]"));
        assert!(!out.contains("NaN"));
    }
}
