use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Value – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Used as a sort and group key, so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

// -- Manual Eq/Ord so we can sort and group on Value --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "NaN"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl Value {
    /// Infer the cell type from raw text, the way a CSV reader would.
    pub fn infer(s: &str) -> Self {
        if s.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if looks_decimal(s) {
            if let Ok(f) = s.parse::<f64>() {
                return Value::Float(f);
            }
        }
        if s == "true" || s == "false" {
            return Value::Bool(s == "true");
        }
        Value::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to interpret the value as an `f64` for numeric statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Starts like a decimal literal, so words such as "Nan" or "Inf" stay text.
fn looks_decimal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = digits.strip_prefix('.').unwrap_or(digits);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Table – an immutable, column-named set of rows
// ---------------------------------------------------------------------------

/// Row-oriented table with named columns.
///
/// Every operation returns a new table; nothing is mutated in place once a
/// table has been handed to the next pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, checking every row has one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, AnalysisError> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(AnalysisError::RaggedRow {
                row: i,
                expected: columns.len(),
                found: row.len(),
            });
        }
        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, or a missing-column error.
    pub fn column_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    /// Iterate over the cells of one column.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value>, AnalysisError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Projection onto the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table, AnalysisError> {
        let indices = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<Vec<_>, _>>()?;
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    /// Stable ascending sort on several key columns.
    pub fn sort_by(&self, names: &[&str]) -> Result<Table, AnalysisError> {
        let indices = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<Vec<_>, _>>()?;
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            indices
                .iter()
                .map(|&i| a[i].cmp(&b[i]))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Keep the rows for which `keep` returns true.
    pub fn filter<F>(&self, keep: F) -> Table
    where
        F: Fn(&[Value]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Apply `f` to every cell, producing a new table.
    pub fn map_cells<F>(&self, f: F) -> Table
    where
        F: Fn(&Value) -> Value,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(&f).collect())
                .collect(),
        }
    }

    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Counts of the non-null values of a column, largest first.
    /// Equal counts are ordered by the value itself.
    pub fn value_counts(&self, name: &str) -> Result<Vec<(Value, usize)>, AnalysisError> {
        let mut counts: BTreeMap<&Value, usize> = BTreeMap::new();
        for v in self.column(name)?.filter(|v| !v.is_null()) {
            *counts.entry(v).or_default() += 1;
        }
        let mut out: Vec<(Value, usize)> =
            counts.into_iter().map(|(v, n)| (v.clone(), n)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(out)
    }

    /// Assemble a table whose rows are already known to match `columns`.
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Table {
        Table { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["k".into(), "v".into()],
            vec![
                vec![Value::from("b"), Value::Integer(1)],
                vec![Value::from("a"), Value::Integer(2)],
                vec![Value::from("b"), Value::Integer(3)],
                vec![Value::Null, Value::Integer(4)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn infers_cell_types() {
        assert_eq!(Value::infer(""), Value::Null);
        assert_eq!(Value::infer("1901"), Value::Integer(1901));
        assert_eq!(Value::infer("0.5"), Value::Float(0.5));
        assert_eq!(Value::infer("true"), Value::Bool(true));
        assert_eq!(Value::infer("Sweden"), Value::from("Sweden"));
        assert_eq!(Value::infer("-.5"), Value::Float(-0.5));
        assert_eq!(Value::infer("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn words_that_parse_as_floats_stay_text() {
        for word in ["Nan", "NaN", "inf", "Inf", "-infinity"] {
            assert_eq!(Value::infer(word), Value::from(word), "{word}");
        }
    }

    #[test]
    fn null_sorts_first() {
        assert!(Value::Null < Value::Integer(0));
        assert!(Value::Integer(5) < Value::from("a"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Table::new(vec!["a".into()], vec![vec![]]).unwrap_err();
        assert!(matches!(err, AnalysisError::RaggedRow { row: 0, .. }));
    }

    #[test]
    fn sort_is_stable() {
        let sorted = sample().sort_by(&["k"]).unwrap();
        let vs: Vec<_> = sorted.column("v").unwrap().cloned().collect();
        assert_eq!(
            vs,
            vec![Value::Integer(4), Value::Integer(2), Value::Integer(1), Value::Integer(3)]
        );
    }

    #[test]
    fn select_reports_missing_column() {
        let err = sample().select(&["k", "nope"]).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(c) if c == "nope"));
    }

    #[test]
    fn value_counts_skip_nulls_and_order_by_count() {
        let counts = sample().value_counts("k").unwrap();
        assert_eq!(counts, vec![(Value::from("b"), 2), (Value::from("a"), 1)]);
    }
}
