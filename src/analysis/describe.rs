use std::collections::HashMap;

use serde::Serialize;

use crate::data::model::{Table, Value};

// ---------------------------------------------------------------------------
// Numeric summary
// ---------------------------------------------------------------------------

/// count / mean / std / min / quartiles / max, as `DataFrame.describe()`
/// reports them for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN below two values.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn of(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();

        let mean = if n == 0 {
            f64::NAN
        } else {
            sorted.iter().sum::<f64>() / n as f64
        };
        let std = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        NumericSummary {
            count: n,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.50),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between closest ranks. `sorted` must be ascending.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Categorical summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: usize,
}

impl CategoricalSummary {
    pub const LABELS: [&'static str; 4] = ["count", "unique", "top", "freq"];

    pub fn of<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut order: Vec<&Value> = Vec::new();
        let mut counts: HashMap<&Value, usize> = HashMap::new();
        let mut count = 0;
        for v in values.into_iter().filter(|v| !v.is_null()) {
            count += 1;
            let c = counts.entry(v).or_insert(0);
            if *c == 0 {
                order.push(v);
            }
            *c += 1;
        }

        let mut top = None;
        let mut freq = 0;
        for v in &order {
            let c = counts[v];
            if c > freq {
                freq = c;
                top = Some(v.to_string());
            }
        }

        CategoricalSummary {
            count,
            unique: order.len(),
            top,
            freq,
        }
    }
}

// ---------------------------------------------------------------------------
// Column dtypes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dtype {
    Int64,
    Float64,
    Bool,
    Object,
    /// No non-null cell to infer from.
    Null,
}

impl Dtype {
    pub fn name(self) -> &'static str {
        match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::Bool => "bool",
            Dtype::Object => "object",
            Dtype::Null => "null",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Dtype::Int64 | Dtype::Float64)
    }

    /// Column dtype the way Pandas would upcast it: integers with gaps
    /// become floats, anything mixed with text becomes `object`.
    pub fn of<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let (mut ints, mut floats, mut bools, mut others, mut nulls) = (0, 0, 0, 0, 0);
        for v in values {
            match v {
                Value::Null => nulls += 1,
                Value::Integer(_) => ints += 1,
                Value::Float(_) => floats += 1,
                Value::Bool(_) => bools += 1,
                Value::String(_) => others += 1,
            }
        }
        match (ints, floats, bools, others) {
            (0, 0, 0, 0) => Dtype::Null,
            (_, _, 0, 0) if floats > 0 || nulls > 0 => Dtype::Float64,
            (_, 0, 0, 0) => Dtype::Int64,
            (0, 0, _, 0) if nulls == 0 => Dtype::Bool,
            _ => Dtype::Object,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: Dtype,
}

/// Per-column non-null counts and dtypes (`DataFrame.info()`).
pub fn info(table: &Table) -> Vec<ColumnInfo> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cells = || table.rows().iter().map(move |r| &r[i]);
            ColumnInfo {
                name: name.clone(),
                non_null: cells().filter(|v| !v.is_null()).count(),
                dtype: Dtype::of(cells()),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Whole-table descriptions
// ---------------------------------------------------------------------------

/// Summaries of every numeric column.
pub fn describe_numeric(table: &Table) -> Vec<(String, NumericSummary)> {
    info(table)
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.dtype.is_numeric())
        .map(|(i, c)| {
            let values: Vec<f64> = table.rows().iter().filter_map(|r| r[i].as_f64()).collect();
            (c.name, NumericSummary::of(&values))
        })
        .collect()
}

/// Summaries of every object column (`describe(include="object")`). Bool
/// and all-null columns are left out.
pub fn describe_categorical(table: &Table) -> Vec<(String, CategoricalSummary)> {
    info(table)
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.dtype == Dtype::Object)
        .map(|(i, c)| {
            let summary = CategoricalSummary::of(table.rows().iter().map(|r| &r[i]));
            (c.name, summary)
        })
        .collect()
}
