use std::collections::BTreeMap;

use super::model::{Table, Value};
use super::schema::{laureate, population};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Renames: exact-match spelling fixes applied before the join
// ---------------------------------------------------------------------------

/// Exact string replacements applied to every cell of the laureate table.
///
/// Only whole-cell matches are rewritten; this is not a general
/// name-canonicalisation step, and historical entities (e.g. "Russian
/// Empire") are left alone and later fall out of the join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renames {
    mapping: BTreeMap<String, String>,
}

impl Default for Renames {
    /// Align the laureate dataset's spelling of the US with the population
    /// dataset's.
    fn default() -> Self {
        Renames::from_pairs([("United States of America", "United States")])
    }
}

impl Renames {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Renames {
            mapping: pairs
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Rewrite a single cell.
    pub fn apply(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => match self.mapping.get(s) {
                Some(to) => Value::String(to.clone()),
                None => value.clone(),
            },
            other => other.clone(),
        }
    }

    /// Rewrite every cell of every column.
    pub fn apply_table(&self, table: &Table) -> Table {
        table.map_cells(|v| self.apply(v))
    }
}

// ---------------------------------------------------------------------------
// Cleaning steps
// ---------------------------------------------------------------------------

/// Keep the ten laureate columns, sort by (Year, Category) and apply the
/// renames.
pub fn clean_laureates(raw: &Table, renames: &Renames) -> Result<Table, AnalysisError> {
    let projected = raw
        .select(&laureate::COLUMNS)?
        .sort_by(&[laureate::YEAR, laureate::CATEGORY])?;
    Ok(renames.apply_table(&projected))
}

/// Keep the five population columns, sorted by rank.
pub fn clean_population(raw: &Table) -> Result<Table, AnalysisError> {
    raw.select(&population::COLUMNS)?.sort_by(&[population::RANK])
}

/// Rows with neither a birth country nor an organization country: Peace
/// Prizes to multinational or stateless organizations.
pub fn stateless_rows(laureates: &Table) -> Result<Table, AnalysisError> {
    let birth = laureates.column_index(laureate::BIRTH_COUNTRY)?;
    let org = laureates.column_index(laureate::ORGANIZATION_COUNTRY)?;
    Ok(laureates.filter(|r| r[birth].is_null() && r[org].is_null()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_laureates() -> Table {
        let mut columns: Vec<String> = laureate::COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push("Extra".into());
        let row = |year: i64, cat: &str, name: &str, birth: Option<&str>, org: Option<&str>| {
            let opt = |s: Option<&str>| s.map(Value::from).unwrap_or(Value::Null);
            vec![
                Value::Integer(year),
                Value::from(cat),
                Value::from(format!("The Nobel Prize in {cat} {year}").as_str()),
                Value::from("\"for services\""),
                Value::Integer(year),
                Value::from(name),
                Value::from("Male"),
                Value::Null,
                opt(birth),
                opt(org),
                Value::from("ignored"),
            ]
        };
        Table::new(
            columns,
            vec![
                row(1902, "Physics", "C", Some("United States of America"), None),
                row(1901, "Physics", "B", Some("Germany"), Some("Germany")),
                row(1901, "Chemistry", "A", Some("Netherlands"), None),
                row(1901, "Physics", "D", None, None),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rename_is_exact_and_idempotent() {
        let r = Renames::default();
        let us = Value::from("United States of America");
        assert_eq!(r.apply(&us), Value::from("United States"));
        assert_eq!(r.apply(&r.apply(&us)), r.apply(&us));
        for untouched in [
            Value::from("united states of america"),
            Value::from("United States of America "),
            Value::from("Born in United States of America"),
            Value::Integer(7),
            Value::Null,
        ] {
            assert_eq!(r.apply(&untouched), untouched);
        }
    }

    #[test]
    fn cleaner_projects_sorts_and_renames() {
        let t = clean_laureates(&raw_laureates(), &Renames::default()).unwrap();
        assert_eq!(t.columns(), laureate::COLUMNS);
        let names: Vec<_> = t.column(laureate::FULL_NAME).unwrap().cloned().collect();
        // (1901, Chemistry), then the two 1901 Physics rows in input order.
        assert_eq!(
            names,
            vec![Value::from("A"), Value::from("B"), Value::from("D"), Value::from("C")]
        );
        assert_eq!(t.rows()[3][8], Value::from("United States"));
        assert_eq!(Renames::default().apply_table(&t), t);
    }

    #[test]
    fn stateless_rows_need_both_countries_absent() {
        let t = clean_laureates(&raw_laureates(), &Renames::default()).unwrap();
        let s = stateless_rows(&t).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.rows()[0][5], Value::from("D"));
    }

    #[test]
    fn population_is_sorted_by_rank() {
        let mut columns: Vec<String> =
            population::COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.insert(1, "CCA3".into());
        let raw = Table::new(
            columns,
            vec![
                vec![
                    Value::Integer(2),
                    Value::from("IND"),
                    Value::from("India"),
                    Value::from("Asia"),
                    Value::Integer(1_059_633_675),
                    Value::Float(17.77),
                ],
                vec![
                    Value::Integer(1),
                    Value::from("CHN"),
                    Value::from("China"),
                    Value::from("Asia"),
                    Value::Integer(1_264_099_069),
                    Value::Float(17.88),
                ],
            ],
        )
        .unwrap();
        let t = clean_population(&raw).unwrap();
        assert_eq!(t.columns(), population::COLUMNS);
        assert_eq!(t.rows()[0][1], Value::from("China"));
    }
}
