use std::collections::HashMap;

use super::model::{Table, Value};
use crate::error::AnalysisError;

/// Inner equi-join on `left_key = right_key`.
///
/// Keys compare by exact value equality, so string keys are case-sensitive.
/// The output carries every left column followed by every right column (both
/// key columns survive under their own names). Rows come out in left order,
/// and for one left row its matches come out in right order. Null and
/// unmatched keys are dropped.
pub fn inner_join(
    left: &Table,
    left_key: &str,
    right: &Table,
    right_key: &str,
) -> Result<Table, AnalysisError> {
    let li = left.column_index(left_key)?;
    let ri = right.column_index(right_key)?;

    let mut index: HashMap<&Value, Vec<&Vec<Value>>> = HashMap::new();
    for row in right.rows() {
        if !row[ri].is_null() {
            index.entry(&row[ri]).or_default().push(row);
        }
    }

    let mut rows = Vec::new();
    for lrow in left.rows() {
        if lrow[li].is_null() {
            continue;
        }
        let Some(matches) = index.get(&lrow[li]) else {
            continue;
        };
        for rrow in matches {
            let mut joined = Vec::with_capacity(lrow.len() + rrow.len());
            joined.extend(lrow.iter().cloned());
            joined.extend(rrow.iter().cloned());
            rows.push(joined);
        }
    }

    let columns = left
        .columns()
        .iter()
        .chain(right.columns())
        .cloned()
        .collect();

    log::debug!(
        "inner join {left_key} = {right_key}: {} x {} -> {} rows",
        left.len(),
        right.len(),
        rows.len()
    );
    Ok(Table::from_parts(columns, rows))
}
