//! Series reshaper: wide-to-long melt for charting, and the latest-year
//! snapshot ranking used beside the time-series chart.

use std::cmp::Ordering;

use crate::workbook::{CellValue, ColumnLabel, WideTable};

/// One observation of the long table: (country, year-as-string, value).
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub country: String,
    pub year: String,
    pub value: f64,
}

/// Long/tidy form of a wide table. `dropped` counts cells that were present
/// but failed numeric coercion; structurally missing cells are not counted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LongTable {
    pub rows: Vec<LongRow>,
    pub dropped: usize,
}

/// Unpivots every non-"Country" column into (country, year, value) rows.
///
/// Two passes of null filtering: missing cells are dropped first, then cells
/// that fail coercion to a number are dropped and counted. The column label
/// is rendered to a string regardless of source type, for stable categorical
/// ordering downstream. Pure: the input is never mutated.
pub fn melt(wide: &WideTable) -> LongTable {
    let mut long = LongTable::default();
    for row in &wide.rows {
        for (label, cell) in wide.columns.iter().zip(&row.values) {
            let value = match cell {
                CellValue::Missing => continue,
                CellValue::Number(v) if v.is_nan() => continue,
                CellValue::Number(v) => *v,
                CellValue::Text(s) => match s.parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => {
                        long.dropped += 1;
                        continue;
                    }
                },
            };
            long.rows.push(LongRow {
                country: row.country.clone(),
                year: label.to_string(),
                value,
            });
        }
    }
    long
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub country: String,
    pub value: Option<f64>,
}

/// Cross-section of all countries at the latest year present in the table,
/// sorted descending by value. Derived fresh per render.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub year: i32,
    pub entries: Vec<SnapshotEntry>,
}

/// Ranks every country at the maximum year column, descending. Countries
/// without a value at that year sort last. Returns `None` when the table has
/// no year columns (composition sheets never reach this path).
pub fn latest_snapshot(wide: &WideTable) -> Option<Snapshot> {
    let (idx, year) = wide
        .columns
        .iter()
        .enumerate()
        .filter_map(|(i, label)| match label {
            ColumnLabel::Year(y) => Some((i, *y)),
            ColumnLabel::Text(_) => None,
        })
        .max_by_key(|&(_, y)| y)?;

    let mut entries: Vec<SnapshotEntry> = wide
        .rows
        .iter()
        .map(|row| SnapshotEntry {
            country: row.country.clone(),
            value: row.values.get(idx).and_then(|cell| match cell {
                CellValue::Number(v) if !v.is_nan() => Some(*v),
                CellValue::Text(s) => s.parse::<f64>().ok(),
                _ => None,
            }),
        })
        .collect();
    // Stable sort: ties keep sheet row order, missing values go last.
    entries.sort_by(|a, b| match (a.value, b.value) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    Some(Snapshot { year, entries })
}
