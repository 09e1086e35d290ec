//! Workbook loader: reads one named sheet of the tracker workbook into a
//! wide table (one row per country, one column per year or category), and
//! caches the result per sheet name for the process lifetime.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};

/// A normalized column header. Integer parsing is attempted for every
/// non-"Country" header; labels that do not parse stay as text, so year
/// columns and category columns can coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLabel {
    Year(i32),
    Text(String),
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLabel::Year(y) => write!(f, "{}", y),
            ColumnLabel::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A raw cell. Text is kept as-is so the reshaper can distinguish structural
/// missingness from values that fail numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub country: String,
    /// One entry per `WideTable::columns` label, in the same order.
    pub values: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    /// Non-"Country" columns in original sheet order.
    pub columns: Vec<ColumnLabel>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    /// Distinct country names, sorted lexicographically.
    pub fn countries(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .iter()
            .filter(|r| !r.country.is_empty())
            .map(|r| r.country.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn row(&self, country: &str) -> Option<&WideRow> {
        self.rows.iter().find(|r| r.country == country)
    }
}

const COUNTRY_COLUMN: &str = "Country";

// Spreadsheet exports with irregular headers produce "Unnamed: N" helper
// columns; empty headers are the same artifact once the export round-trips.
fn is_helper_header(header: &Data) -> bool {
    match header {
        Data::Empty => true,
        Data::String(s) => {
            let s = s.trim();
            s.is_empty() || s.starts_with("Unnamed")
        }
        _ => false,
    }
}

fn normalize_label(header: &Data) -> ColumnLabel {
    match header {
        Data::String(s) => {
            let s = s.trim();
            match s.parse::<i32>() {
                Ok(year) => ColumnLabel::Year(year),
                Err(_) => ColumnLabel::Text(s.to_string()),
            }
        }
        Data::Int(i) => ColumnLabel::Year(*i as i32),
        Data::Float(f) if f.fract() == 0.0 => ColumnLabel::Year(*f as i32),
        other => ColumnLabel::Text(other.to_string()),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(s.to_string())
            }
        }
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Reads the named sheet into a `WideTable`.
///
/// Fails when the workbook cannot be opened, the sheet does not exist, or
/// the sheet has no "Country" column. Rows without a country name are
/// skipped.
pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<WideTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("cannot open workbook at {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("sheet {:?} not found in {}", sheet_name, path.display()))?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(h) => h,
        None => bail!("sheet {:?} is empty", sheet_name),
    };

    // Locate the Country column and the data columns, dropping helper columns.
    let mut country_idx = None;
    let mut data_cols: Vec<(usize, ColumnLabel)> = Vec::new();
    for (idx, cell) in header.iter().enumerate() {
        if matches!(cell, Data::String(s) if s.trim() == COUNTRY_COLUMN) {
            country_idx = Some(idx);
        } else if !is_helper_header(cell) {
            data_cols.push((idx, normalize_label(cell)));
        }
    }
    let country_idx = match country_idx {
        Some(idx) => idx,
        None => bail!("sheet {:?} has no \"Country\" column", sheet_name),
    };

    let mut table = WideTable {
        columns: data_cols.iter().map(|(_, label)| label.clone()).collect(),
        rows: Vec::new(),
    };
    for row in rows {
        let country = match row.get(country_idx) {
            Some(Data::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => continue,
        };
        let values = data_cols
            .iter()
            .map(|(idx, _)| row.get(*idx).map_or(CellValue::Missing, cell_value))
            .collect();
        table.rows.push(WideRow { country, values });
    }
    Ok(table)
}

/// Memoization map over `load_sheet`, keyed by sheet name. No eviction; the
/// sheet set is fixed and small. Failures are cached as well so a bad sheet
/// is not re-read on every repaint.
#[derive(Default)]
pub struct SheetCache {
    entries: HashMap<String, Result<WideTable, String>>,
}

impl SheetCache {
    pub fn contains(&self, sheet_name: &str) -> bool {
        self.entries.contains_key(sheet_name)
    }

    pub fn get(&mut self, path: &Path, sheet_name: &str) -> Result<&WideTable, String> {
        self.entries
            .entry(sheet_name.to_string())
            .or_insert_with(|| load_sheet(path, sheet_name).map_err(|e| format!("{:#}", e)))
            .as_ref()
            .map_err(Clone::clone)
    }
}
