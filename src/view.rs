//! View-model helpers shared by the two rendering strategies: country
//! selection defaults, year-axis ordering, filtering, and the generation-mix
//! projection for the composition view.

use crate::reshape::LongTable;
use crate::workbook::{CellValue, WideTable};

/// Cap on the seeded country selection for the time-series filter.
pub const MAX_DEFAULT_COUNTRIES: usize = 8;

/// Default multi-select: the first 8 countries in lexicographic order when
/// more than 8 exist, otherwise all of them. `countries` is already sorted.
pub fn default_selection(countries: &[String]) -> Vec<String> {
    if countries.len() > MAX_DEFAULT_COUNTRIES {
        countries[..MAX_DEFAULT_COUNTRIES].to_vec()
    } else {
        countries.to_vec()
    }
}

/// Distinct years of a long table in numeric order. Years are stored as
/// strings; labels that do not parse sort after the numeric ones.
pub fn year_order(long: &LongTable) -> Vec<String> {
    let mut years: Vec<String> = Vec::new();
    for row in &long.rows {
        if !years.contains(&row.year) {
            years.push(row.year.clone());
        }
    }
    years.sort_by(|a, b| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    years
}

/// Restricts a long table to the selected countries. The drop diagnostic is
/// carried through unchanged.
pub fn filter_long(long: &LongTable, selected: &[String]) -> LongTable {
    LongTable {
        rows: long
            .rows
            .iter()
            .filter(|row| selected.iter().any(|c| c == &row.country))
            .cloned()
            .collect(),
        dropped: long.dropped,
    }
}

/// One generation source of the composition view.
#[derive(Debug, Clone, PartialEq)]
pub struct MixEntry {
    pub source: String,
    /// Share of generation as a fraction; `None` when the cell is missing
    /// or not numeric.
    pub share: Option<f64>,
}

/// Projects one country's row into (source, share) pairs, preserving the
/// original column order as the categorical axis order.
pub fn generation_mix(wide: &WideTable, country: &str) -> Vec<MixEntry> {
    let row = match wide.row(country) {
        Some(row) => row,
        None => return Vec::new(),
    };
    wide.columns
        .iter()
        .zip(&row.values)
        .map(|(label, cell)| MixEntry {
            source: label.to_string(),
            share: match cell {
                CellValue::Number(v) if !v.is_nan() => Some(*v),
                CellValue::Text(s) => s.parse::<f64>().ok(),
                _ => None,
            },
        })
        .collect()
}

/// Share fraction to a percentage rounded to 2 decimal places.
pub fn share_percent(share: f64) -> f64 {
    (share * 100.0 * 100.0).round() / 100.0
}
