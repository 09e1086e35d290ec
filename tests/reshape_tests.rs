#[cfg(test)]
mod tests {
    use transition_explorer::reshape::{latest_snapshot, melt, LongRow};
    use transition_explorer::workbook::{CellValue, ColumnLabel, WideRow, WideTable};

    fn wide(columns: Vec<ColumnLabel>, rows: Vec<(&str, Vec<CellValue>)>) -> WideTable {
        WideTable {
            columns,
            rows: rows
                .into_iter()
                .map(|(country, values)| WideRow {
                    country: country.to_string(),
                    values,
                })
                .collect(),
        }
    }

    #[test]
    fn test_melt_drops_missing_cells() {
        let table = wide(
            vec![ColumnLabel::Year(2020), ColumnLabel::Year(2021)],
            vec![("USA", vec![CellValue::Number(10.0), CellValue::Missing])],
        );
        let long = melt(&table);
        assert_eq!(
            long.rows,
            vec![LongRow {
                country: "USA".to_string(),
                year: "2020".to_string(),
                value: 10.0,
            }]
        );
        // Structural missingness is not a coercion failure.
        assert_eq!(long.dropped, 0);
    }

    #[test]
    fn test_melt_coerces_numeric_text_and_counts_failures() {
        let table = wide(
            vec![ColumnLabel::Year(2020), ColumnLabel::Year(2021)],
            vec![(
                "France",
                vec![
                    CellValue::Text("n/a".to_string()),
                    CellValue::Text("42.5".to_string()),
                ],
            )],
        );
        let long = melt(&table);
        assert_eq!(long.rows.len(), 1);
        assert_eq!(long.rows[0].year, "2021");
        assert_eq!(long.rows[0].value, 42.5);
        assert_eq!(long.dropped, 1);
    }

    #[test]
    fn test_melt_renders_labels_as_strings() {
        let table = wide(
            vec![
                ColumnLabel::Year(2020),
                ColumnLabel::Text("Coal".to_string()),
            ],
            vec![("USA", vec![CellValue::Number(1.0), CellValue::Number(2.0)])],
        );
        let years: Vec<String> = melt(&table).rows.into_iter().map(|r| r.year).collect();
        assert_eq!(years, vec!["2020", "Coal"]);
    }

    #[test]
    fn test_melt_is_a_pure_derivation() {
        let table = wide(
            vec![ColumnLabel::Year(2020), ColumnLabel::Year(2021)],
            vec![
                ("USA", vec![CellValue::Number(10.0), CellValue::Missing]),
                (
                    "India",
                    vec![CellValue::Text("bad".to_string()), CellValue::Number(6.5)],
                ),
            ],
        );
        let first = melt(&table);
        let second = melt(&table);
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_sorts_descending_by_value() {
        let table = wide(
            vec![ColumnLabel::Year(2020)],
            vec![
                ("A", vec![CellValue::Number(5.0)]),
                ("B", vec![CellValue::Number(9.0)]),
            ],
        );
        let snap = latest_snapshot(&table).unwrap();
        assert_eq!(snap.year, 2020);
        let order: Vec<&str> = snap.entries.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_snapshot_picks_maximum_year() {
        let table = wide(
            vec![ColumnLabel::Year(2019), ColumnLabel::Year(2021)],
            vec![(
                "USA",
                vec![CellValue::Number(1.0), CellValue::Number(2.0)],
            )],
        );
        let snap = latest_snapshot(&table).unwrap();
        assert_eq!(snap.year, 2021);
        assert_eq!(snap.entries[0].value, Some(2.0));
    }

    #[test]
    fn test_snapshot_keeps_all_countries_with_missing_last() {
        let table = wide(
            vec![ColumnLabel::Year(2020)],
            vec![
                ("A", vec![CellValue::Missing]),
                ("B", vec![CellValue::Number(3.0)]),
            ],
        );
        let snap = latest_snapshot(&table).unwrap();
        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[0].country, "B");
        assert_eq!(snap.entries[1].value, None);
    }

    #[test]
    fn test_snapshot_ignores_text_columns() {
        let table = wide(
            vec![
                ColumnLabel::Year(2020),
                ColumnLabel::Text("Notes".to_string()),
            ],
            vec![(
                "USA",
                vec![CellValue::Number(4.0), CellValue::Number(99.0)],
            )],
        );
        let snap = latest_snapshot(&table).unwrap();
        assert_eq!(snap.year, 2020);
        assert_eq!(snap.entries[0].value, Some(4.0));
    }

    #[test]
    fn test_snapshot_none_for_composition_shape() {
        let table = wide(
            vec![
                ColumnLabel::Text("Coal".to_string()),
                ColumnLabel::Text("Gas".to_string()),
            ],
            vec![(
                "USA",
                vec![CellValue::Number(0.4), CellValue::Number(0.6)],
            )],
        );
        assert!(latest_snapshot(&table).is_none());
    }

    #[test]
    fn test_snapshot_ties_keep_row_order() {
        let table = wide(
            vec![ColumnLabel::Year(2020)],
            vec![
                ("First", vec![CellValue::Number(5.0)]),
                ("Second", vec![CellValue::Number(5.0)]),
            ],
        );
        let snap = latest_snapshot(&table).unwrap();
        let order: Vec<&str> = snap.entries.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(order, vec!["First", "Second"]);
    }
}
