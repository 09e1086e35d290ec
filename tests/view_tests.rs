#[cfg(test)]
mod tests {
    use transition_explorer::reshape::{LongRow, LongTable};
    use transition_explorer::view::{
        default_selection, filter_long, generation_mix, share_percent, year_order,
    };
    use transition_explorer::workbook::{CellValue, ColumnLabel, WideRow, WideTable};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn long_with_years(years: &[&str]) -> LongTable {
        LongTable {
            rows: years
                .iter()
                .map(|y| LongRow {
                    country: "USA".to_string(),
                    year: y.to_string(),
                    value: 1.0,
                })
                .collect(),
            dropped: 0,
        }
    }

    #[test]
    fn test_default_selection_caps_at_first_eight() {
        let countries = names(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]);
        assert_eq!(
            default_selection(&countries),
            names(&["A", "B", "C", "D", "E", "F", "G", "H"])
        );
    }

    #[test]
    fn test_default_selection_takes_all_when_few() {
        let countries = names(&["A", "B", "C", "D", "E"]);
        assert_eq!(default_selection(&countries), countries);
    }

    #[test]
    fn test_year_order_is_numeric_not_lexicographic() {
        // Lexicographic order would put "999" last.
        let long = long_with_years(&["2021", "999", "2020", "2021"]);
        assert_eq!(year_order(&long), vec!["999", "2020", "2021"]);
    }

    #[test]
    fn test_year_order_text_labels_sort_after_years() {
        let long = long_with_years(&["Coal", "2020"]);
        assert_eq!(year_order(&long), vec!["2020", "Coal"]);
    }

    #[test]
    fn test_filter_long_keeps_selection_and_diagnostic() {
        let mut long = long_with_years(&["2020"]);
        long.rows.push(LongRow {
            country: "India".to_string(),
            year: "2020".to_string(),
            value: 2.0,
        });
        long.dropped = 3;

        let filtered = filter_long(&long, &names(&["India"]));
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].country, "India");
        assert_eq!(filtered.dropped, 3);
    }

    #[test]
    fn test_generation_mix_preserves_column_order() {
        let table = WideTable {
            columns: vec![
                ColumnLabel::Text("Solar".to_string()),
                ColumnLabel::Text("Coal".to_string()),
                ColumnLabel::Text("Gas".to_string()),
            ],
            rows: vec![WideRow {
                country: "USA".to_string(),
                values: vec![
                    CellValue::Number(0.25),
                    CellValue::Number(0.4),
                    CellValue::Number(0.35),
                ],
            }],
        };
        let mix = generation_mix(&table, "USA");
        // Sheet order, not alphabetical.
        let sources: Vec<&str> = mix.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["Solar", "Coal", "Gas"]);
        assert_eq!(mix[1].share, Some(0.4));
    }

    #[test]
    fn test_generation_mix_unknown_country_is_empty() {
        let table = WideTable::default();
        assert!(generation_mix(&table, "Atlantis").is_empty());
    }

    #[test]
    fn test_share_table_percentages() {
        // Coal=0.4, Gas=0.35, Renewables=0.25 -> 40.00, 35.00, 25.00.
        let shares = [0.4, 0.35, 0.25];
        let formatted: Vec<String> = shares
            .iter()
            .map(|s| format!("{:.2}", share_percent(*s)))
            .collect();
        assert_eq!(formatted, vec!["40.00", "35.00", "25.00"]);
    }

    #[test]
    fn test_share_percent_rounds_to_two_decimals() {
        assert_eq!(share_percent(0.333333), 33.33);
        assert_eq!(share_percent(1.0), 100.0);
    }
}
