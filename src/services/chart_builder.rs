use indexmap::IndexMap;

use crate::error::ChartError;
use crate::models::{
    cell, ChartKind, ChartMode, ChartSeries, ColumnKind, ColumnProfiles, Record, SeriesData,
};
use crate::services::palette;

const BORDER_WIDTH: u32 = 2;

/// Turns one target column into chart-ready labels and series.
///
/// Pie and doughnut charts count occurrences of each distinct value of the
/// target column. Bar and line charts label rows by the target column and
/// emit one series per other numeric column, aligned by row.
pub fn build(
    records: &[Record],
    profiles: &ColumnProfiles,
    target_column: &str,
    chart_kind: ChartKind,
) -> Result<ChartSeries, ChartError> {
    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    if !profiles.contains_key(target_column) {
        return Err(ChartError::InvalidColumn(target_column.to_string()));
    }

    let chart = match chart_kind.mode() {
        ChartMode::Categorical => categorical_series(records, target_column),
        ChartMode::Numeric => numeric_series(records, profiles, target_column, chart_kind),
    };

    tracing::debug!(
        "Built {:?} chart for column {}: {} labels, {} series",
        chart_kind,
        target_column,
        chart.labels.len(),
        chart.series.len()
    );

    Ok(chart)
}

fn categorical_series(records: &[Record], target_column: &str) -> ChartSeries {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in records.iter().filter_map(|record| cell(record, target_column)) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    let colors = (0..counts.len())
        .map(|i| palette::categorical_color(i).to_string())
        .collect();
    let (labels, values): (Vec<String>, Vec<f64>) = counts
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .unzip();

    ChartSeries {
        labels,
        series: vec![SeriesData {
            label: target_column.to_string(),
            values,
            color_index: 0,
            colors,
            border_width: BORDER_WIDTH,
            fill: None,
        }],
        mode: ChartMode::Categorical,
    }
}

fn numeric_series(
    records: &[Record],
    profiles: &ColumnProfiles,
    target_column: &str,
    chart_kind: ChartKind,
) -> ChartSeries {
    let labels = records
        .iter()
        .enumerate()
        .map(|(i, record)| match cell(record, target_column) {
            Some(value) => value.to_string(),
            None => format!("Row {}", i + 1),
        })
        .collect();

    let series = profiles
        .values()
        .filter(|profile| profile.kind == ColumnKind::Numeric && profile.name != target_column)
        .enumerate()
        .map(|(index, profile)| SeriesData {
            label: profile.name.clone(),
            // Missing or unparsable cells plot as zero rather than a gap.
            values: records
                .iter()
                .map(|record| {
                    cell(record, &profile.name)
                        .and_then(|value| value.as_number())
                        .unwrap_or(0.0)
                })
                .collect(),
            color_index: index,
            colors: vec![palette::series_color(index)],
            border_width: BORDER_WIDTH,
            fill: chart_kind.fill(),
        })
        .collect();

    ChartSeries {
        labels,
        series,
        mode: ChartMode::Numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::profiler::profile;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_pie_counts_in_first_seen_order_and_skips_nulls() {
        let rows = records(json!([{"c": "a"}, {"c": "b"}, {"c": "a"}, {"c": null}]));
        let chart = build(&rows, &profile(&rows), "c", ChartKind::Pie).unwrap();
        assert_eq!(chart.mode, ChartMode::Categorical);
        assert_eq!(chart.labels, vec!["a", "b"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values, vec![2.0, 1.0]);
        assert_eq!(chart.series[0].label, "c");
        assert_eq!(chart.series[0].colors, vec!["#FF6384", "#36A2EB"]);
        assert_eq!(chart.series[0].fill, None);
    }

    #[test]
    fn test_equal_counts_keep_first_seen_order() {
        let rows = records(json!([{"c": "z"}, {"c": "y"}, {"c": "y"}, {"c": "z"}, {"c": "x"}]));
        let chart = build(&rows, &profile(&rows), "c", ChartKind::Doughnut).unwrap();
        assert_eq!(chart.labels, vec!["z", "y", "x"]);
        assert_eq!(chart.series[0].values, vec![2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_pie_groups_numbers_by_string_form() {
        let rows = records(json!([{"n": 1}, {"n": "1"}, {"n": 2.5}]));
        let chart = build(&rows, &profile(&rows), "n", ChartKind::Pie).unwrap();
        assert_eq!(chart.labels, vec!["1", "2.5"]);
        assert_eq!(chart.series[0].values, vec![2.0, 1.0]);
    }

    #[test]
    fn test_pie_puts_negative_zero_in_the_zero_slice() {
        let rows = records(json!([{"n": 0}, {"n": -0.0}, {"n": "0"}]));
        let profiles = profile(&rows);
        let chart = build(&rows, &profiles, "n", ChartKind::Pie).unwrap();
        assert_eq!(chart.labels, vec!["0"]);
        assert_eq!(chart.series[0].values, vec![3.0]);
        assert_eq!(profiles["n"].unique_count, 2);
    }

    #[test]
    fn test_pie_colors_wrap_after_eight_labels() {
        let rows: Vec<Record> = (0..10)
            .map(|i| records(json!([{ "c": format!("v{}", i) }])).remove(0))
            .collect();
        let chart = build(&rows, &profile(&rows), "c", ChartKind::Pie).unwrap();
        let colors = &chart.series[0].colors;
        assert_eq!(colors.len(), 10);
        assert_eq!(colors[8], colors[0]);
        assert_eq!(colors[9], colors[1]);
    }

    #[test]
    fn test_bar_zero_fills_missing_values() {
        let rows = records(json!([{"x": "r1", "y": 5}, {"x": "r2", "y": null}]));
        let chart = build(&rows, &profile(&rows), "x", ChartKind::Bar).unwrap();
        assert_eq!(chart.mode, ChartMode::Numeric);
        assert_eq!(chart.labels, vec!["r1", "r2"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "y");
        assert_eq!(chart.series[0].values, vec![5.0, 0.0]);
        assert_eq!(chart.series[0].fill, Some(true));
    }

    #[test]
    fn test_null_labels_fall_back_to_row_numbers() {
        let rows = records(json!([{"x": null, "y": 1}, {"y": 2}, {"x": "third", "y": 3}]));
        let chart = build(&rows, &profile(&rows), "x", ChartKind::Line).unwrap();
        assert_eq!(chart.labels, vec!["Row 1", "Row 2", "third"]);
        assert_eq!(chart.series[0].fill, Some(false));
    }

    #[test]
    fn test_numeric_target_is_excluded_from_series() {
        let rows = records(json!([
            {"year": 2020, "sales": 10, "cost": "4", "region": "n"},
            {"year": 2021, "sales": 12, "cost": "5", "region": "s"}
        ]));
        let chart = build(&rows, &profile(&rows), "year", ChartKind::Bar).unwrap();
        assert_eq!(chart.labels, vec!["2020", "2021"]);
        let names: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(names, vec!["sales", "cost"]);
        assert_eq!(chart.series[1].values, vec![4.0, 5.0]);
        assert_eq!(chart.series[0].colors, vec!["hsl(0, 100%, 50%)"]);
        assert_eq!(chart.series[1].colors, vec!["hsl(60, 100%, 50%)"]);
        assert_eq!(chart.series[1].color_index, 1);
    }

    #[test]
    fn test_no_other_numeric_columns_gives_empty_series() {
        let rows = records(json!([{"name": "a", "n": 1}, {"name": "b", "n": 2}]));
        let chart = build(&rows, &profile(&rows), "n", ChartKind::Line).unwrap();
        assert_eq!(chart.labels, vec!["1", "2"]);
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_empty_dataset_fails() {
        let result = build(&[], &ColumnProfiles::new(), "x", ChartKind::Bar);
        assert_eq!(result, Err(ChartError::EmptyDataset));
    }

    #[test]
    fn test_unknown_column_fails() {
        let rows = records(json!([{"c": "a"}]));
        let result = build(&rows, &profile(&rows), "doesNotExist", ChartKind::Pie);
        assert_eq!(
            result,
            Err(ChartError::InvalidColumn("doesNotExist".to_string()))
        );
    }
}
