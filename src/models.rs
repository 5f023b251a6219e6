use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::services::numeric::parse_numeric;

pub const SAMPLE_SIZE: usize = 5;

/// A single spreadsheet cell as handed over by the upstream reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric reading of the cell: finite numbers, and text matching the
    /// decimal/scientific grammar. Booleans and empty strings never qualify.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_numeric(s),
            _ => None,
        }
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(_) => Some(ValueType::Boolean),
            CellValue::Number(_) => Some(ValueType::Number),
            CellValue::Text(_) => Some(ValueType::String),
        }
    }
}

/// Storage type of a non-null cell, independent of the inferred column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Number,
    String,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            // -0 groups and labels the same as 0
            CellValue::Number(n) if *n == 0.0 => f.write_str("0"),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// One spreadsheet row. Key order is the order cells were read in.
pub type Record = IndexMap<String, CellValue>;

/// Looks a column up in a record, folding explicit nulls into absence.
pub fn cell<'a>(record: &'a Record, column: &str) -> Option<&'a CellValue> {
    record.get(column).filter(|value| !value.is_null())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null_count: usize,
    pub null_count: usize,
    pub unique_count: usize,
    pub sample: SmallVec<[CellValue; SAMPLE_SIZE]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ColumnStatistics>,
}

/// Column profiles keyed by name, in column order.
pub type ColumnProfiles = IndexMap<String, ColumnProfile>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub headers: Vec<String>,
    /// Cell storage types seen in each column, in first-seen order.
    pub data_types: IndexMap<String, Vec<ValueType>>,
    pub columns: Vec<ColumnProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Doughnut,
    Bar,
    Line,
}

impl ChartKind {
    pub fn mode(self) -> ChartMode {
        match self {
            ChartKind::Pie | ChartKind::Doughnut => ChartMode::Categorical,
            ChartKind::Bar | ChartKind::Line => ChartMode::Numeric,
        }
    }

    /// Area fill hint for numeric charts; categorical charts carry none.
    pub fn fill(self) -> Option<bool> {
        match self {
            ChartKind::Bar => Some(true),
            ChartKind::Line => Some(false),
            ChartKind::Pie | ChartKind::Doughnut => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Categorical,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub label: String,
    pub values: Vec<f64>,
    pub color_index: usize,
    pub colors: Vec<String>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<SeriesData>,
    pub mode: ChartMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_values_deserialize_from_json_scalars() {
        let record: Record = serde_json::from_value(json!({
            "name": "widget",
            "price": 9.5,
            "active": true,
            "note": null
        }))
        .unwrap();

        assert_eq!(record["name"], CellValue::Text("widget".into()));
        assert_eq!(record["price"], CellValue::Number(9.5));
        assert_eq!(record["active"], CellValue::Bool(true));
        assert_eq!(record["note"], CellValue::Null);
        let keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "price", "active", "note"]);
    }

    #[test]
    fn test_nested_cell_is_rejected() {
        let result: Result<Record, _> = serde_json::from_value(json!({ "a": [1, 2] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_display_matches_label_form() {
        assert_eq!(CellValue::Number(5.0).to_string(), "5");
        assert_eq!(CellValue::Number(3.5).to_string(), "3.5");
        assert_eq!(CellValue::Number(-0.0).to_string(), "0");
        assert_eq!(CellValue::Number(0.0).to_string(), "0");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(CellValue::Text("a b".into()).to_string(), "a b");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Text("1e3".into()).as_number(), Some(1000.0));
        assert_eq!(CellValue::Number(2.0).as_number(), Some(2.0));
        assert_eq!(CellValue::Number(f64::INFINITY).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Text(String::new()).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn test_cell_folds_null_into_absence() {
        let mut record = Record::new();
        record.insert("a".into(), CellValue::Null);
        record.insert("b".into(), CellValue::from(1.0));
        assert!(cell(&record, "a").is_none());
        assert!(cell(&record, "missing").is_none());
        assert_eq!(cell(&record, "b"), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_value_types() {
        assert_eq!(CellValue::Null.value_type(), None);
        assert_eq!(CellValue::from(true).value_type(), Some(ValueType::Boolean));
        assert_eq!(CellValue::from(1.0).value_type(), Some(ValueType::Number));
        assert_eq!(CellValue::from("1").value_type(), Some(ValueType::String));
    }

    #[test]
    fn test_chart_kind_modes() {
        assert_eq!(ChartKind::Pie.mode(), ChartMode::Categorical);
        assert_eq!(ChartKind::Doughnut.mode(), ChartMode::Categorical);
        assert_eq!(ChartKind::Bar.mode(), ChartMode::Numeric);
        assert_eq!(ChartKind::Line.fill(), Some(false));
        assert_eq!(ChartKind::Bar.fill(), Some(true));
        assert_eq!(ChartKind::Pie.fill(), None);
    }
}
