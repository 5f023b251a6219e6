use calamine::Data;
use std::collections::HashSet;

use crate::models::CellValue;

const EMPTY_HEADER: &str = "__EMPTY";

/// Header names for a sheet's first row. Blank headers become `__EMPTY`
/// and repeats get a numeric suffix, so every column keeps a unique key.
pub fn header_names<I, S>(raw_headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut existing_names = HashSet::new();
    raw_headers
        .into_iter()
        .map(|raw| unique_header(raw.as_ref(), &mut existing_names))
        .collect()
}

fn unique_header(raw: &str, existing_names: &mut HashSet<String>) -> String {
    let base_name = if raw.trim().is_empty() {
        EMPTY_HEADER.to_string()
    } else {
        raw.to_string()
    };

    let mut counter = 1;
    let mut cleaned = base_name.clone();
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    cleaned
}

/// Cell value for a spreadsheet cell; `None` for empty cells so they stay
/// absent from the record.
pub fn data_to_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::String(s) => Some(CellValue::Text(s.clone())),
        // Dates stay as Excel serial numbers
        Data::DateTime(d) => Some(CellValue::Number(d.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}

/// Cell value for a CSV field; empty fields are absent.
pub fn text_to_cell(field: &str) -> Option<CellValue> {
    if field.is_empty() {
        None
    } else {
        Some(CellValue::Text(field.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_and_blank_headers() {
        let names = header_names(["id", "name", "", "name", " ", "name"]);
        assert_eq!(
            names,
            vec!["id", "name", "__EMPTY", "name_1", "__EMPTY_1", "name_2"]
        );
    }

    #[test]
    fn test_header_names_keep_original_text() {
        assert_eq!(header_names(["Total Sales ($)"]), vec!["Total Sales ($)"]);
    }

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Empty), None);
        assert_eq!(data_to_cell(&Data::Int(3)), Some(CellValue::Number(3.0)));
        assert_eq!(data_to_cell(&Data::Float(2.5)), Some(CellValue::Number(2.5)));
        assert_eq!(data_to_cell(&Data::Bool(true)), Some(CellValue::Bool(true)));
        assert_eq!(
            data_to_cell(&Data::String("x".into())),
            Some(CellValue::Text("x".into()))
        );
    }

    #[test]
    fn test_text_to_cell() {
        assert_eq!(text_to_cell(""), None);
        assert_eq!(text_to_cell("12"), Some(CellValue::Text("12".into())));
    }
}
