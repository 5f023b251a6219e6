use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use smallvec::SmallVec;
use std::collections::HashSet;

use crate::models::{
    cell, CellValue, ColumnKind, ColumnProfile, ColumnProfiles, ColumnStatistics, DatasetSummary,
    Record, ValueType, SAMPLE_SIZE,
};

/// Identity used for distinct-value counting: variant plus exact value.
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Bool(bool),
    Number(u64),
    Text(&'a str),
}

impl<'a> ValueKey<'a> {
    fn of(value: &'a CellValue) -> Option<Self> {
        match value {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(ValueKey::Bool(*b)),
            // -0.0 and 0.0 count as the same value
            CellValue::Number(n) if *n == 0.0 => Some(ValueKey::Number(0)),
            CellValue::Number(n) => Some(ValueKey::Number(n.to_bits())),
            CellValue::Text(s) => Some(ValueKey::Text(s)),
        }
    }
}

#[derive(Debug, Default)]
struct NumericAccumulator {
    count: usize,
    min: f64,
    max: f64,
    sum: f64,
}

impl NumericAccumulator {
    fn push(&mut self, n: f64) {
        if self.count == 0 {
            self.min = n;
            self.max = n;
        } else {
            self.min = self.min.min(n);
            self.max = self.max.max(n);
        }
        self.sum += n;
        self.count += 1;
    }

    fn finish(self) -> Option<ColumnStatistics> {
        if self.count == 0 {
            return None;
        }
        Some(ColumnStatistics {
            min: self.min,
            max: self.max,
            sum: self.sum,
            avg: self.sum / self.count as f64,
        })
    }
}

/// Column names across all records: the union of keys in first-seen order.
pub fn column_names(records: &[Record]) -> Vec<String> {
    let mut names: IndexSet<&str> = IndexSet::new();
    for record in records {
        names.extend(record.keys().map(|k| k.as_str()));
    }
    names.into_iter().map(str::to_string).collect()
}

/// Infers kind and descriptive statistics for every column of `records`.
///
/// Never fails: an unparsable cell only downgrades its own column to
/// categorical. Columns are profiled independently and returned in
/// column order.
pub fn profile(records: &[Record]) -> ColumnProfiles {
    let start = std::time::Instant::now();
    let columns = column_names(records);

    let profiles: Vec<ColumnProfile> = columns
        .par_iter()
        .map(|name| profile_column(records, name))
        .collect();

    tracing::debug!(
        "Profiled {} columns over {} rows in {:?}",
        profiles.len(),
        records.len(),
        start.elapsed()
    );

    profiles
        .into_iter()
        .map(|profile| (profile.name.clone(), profile))
        .collect()
}

pub fn profile_column(records: &[Record], name: &str) -> ColumnProfile {
    let mut null_count = 0;
    let mut seen = HashSet::new();
    let mut sample = SmallVec::<[CellValue; SAMPLE_SIZE]>::new();
    let mut kind = ColumnKind::Empty;
    let mut numbers = NumericAccumulator::default();

    for record in records {
        let Some(value) = cell(record, name) else {
            null_count += 1;
            continue;
        };

        if let Some(key) = ValueKey::of(value) {
            seen.insert(key);
        }
        if sample.len() < SAMPLE_SIZE {
            sample.push(value.clone());
        }

        // Once categorical, a column never returns to numeric.
        if kind != ColumnKind::Categorical {
            match value.as_number() {
                Some(n) => {
                    kind = ColumnKind::Numeric;
                    numbers.push(n);
                }
                None => {
                    tracing::trace!("Column {} downgraded to categorical by {:?}", name, value);
                    kind = ColumnKind::Categorical;
                }
            }
        }
    }

    let statistics = match kind {
        ColumnKind::Numeric => numbers.finish(),
        _ => None,
    };

    ColumnProfile {
        name: name.to_string(),
        kind,
        non_null_count: records.len() - null_count,
        null_count,
        unique_count: seen.len(),
        sample,
        statistics,
    }
}

/// Distinct storage types of a column's non-null cells, in first-seen order.
pub fn value_types(records: &[Record], name: &str) -> Vec<ValueType> {
    let types: IndexSet<ValueType> = records
        .iter()
        .filter_map(|record| cell(record, name).and_then(CellValue::value_type))
        .collect();
    types.into_iter().collect()
}

/// Row/column totals, observed cell types and every column profile, in
/// column order.
pub fn summarize(records: &[Record]) -> DatasetSummary {
    let profiles = profile(records);
    let data_types: IndexMap<String, Vec<ValueType>> = profiles
        .keys()
        .map(|name| (name.clone(), value_types(records, name)))
        .collect();

    DatasetSummary {
        total_rows: records.len(),
        total_columns: profiles.len(),
        headers: profiles.keys().cloned().collect(),
        data_types,
        columns: profiles.into_values().collect(),
    }
}
