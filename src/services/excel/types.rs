use serde::{Deserialize, Serialize};

use crate::models::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    #[default]
    Xlsx,
    Xls,
    Csv,
}

/// Records read from the first sheet of an upload.
#[derive(Debug, Clone, Serialize)]
pub struct SheetRecords {
    pub sheet_name: String,
    pub sheet_names: Vec<String>,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}
