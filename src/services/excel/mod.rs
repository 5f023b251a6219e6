pub mod reader;
pub mod types;
pub mod utils;

pub use reader::{read_csv, read_sheet, read_xls, read_xlsx};
pub use types::{SheetFormat, SheetRecords};
