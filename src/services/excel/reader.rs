use bytes::Bytes;
use calamine::{open_workbook_from_rs, Reader, Xls, XlsError, Xlsx, XlsxError};
use std::io::Cursor;

use super::types::{SheetFormat, SheetRecords};
use super::utils::{data_to_cell, header_names, text_to_cell};
use crate::error::SheetError;
use crate::models::Record;

const CSV_SHEET_NAME: &str = "Sheet1";

pub fn read_sheet(format: SheetFormat, file_data: Bytes) -> Result<SheetRecords, SheetError> {
    match format {
        SheetFormat::Xlsx => read_xlsx(file_data),
        SheetFormat::Xls => read_xls(file_data),
        SheetFormat::Csv => read_csv(file_data),
    }
}

/// Reads the first worksheet of an XLSX workbook.
pub fn read_xlsx(file_data: Bytes) -> Result<SheetRecords, SheetError> {
    let cursor = Cursor::new(file_data);
    let workbook: Xlsx<Cursor<Bytes>> =
        open_workbook_from_rs(cursor).map_err(|e: XlsxError| {
            tracing::error!("Failed to open Excel file: {}", e);
            SheetError::Open(e.to_string())
        })?;
    read_first_worksheet(workbook)
}

/// Reads the first worksheet of a legacy XLS (BIFF) workbook.
pub fn read_xls(file_data: Bytes) -> Result<SheetRecords, SheetError> {
    let cursor = Cursor::new(file_data);
    let workbook: Xls<Cursor<Bytes>> = open_workbook_from_rs(cursor).map_err(|e: XlsError| {
        tracing::error!("Failed to open XLS file: {}", e);
        SheetError::Open(e.to_string())
    })?;
    read_first_worksheet(workbook)
}

/// The first row is the header row; rows without any filled cell are
/// skipped and empty cells stay absent from their record.
fn read_first_worksheet<W>(mut workbook: W) -> Result<SheetRecords, SheetError>
where
    W: Reader<Cursor<Bytes>>,
    W::Error: std::fmt::Display,
{
    let start = std::time::Instant::now();

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    tracing::info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let sheet_name = sheet_names.first().cloned().ok_or(SheetError::NoSheets)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SheetError::Open(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| header_names(row.iter().map(|cell| cell.to_string())))
        .ok_or(SheetError::NoHeader)?;

    let records: Vec<Record> = rows
        .filter_map(|row| {
            let record: Record = headers
                .iter()
                .zip(row.iter())
                .filter_map(|(header, data)| data_to_cell(data).map(|value| (header.clone(), value)))
                .collect();
            (!record.is_empty()).then_some(record)
        })
        .collect();

    tracing::info!(
        "Read {} records from sheet {} in {:?}",
        records.len(),
        sheet_name,
        start.elapsed()
    );

    Ok(SheetRecords {
        sheet_name,
        sheet_names,
        headers,
        records,
    })
}

/// Reads a CSV upload with a header line. Fields stay text; the profiler
/// decides which columns are numeric.
pub fn read_csv(file_data: Bytes) -> Result<SheetRecords, SheetError> {
    let start = std::time::Instant::now();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file_data.as_ref());

    let raw_headers = reader.headers()?.clone();
    if raw_headers.is_empty() {
        return Err(SheetError::NoHeader);
    }
    let headers = header_names(raw_headers.iter());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(header, field)| text_to_cell(field).map(|value| (header.clone(), value)))
            .collect();
        if !record.is_empty() {
            records.push(record);
        }
    }

    tracing::info!("Read {} CSV records in {:?}", records.len(), start.elapsed());

    Ok(SheetRecords {
        sheet_name: CSV_SHEET_NAME.to_string(),
        sheet_names: vec![CSV_SHEET_NAME.to_string()],
        headers,
        records,
    })
}
